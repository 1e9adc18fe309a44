//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `REFOODIFY_DATA_FILE` - Path of the JSON data file (default: refoodify-data.json)
//! - `REFOODIFY_API_URL` - Base URL of the recipe and tips proxy (default: <http://127.0.0.1:3000>)
//! - `REFOODIFY_RECIPE_LIMIT` - Default number of recipes to request, 1-100 (default: 6)

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_FILE: &str = "refoodify-data.json";
const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_RECIPE_LIMIT: &str = "6";
const MAX_RECIPE_LIMIT: u8 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Refoodify CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Key-value JSON file holding pantry items and saved tips
    pub data_file: PathBuf,
    /// Base URL of the recipe and tips proxy
    pub api_url: Url,
    /// Default `number` for recipe lookups
    pub recipe_limit: u8,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_file = PathBuf::from(get_or_default(
            &lookup,
            "REFOODIFY_DATA_FILE",
            DEFAULT_DATA_FILE,
        ));
        let api_url = parse_api_url(&get_or_default(&lookup, "REFOODIFY_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("REFOODIFY_API_URL".to_string(), e))?;
        let recipe_limit = parse_recipe_limit(&get_or_default(
            &lookup,
            "REFOODIFY_RECIPE_LIMIT",
            DEFAULT_RECIPE_LIMIT,
        ))
        .map_err(|e| ConfigError::InvalidEnvVar("REFOODIFY_RECIPE_LIMIT".to_string(), e))?;

        Ok(Self {
            data_file,
            api_url,
            recipe_limit,
        })
    }
}

/// Parse a proxy base URL. Only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns a message describing why the URL was rejected.
pub fn parse_api_url(value: &str) -> Result<Url, String> {
    let url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}

/// Parse a recipe count between 1 and 100.
///
/// # Errors
///
/// Returns a message when the value is not a number in range.
pub fn parse_recipe_limit(value: &str) -> Result<u8, String> {
    let limit = value.trim().parse::<u8>().map_err(|e| e.to_string())?;
    if (1..=MAX_RECIPE_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(format!("must be between 1 and {MAX_RECIPE_LIMIT} (got {limit})"))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value. Blank values count as unset.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CliConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_file, PathBuf::from("refoodify-data.json"));
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:3000/");
        assert_eq!(config.recipe_limit, 6);
    }

    #[test]
    fn test_overrides() {
        let config = CliConfig::from_lookup(lookup(&[
            ("REFOODIFY_DATA_FILE", "/tmp/pantry.json"),
            ("REFOODIFY_API_URL", "https://refoodify.example/"),
            ("REFOODIFY_RECIPE_LIMIT", "12"),
        ]))
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/pantry.json"));
        assert_eq!(config.api_url.host_str(), Some("refoodify.example"));
        assert_eq!(config.recipe_limit, 12);
    }

    #[test]
    fn test_blank_value_uses_default() {
        let config = CliConfig::from_lookup(lookup(&[("REFOODIFY_RECIPE_LIMIT", "  ")])).unwrap();
        assert_eq!(config.recipe_limit, 6);
    }

    #[test]
    fn test_invalid_recipe_limit() {
        for bad in ["0", "101", "many", "-3"] {
            let err =
                CliConfig::from_lookup(lookup(&[("REFOODIFY_RECIPE_LIMIT", bad)])).unwrap_err();
            assert!(err.to_string().contains("REFOODIFY_RECIPE_LIMIT"));
        }
    }

    #[test]
    fn test_recipe_limit_bounds() {
        assert_eq!(parse_recipe_limit("1"), Ok(1));
        assert_eq!(parse_recipe_limit(" 100 "), Ok(100));
        assert!(parse_recipe_limit("0").is_err());
        assert!(parse_recipe_limit("255").is_err());
    }

    #[test]
    fn test_invalid_api_url() {
        assert!(CliConfig::from_lookup(lookup(&[("REFOODIFY_API_URL", "not a url")])).is_err());
        assert!(
            CliConfig::from_lookup(lookup(&[("REFOODIFY_API_URL", "ftp://example.com")])).is_err()
        );
    }
}
