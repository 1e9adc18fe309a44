//! Client for the Refoodify recipe and tips proxy.
//!
//! The proxy wraps every answer in `{ success, data | error }`. A non-2xx
//! status or `success: false` is returned as an [`ApiError`].
//!
//! # Endpoints
//!
//! - `GET /api/recipes/findByIngredients?ingredients=a,b&number=N`
//! - `GET /api/recipes/search?q=...&number=N`
//! - `GET /api/recipes/getDetails?recipeId=...`
//! - `GET /api/search/tips?q=...`

mod error;
mod types;

pub use error::ApiError;
pub use types::{
    Envelope, RecipeDetails, RecipeMatch, RecipeSearch, RecipeSummary, TipLink, TipSearch,
    recipe_url,
};

use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use types::ErrorEnvelope;

const FIND_BY_INGREDIENTS_PATH: &str = "api/recipes/findByIngredients";
const SEARCH_RECIPES_PATH: &str = "api/recipes/search";
const RECIPE_DETAILS_PATH: &str = "api/recipes/getDetails";
const SEARCH_TIPS_PATH: &str = "api/search/tips";

/// Recipe and tips proxy client.
#[derive(Debug, Clone)]
pub struct RecipeApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl RecipeApiClient {
    /// Create a client for the proxy at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(mut base_url: Url) -> Result<Self, ApiError> {
        // Keep any path prefix when joining endpoint paths.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Recipes that use the given ingredients.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the proxy reports a failure.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn find_by_ingredients<S: AsRef<str> + std::fmt::Debug>(
        &self,
        ingredients: &[S],
        number: u8,
    ) -> Result<Vec<RecipeMatch>, ApiError> {
        let joined = ingredients
            .iter()
            .map(|i| i.as_ref().trim())
            .filter(|i| !i.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        let number = number.to_string();
        let url = self.endpoint(
            FIND_BY_INGREDIENTS_PATH,
            &[("ingredients", joined.as_str()), ("number", number.as_str())],
        )?;
        self.get(url).await
    }

    /// Like [`Self::find_by_ingredients`], but any failure is logged and
    /// yields no recipes.
    pub async fn find_by_ingredients_or_empty<S: AsRef<str> + std::fmt::Debug>(
        &self,
        ingredients: &[S],
        number: u8,
    ) -> Vec<RecipeMatch> {
        self.find_by_ingredients(ingredients, number)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Recipe lookup failed, showing no recipes");
                Vec::new()
            })
    }

    /// Free-text recipe search.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the proxy reports a failure.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn search_recipes(&self, query: &str, number: u8) -> Result<RecipeSearch, ApiError> {
        let number = number.to_string();
        let url = self.endpoint(
            SEARCH_RECIPES_PATH,
            &[("q", query.trim()), ("number", number.as_str())],
        )?;
        self.get(url).await
    }

    /// Full information about one recipe.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the proxy reports a failure.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn recipe_details(&self, recipe_id: u64) -> Result<RecipeDetails, ApiError> {
        let id = recipe_id.to_string();
        let url = self.endpoint(RECIPE_DETAILS_PATH, &[("recipeId", id.as_str())])?;
        self.get(url).await
    }

    /// Web results for a food-storage question.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the proxy reports a failure.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn search_tips(&self, query: &str) -> Result<TipSearch, ApiError> {
        let url = self.endpoint(SEARCH_TIPS_PATH, &[("q", query.trim())])?;
        self.get(url).await
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    /// Send a GET request and unwrap the proxy envelope.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        tracing::debug!(%url, "Proxy request");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or(body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")))?;
        unwrap_envelope(envelope)
    }
}

/// Extract `data` from a successful envelope.
///
/// # Errors
///
/// Returns [`ApiError::Upstream`] for `success: false` and
/// [`ApiError::Parse`] when a successful envelope carries no data.
pub fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
    if !envelope.success {
        let message = envelope
            .error
            .unwrap_or_else(|| "request failed".to_string());
        return Err(match envelope.status_code {
            Some(code) => ApiError::Upstream(format!("{message} (status {code})")),
            None => ApiError::Upstream(message),
        });
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Parse("response has no data".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> RecipeApiClient {
        RecipeApiClient::new(Url::parse(base).unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_query() {
        let url = client("http://127.0.0.1:3000")
            .endpoint(
                FIND_BY_INGREDIENTS_PATH,
                &[("ingredients", "milk,green beans"), ("number", "6")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:3000/api/recipes/findByIngredients?ingredients=milk%2Cgreen+beans&number=6"
        );
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let url = client("https://example.com/refoodify")
            .endpoint(SEARCH_TIPS_PATH, &[("q", "herbs")])
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/refoodify/api/search/tips?q=herbs");
    }

    #[test]
    fn test_unwrap_envelope() {
        let ok = Envelope {
            success: true,
            data: Some(3),
            error: None,
            status_code: None,
        };
        assert_eq!(unwrap_envelope(ok).unwrap(), 3);

        let failed: Envelope<u8> = Envelope {
            success: false,
            data: None,
            error: Some("Spoonacular API error".to_string()),
            status_code: Some(402),
        };
        let err = unwrap_envelope(failed).unwrap_err();
        assert_eq!(
            err.to_string(),
            "upstream error: Spoonacular API error (status 402)"
        );

        let empty: Envelope<u8> = Envelope {
            success: true,
            data: None,
            error: None,
            status_code: None,
        };
        assert!(matches!(unwrap_envelope(empty), Err(ApiError::Parse(_))));
    }
}
