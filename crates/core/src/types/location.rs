//! Where a pantry item is kept.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Storage location of a pantry item.
///
/// Known locations serialize as their display name. Any other label is kept
/// verbatim in [`StorageLocation::Other`] so foreign data survives a load and
/// save unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum StorageLocation {
    #[default]
    Fridge,
    Pantry,
    Freezer,
    Other(String),
}

impl StorageLocation {
    /// Returns the location label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Fridge => "Fridge",
            Self::Pantry => "Pantry",
            Self::Freezer => "Freezer",
            Self::Other(label) => label,
        }
    }

    /// Parse user input, matching known locations case-insensitively.
    ///
    /// Surrounding whitespace is trimmed; anything unrecognised becomes
    /// [`StorageLocation::Other`].
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        let trimmed = input.trim();
        [Self::Fridge, Self::Pantry, Self::Freezer]
            .into_iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .unwrap_or_else(|| Self::Other(trimmed.to_owned()))
    }
}

impl From<String> for StorageLocation {
    /// Exact match only, so persisted labels round-trip byte for byte.
    fn from(value: String) -> Self {
        match value.as_str() {
            "Fridge" => Self::Fridge,
            "Pantry" => Self::Pantry,
            "Freezer" => Self::Freezer,
            _ => Self::Other(value),
        }
    }
}

impl From<StorageLocation> for String {
    fn from(value: StorageLocation) -> Self {
        match value {
            StorageLocation::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for StorageLocation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse_lenient(s))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_known() {
        assert_eq!(StorageLocation::parse_lenient("fridge"), StorageLocation::Fridge);
        assert_eq!(StorageLocation::parse_lenient(" FREEZER "), StorageLocation::Freezer);
        assert_eq!(StorageLocation::parse_lenient("Pantry"), StorageLocation::Pantry);
    }

    #[test]
    fn test_parse_lenient_other() {
        assert_eq!(
            StorageLocation::parse_lenient("Cellar"),
            StorageLocation::Other("Cellar".to_string())
        );
    }

    #[test]
    fn test_serde_known_location() {
        let json = serde_json::to_string(&StorageLocation::Freezer).unwrap();
        assert_eq!(json, "\"Freezer\"");
        let parsed: StorageLocation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, StorageLocation::Freezer);
    }

    #[test]
    fn test_serde_keeps_foreign_label_verbatim() {
        // Lowercase labels are not normalised on load.
        let parsed: StorageLocation = serde_json::from_str("\"fridge\"").unwrap();
        assert_eq!(parsed, StorageLocation::Other("fridge".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"fridge\"");
    }
}
