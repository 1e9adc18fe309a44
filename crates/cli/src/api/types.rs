//! Response types of the recipe and tips proxy.

use serde::{Deserialize, Serialize};

/// Base of the public recipe page links.
const RECIPE_PAGE_BASE: &str = "https://spoonacular.com/recipes";

/// Response envelope shared by every proxy endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub status_code: Option<u16>,
}

/// Failure-only view of the envelope, for error bodies.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: Option<String>,
}

/// Recipe matched against a set of ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeMatch {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub used_ingredient_count: u32,
    #[serde(default)]
    pub missed_ingredient_count: u32,
}

impl RecipeMatch {
    /// Public page of the recipe.
    #[must_use]
    pub fn recipe_url(&self) -> String {
        recipe_url(self.id, &self.title)
    }
}

/// Recipe returned by a free-text search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl RecipeSummary {
    #[must_use]
    pub fn recipe_url(&self) -> String {
        recipe_url(self.id, &self.title)
    }
}

/// Page of free-text search results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeSearch {
    #[serde(default)]
    pub results: Vec<RecipeSummary>,
    #[serde(default)]
    pub total_results: u64,
}

/// Full recipe information. Only the fields the CLI shows are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDetails {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub ready_in_minutes: Option<u32>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// HTML summary as returned upstream.
    #[serde(default)]
    pub summary: Option<String>,
}

/// Web search hits for a food-storage question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipSearch {
    #[serde(default)]
    pub items: Vec<TipLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipLink {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

/// Public recipe page: title words joined by `-`, then the id.
///
/// ```
/// use refoodify_cli::api::recipe_url;
///
/// assert_eq!(
///     recipe_url(715_538, "Bruschetta  Style Pork"),
///     "https://spoonacular.com/recipes/Bruschetta-Style-Pork-715538"
/// );
/// ```
#[must_use]
pub fn recipe_url(id: u64, title: &str) -> String {
    let slug = title.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{RECIPE_PAGE_BASE}/{slug}-{id}")
}
