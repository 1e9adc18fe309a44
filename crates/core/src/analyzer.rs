//! Ingredient analyzer: free-text ingredients in, categories and waste risk out.

use core::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Separators between ingredients: commas, newlines, or two or more spaces.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\n]+|\s{2,}").expect("Invalid regex"));

/// Risk points added per ingredient.
pub const RISK_PER_INGREDIENT: usize = 8;

/// Most local recipes shown at once.
pub const MAX_LOCAL_RECIPES: usize = 4;

/// Food group of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IngredientCategory {
    Vegetables,
    Fruits,
    Dairy,
    Pantry,
}

impl IngredientCategory {
    pub const ALL: [Self; 4] = [Self::Vegetables, Self::Fruits, Self::Dairy, Self::Pantry];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vegetables => "Vegetables",
            Self::Fruits => "Fruits",
            Self::Dairy => "Dairy",
            Self::Pantry => "Pantry",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for IngredientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid ingredient category: {s}"))
    }
}

/// Keyword rules, checked in order; the first match wins.
const CATEGORY_KEYWORDS: [(IngredientCategory, &[&str]); 3] = [
    (
        IngredientCategory::Vegetables,
        &[
            "tomato", "carrot", "onion", "lettuce", "spinach", "pepper", "cucumber", "broccoli",
        ],
    ),
    (
        IngredientCategory::Fruits,
        &[
            "banana", "apple", "orange", "lemon", "berry", "grape", "mango", "pineapple",
        ],
    ),
    (
        IngredientCategory::Dairy,
        &["milk", "cheese", "yogurt", "butter", "cream"],
    ),
];

/// Guess the food group of an ingredient name. Defaults to `Pantry`.
#[must_use]
pub fn detect_category(name: &str) -> IngredientCategory {
    let lower = name.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or(IngredientCategory::Pantry, |(category, _)| *category)
}

/// An entered ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub category: IngredientCategory,
}

impl Ingredient {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            category: detect_category(name),
        }
    }
}

/// Split free text into ingredients.
///
/// ```
/// use refoodify_core::analyzer::{IngredientCategory, parse_ingredients};
///
/// let parsed = parse_ingredients("milk, tomato\nrice   beans");
/// let names: Vec<_> = parsed.iter().map(|i| i.name.as_str()).collect();
/// assert_eq!(names, ["milk", "tomato", "rice", "beans"]);
/// assert_eq!(parsed[0].category, IngredientCategory::Dairy);
/// ```
#[must_use]
pub fn parse_ingredients(query: &str) -> Vec<Ingredient> {
    SEPARATOR_RE
        .split(query.trim())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Ingredient::new)
        .collect()
}

/// Ingredients in `category`, or all of them when `category` is `None`.
#[must_use]
pub fn filter_by_category(
    ingredients: &[Ingredient],
    category: Option<IngredientCategory>,
) -> Vec<&Ingredient> {
    ingredients
        .iter()
        .filter(|ingredient| category.is_none_or(|category| ingredient.category == category))
        .collect()
}

/// Waste risk score (0-100) for a number of ingredients on hand.
#[must_use]
pub fn waste_risk(ingredient_count: usize) -> u8 {
    let score = ingredient_count.saturating_mul(RISK_PER_INGREDIENT).min(100);
    u8::try_from(score).unwrap_or(100)
}

/// What to do about the current ingredients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SuggestedAction {
    UseImmediately,
    DonateSoon,
    Monitor,
}

impl SuggestedAction {
    /// Above 60 use immediately, above 30 donate soon, otherwise monitor.
    #[must_use]
    pub const fn from_risk(risk: u8) -> Self {
        if risk > 60 {
            Self::UseImmediately
        } else if risk > 30 {
            Self::DonateSoon
        } else {
            Self::Monitor
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UseImmediately => "Use immediately",
            Self::DonateSoon => "Donate soon",
            Self::Monitor => "Monitor",
        }
    }
}

impl fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recipe card that needs no network lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocalRecipe {
    pub name: &'static str,
    pub uses: &'static [&'static str],
}

pub const LOCAL_RECIPES: [LocalRecipe; 5] = [
    LocalRecipe {
        name: "Tomato Pasta",
        uses: &["tomato", "pasta"],
    },
    LocalRecipe {
        name: "Veggie Stir-Fry",
        uses: &["carrot", "onion", "pepper"],
    },
    LocalRecipe {
        name: "Fruit Smoothie",
        uses: &["banana", "yogurt"],
    },
    LocalRecipe {
        name: "Herb Omelette",
        uses: &["egg", "herbs"],
    },
    LocalRecipe {
        name: "Rice Bowl",
        uses: &["rice", "beans", "spinach"],
    },
];

/// Local recipes using at least one entered ingredient (exact name,
/// case-insensitive). With no ingredients every recipe qualifies. At most
/// [`MAX_LOCAL_RECIPES`] are returned.
#[must_use]
pub fn matching_recipes(ingredients: &[Ingredient]) -> Vec<&'static LocalRecipe> {
    let names: Vec<String> = ingredients.iter().map(|i| i.name.to_lowercase()).collect();
    LOCAL_RECIPES
        .iter()
        .filter(|recipe| {
            names.is_empty() || recipe.uses.iter().any(|used| names.iter().any(|n| n == used))
        })
        .take(MAX_LOCAL_RECIPES)
        .collect()
}

/// Everything the analyzer reports for a set of ingredients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub ingredients: Vec<Ingredient>,
    pub risk: u8,
    pub action: SuggestedAction,
    pub recipes: Vec<&'static LocalRecipe>,
}

impl Analysis {
    #[must_use]
    pub fn new(ingredients: Vec<Ingredient>) -> Self {
        let risk = waste_risk(ingredients.len());
        let recipes = matching_recipes(&ingredients);
        Self {
            action: SuggestedAction::from_risk(risk),
            risk,
            recipes,
            ingredients,
        }
    }
}

/// Parse `query` and analyze the resulting ingredients.
#[must_use]
pub fn analyze(query: &str) -> Analysis {
    Analysis::new(parse_ingredients(query))
}
