//! Keyword-based recipe suggestions for items about to expire.

/// Ingredient keyword to recipe ideas, matched in this order.
const RECIPE_TABLE: &[(&str, &[&str])] = &[
    (
        "milk",
        &["Creamy rice pudding", "Quick pancakes", "Smoothie with spinach"],
    ),
    (
        "spinach",
        &["Garlic sautéed spinach", "Green omelette", "Spinach smoothie"],
    ),
    (
        "tomato",
        &["Tomato bruschetta", "Quick pasta arrabbiata", "Tomato soup"],
    ),
    ("bread", &["French toast", "Bread pudding", "Garlic croutons"]),
    (
        "banana",
        &["Banana bread", "Frozen banana pops", "Banana pancakes"],
    ),
];

/// Suggestions used when no keyword matches.
pub const FALLBACK_RECIPES: [&str; 4] = [
    "Fried rice with leftovers",
    "Veggie stir-fry",
    "Hearty soup with mixed veg",
    "Omelette with chopped veggies",
];

/// Suggest recipes for a set of item names.
///
/// Each name is lowercased and checked for every keyword as a substring, so
/// "Whole Milk" matches `milk`. Results keep first-seen order with duplicates
/// removed. When nothing matches, [`FALLBACK_RECIPES`] is returned.
///
/// ```
/// use refoodify_core::pantry::suggest_recipes;
///
/// assert!(suggest_recipes(&["Whole Milk"]).contains(&"Creamy rice pudding"));
/// assert_eq!(suggest_recipes(&["Quinoa"]).len(), 4);
/// ```
#[must_use]
pub fn suggest_recipes<S: AsRef<str>>(names: &[S]) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();

    for name in names {
        let lower = name.as_ref().to_lowercase();
        for (keyword, recipes) in RECIPE_TABLE {
            if !lower.contains(keyword) {
                continue;
            }
            for &recipe in *recipes {
                if !out.contains(&recipe) {
                    out.push(recipe);
                }
            }
        }
    }

    if out.is_empty() {
        return FALLBACK_RECIPES.to_vec();
    }
    out
}
