//! Ingredient analyzer command.

use std::io::Write;

use refoodify_core::analyzer::{Analysis, IngredientCategory, analyze, filter_by_category};

use crate::error::CliError;

/// Analyze free-text ingredients and print the report.
///
/// # Errors
///
/// Returns error if no ingredients were given or output cannot be written.
pub fn run(
    query: &str,
    category: Option<IngredientCategory>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let analysis = analyze(query);
    if analysis.ingredients.is_empty() {
        return Err(CliError::InvalidArgument(
            "enter ingredients separated by commas or new lines".to_string(),
        ));
    }
    write_analysis(&analysis, category, out)?;
    Ok(())
}

fn write_analysis(
    analysis: &Analysis,
    category: Option<IngredientCategory>,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "Ingredients:")?;
    for ingredient in filter_by_category(&analysis.ingredients, category) {
        writeln!(out, "  {:<20} {}", ingredient.name, ingredient.category)?;
    }
    writeln!(out, "Waste risk: {}%", analysis.risk)?;
    writeln!(out, "Suggested action: {}", analysis.action)?;
    if !analysis.recipes.is_empty() {
        writeln!(out, "Recipes:")?;
        for recipe in &analysis.recipes {
            writeln!(out, "  {} (uses {})", recipe.name, recipe.uses.join(", "))?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_report() {
        let mut out = Vec::new();
        run("banana, yogurt", None, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("banana"));
        assert!(text.contains("Waste risk: 16%"));
        assert!(text.contains("Suggested action: Monitor"));
        assert!(text.contains("Fruit Smoothie (uses banana, yogurt)"));
    }

    #[test]
    fn test_category_filter_limits_listing_only() {
        let mut out = Vec::new();
        run("milk, tomato", Some(IngredientCategory::Dairy), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("milk"));
        assert!(!text.contains("  tomato"));
        assert!(text.contains("Waste risk: 16%"));
    }

    #[test]
    fn test_empty_input() {
        let mut out = Vec::new();
        assert!(matches!(
            run(" , ", None, &mut out),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
