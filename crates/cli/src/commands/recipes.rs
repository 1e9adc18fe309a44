//! Recipe lookups through the proxy.

use std::io::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::api::{RecipeApiClient, RecipeDetails, RecipeMatch, RecipeSearch};
use crate::error::CliError;

static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

/// Find recipes for `ingredients` and print them.
///
/// Lookup failures are logged and reported as "no recipes".
///
/// # Errors
///
/// Returns error if output cannot be written.
pub async fn find(
    client: &RecipeApiClient,
    ingredients: &[String],
    number: u8,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if ingredients.iter().all(|i| i.trim().is_empty()) {
        return Err(CliError::InvalidArgument(
            "give at least one ingredient, or add items that are expiring soon".to_string(),
        ));
    }

    let recipes = client.find_by_ingredients_or_empty(ingredients, number).await;
    write_matches(&recipes, out)?;
    Ok(())
}

/// Free-text recipe search.
///
/// # Errors
///
/// Returns error if the lookup fails or output cannot be written.
pub async fn search(
    client: &RecipeApiClient,
    query: &str,
    number: u8,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if query.trim().is_empty() {
        return Err(CliError::InvalidArgument("search query cannot be empty".to_string()));
    }
    let results = client.search_recipes(query, number).await?;
    write_search(&results, out)?;
    Ok(())
}

/// Show one recipe.
///
/// # Errors
///
/// Returns error if the lookup fails or output cannot be written.
pub async fn details(
    client: &RecipeApiClient,
    recipe_id: u64,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let recipe = client.recipe_details(recipe_id).await?;
    write_details(&recipe, out)?;
    Ok(())
}

pub fn write_matches(recipes: &[RecipeMatch], out: &mut impl Write) -> std::io::Result<()> {
    if recipes.is_empty() {
        return writeln!(out, "No recipes found.");
    }
    for recipe in recipes {
        writeln!(
            out,
            "{} (uses {}, missing {})\n    {}",
            recipe.title,
            recipe.used_ingredient_count,
            recipe.missed_ingredient_count,
            recipe.recipe_url()
        )?;
    }
    Ok(())
}

pub fn write_search(results: &RecipeSearch, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(
        out,
        "Showing {} of {} recipes",
        results.results.len(),
        results.total_results
    )?;
    for recipe in &results.results {
        writeln!(out, "[{}] {}\n    {}", recipe.id, recipe.title, recipe.recipe_url())?;
    }
    Ok(())
}

pub fn write_details(recipe: &RecipeDetails, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{} [{}]", recipe.title, recipe.id)?;
    if let Some(minutes) = recipe.ready_in_minutes {
        writeln!(out, "Ready in: {minutes} min")?;
    }
    if let Some(servings) = recipe.servings {
        writeln!(out, "Servings: {servings}")?;
    }
    if let Some(source) = &recipe.source_url {
        writeln!(out, "Source:   {source}")?;
    }
    if let Some(summary) = &recipe.summary {
        writeln!(out, "\n{}", strip_html(summary))?;
    }
    Ok(())
}

/// Drop HTML tags from an upstream summary.
fn strip_html(html: &str) -> String {
    HTML_TAG_RE.replace_all(html, "").trim().to_string()
}
