//! Tips commands: browse the catalogue, tip of the day, saved tips and web search.

use std::io::Write;

use rand::Rng;
use refoodify_core::KeyValueStore;
use refoodify_core::tips::{SavedTips, Tip, TipCategory, filter_tips, random_tip};

use super::pantry::write_milestone;
use crate::api::RecipeApiClient;
use crate::error::CliError;

/// Print catalogue tips matching `query` and `category`, marking saved ones.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn list<S: KeyValueStore>(
    saved: &SavedTips<S>,
    query: &str,
    category: Option<TipCategory>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let tips = filter_tips(query, category);
    if tips.is_empty() {
        writeln!(out, "No tips match.")?;
        return Ok(());
    }
    for tip in tips {
        write_tip(tip, saved.contains(tip.id), out)?;
    }
    Ok(())
}

/// Print a random tip of the day.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn random<R: Rng + ?Sized>(rng: &mut R, out: &mut impl Write) -> Result<(), CliError> {
    if let Some(tip) = random_tip(rng) {
        writeln!(out, "Tip of the day ({}): {}", tip.category, tip.text)?;
    }
    Ok(())
}

/// Save or unsave a tip.
///
/// # Errors
///
/// Returns error if the tip does not exist or cannot be saved.
pub fn toggle<S: KeyValueStore>(
    saved: &mut SavedTips<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let toggle = saved.toggle(id.trim())?;
    if toggle.saved {
        writeln!(out, "Saved tip {}.", id.trim())?;
    } else {
        writeln!(out, "Removed tip {} from saved tips.", id.trim())?;
    }
    if let Some(milestone) = toggle.milestone {
        write_milestone(out, ("tip", "tips"), "saved", milestone)?;
    }
    Ok(())
}

/// Print saved tips in catalogue order.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn saved<S: KeyValueStore>(saved: &SavedTips<S>, out: &mut impl Write) -> Result<(), CliError> {
    let tips = saved.tips();
    if tips.is_empty() {
        writeln!(out, "No saved tips yet.")?;
        return Ok(());
    }
    for tip in tips {
        write_tip(tip, true, out)?;
    }
    Ok(())
}

/// Search the web for storage advice through the proxy.
///
/// # Errors
///
/// Returns error if the lookup fails or output cannot be written.
pub async fn search(
    client: &RecipeApiClient,
    query: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if query.trim().is_empty() {
        return Err(CliError::InvalidArgument("search query cannot be empty".to_string()));
    }
    let results = client.search_tips(query).await?;
    if results.items.is_empty() {
        writeln!(out, "No results.")?;
    }
    for item in &results.items {
        writeln!(out, "{}\n    {}\n    {}", item.title, item.link, item.snippet)?;
    }
    Ok(())
}

fn write_tip(tip: &Tip, is_saved: bool, out: &mut impl Write) -> std::io::Result<()> {
    let marker = if is_saved { '*' } else { ' ' };
    writeln!(out, "{marker} {:<3} [{}] {}", tip.id, tip.category, tip.text)
}
