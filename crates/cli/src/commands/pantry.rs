//! Pantry commands: add, list, remove, use, and the derived views.
//!
//! Items are addressed by their 1-based position in `pantry list`.

use std::io::Write;

use refoodify_core::{
    Clock, KeyValueStore, Milestone, PantryError, PantryItem, PantryStore, StorageLocation,
};

use crate::error::CliError;

/// Add an item and print its status.
///
/// # Errors
///
/// Returns error if the item is invalid or cannot be saved.
pub fn add<S: KeyValueStore, C: Clock>(
    store: &mut PantryStore<S, C>,
    name: &str,
    quantity: &str,
    expiry: &str,
    location: &str,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let index = store.add(
        name,
        quantity,
        expiry,
        StorageLocation::parse_lenient(location),
    )?;
    let tracked = store
        .recompute()
        .into_iter()
        .nth(index)
        .ok_or(PantryError::IndexOutOfRange {
            index,
            len: store.len(),
        })?;

    writeln!(
        out,
        "Added #{} {} ({}), expires {} [{}]",
        index + 1,
        tracked.item.name(),
        tracked.item.quantity(),
        tracked.item.expiry_date(),
        tracked.badge()
    )?;
    Ok(())
}

/// Print every item with its status. Used items are hidden unless `all`.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn list<S: KeyValueStore, C: Clock>(
    store: &PantryStore<S, C>,
    all: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let tracked = store.recompute();
    let visible: Vec<_> = tracked
        .iter()
        .filter(|t| all || !t.item.is_used())
        .collect();

    if visible.is_empty() {
        writeln!(out, "Your pantry is empty.")?;
        return Ok(());
    }

    for t in visible {
        let used = if t.item.is_used() { "  (used)" } else { "" };
        writeln!(
            out,
            "{:>3}. {:<20} {:<10} {:<8} {} [{}]{used}",
            t.index + 1,
            t.item.name(),
            t.item.quantity(),
            t.item.storage_location(),
            t.item.expiry_date(),
            t.badge()
        )?;
    }
    Ok(())
}

/// Remove the item at 1-based position `number`.
///
/// # Errors
///
/// Returns error if there is no such item or the pantry cannot be saved.
pub fn remove<S: KeyValueStore, C: Clock>(
    store: &mut PantryStore<S, C>,
    number: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let index = item_index(number)?;
    let removed = store.remove(index).map_err(|e| position_error(e, number))?;
    writeln!(out, "Removed {}.", removed.name())?;
    Ok(())
}

/// Mark the item at 1-based position `number` as used.
///
/// # Errors
///
/// Returns error if there is no such item or the pantry cannot be saved.
pub fn mark_used<S: KeyValueStore, C: Clock>(
    store: &mut PantryStore<S, C>,
    number: usize,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let index = item_index(number)?;
    let was_used = store.get(index).is_some_and(PantryItem::is_used);
    let milestone = store
        .mark_used(index)
        .map_err(|e| position_error(e, number))?;

    let name = store.get(index).map_or("", |item| item.name());
    if was_used {
        writeln!(out, "{name} was already marked as used.")?;
    } else {
        writeln!(out, "Marked {name} as used. Nice save!")?;
    }
    if let Some(milestone) = milestone {
        write_milestone(out, ("item", "items"), "saved from waste", milestone)?;
    }
    Ok(())
}

/// Print items that are `Soon` or `Urgent`, fewest days first.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn expiring_soon<S: KeyValueStore, C: Clock>(
    store: &PantryStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let expiring = store.expiring_soon();
    if expiring.is_empty() {
        writeln!(out, "Nothing is about to expire.")?;
        return Ok(());
    }
    for t in expiring {
        writeln!(
            out,
            "{:>3}. {} ({}) [{}]",
            t.index + 1,
            t.item.name(),
            t.item.quantity(),
            t.badge()
        )?;
    }
    Ok(())
}

/// Print the food-waste impact counters.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn impact<S: KeyValueStore, C: Clock>(
    store: &PantryStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let summary = store.impact_summary();
    writeln!(out, "Items saved:   {}", summary.saved_count)?;
    writeln!(out, "Items expired: {}", summary.expired_count)?;
    writeln!(out, "CO2 saved:     {}", summary.co2_display())?;
    Ok(())
}

/// Print local recipe ideas for the items about to expire.
///
/// # Errors
///
/// Returns error if output cannot be written.
pub fn suggest<S: KeyValueStore, C: Clock>(
    store: &PantryStore<S, C>,
    out: &mut impl Write,
) -> Result<(), CliError> {
    for recipe in store.recipe_suggestions() {
        writeln!(out, "- {recipe}")?;
    }
    Ok(())
}

/// `(one, many)` are the singular and plural names of the counted thing.
pub(crate) fn write_milestone(
    out: &mut impl Write,
    (one, many): (&str, &str),
    what: &str,
    milestone: Milestone,
) -> std::io::Result<()> {
    let count = milestone.count();
    let noun = if count == 1 { one } else { many };
    writeln!(out, "Milestone: {count} {noun} {what} ({milestone})!")
}

/// Convert a 1-based item number to a pantry index.
fn item_index(number: usize) -> Result<usize, CliError> {
    number
        .checked_sub(1)
        .ok_or_else(|| CliError::InvalidArgument("item number must be at least 1".to_string()))
}

/// Report out-of-range positions with the number the user typed.
fn position_error(err: PantryError, number: usize) -> CliError {
    match err {
        PantryError::IndexOutOfRange { len, .. } => {
            CliError::InvalidArgument(format!("no item #{number} (pantry has {len} items)"))
        }
        other => other.into(),
    }
}
