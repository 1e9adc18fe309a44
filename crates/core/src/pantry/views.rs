//! Read-only views derived from the pantry on every read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::types::{PantryItem, Status};

use super::recipes::suggest_recipes;

/// Estimated CO₂ saved per item eaten instead of thrown away (0.5 kg).
pub const CO2_PER_ITEM_KG: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Most recipe suggestions shown for expiring items.
pub const MAX_RECIPE_SUGGESTIONS: usize = 5;

/// A pantry item with its status recomputed for a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedItem<'a> {
    /// Position of the item in the store.
    pub index: usize,
    pub item: &'a PantryItem,
    pub days_remaining: i64,
    pub status: Status,
}

impl<'a> TrackedItem<'a> {
    #[must_use]
    pub fn new(index: usize, item: &'a PantryItem, today: NaiveDate) -> Self {
        let days_remaining = item.days_remaining(today);
        Self {
            index,
            item,
            days_remaining,
            status: Status::from_days_remaining(days_remaining),
        }
    }

    /// Status badge, e.g. `Urgent • 2d`. Days are omitted once expired.
    #[must_use]
    pub fn badge(&self) -> String {
        if self.days_remaining > 0 {
            format!("{} • {}d", self.status, self.days_remaining)
        } else {
            self.status.to_string()
        }
    }
}

/// Aggregate food-waste counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImpactSummary {
    /// Items marked used.
    pub saved_count: usize,
    /// Unused items past their expiry date.
    pub expired_count: usize,
    /// `saved_count` × [`CO2_PER_ITEM_KG`], one decimal place.
    pub co2_saved_kg: Decimal,
}

impl ImpactSummary {
    /// CO₂ figure formatted for display, e.g. `1.5 kg`.
    #[must_use]
    pub fn co2_display(&self) -> String {
        format!("{:.1} kg", self.co2_saved_kg)
    }
}

/// Freshness status of `item` as of `today`.
#[must_use]
pub fn compute_status(item: &PantryItem, today: NaiveDate) -> Status {
    item.status(today)
}

/// Status and days remaining for every item, in store order.
#[must_use]
pub fn recompute(items: &[PantryItem], today: NaiveDate) -> Vec<TrackedItem<'_>> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| TrackedItem::new(index, item, today))
        .collect()
}

/// Items with status `Soon` or `Urgent`, fewest days first.
///
/// Items with equal days keep their store order.
#[must_use]
pub fn expiring_soon(items: &[PantryItem], today: NaiveDate) -> Vec<TrackedItem<'_>> {
    let mut soon: Vec<_> = recompute(items, today)
        .into_iter()
        .filter(|tracked| tracked.status.is_expiring())
        .collect();
    soon.sort_by_key(|tracked| tracked.days_remaining);
    soon
}

/// Recipe ideas for the items about to expire, at most
/// [`MAX_RECIPE_SUGGESTIONS`].
#[must_use]
pub fn recipe_suggestions(items: &[PantryItem], today: NaiveDate) -> Vec<&'static str> {
    let names: Vec<&str> = recompute(items, today)
        .into_iter()
        .filter(|tracked| tracked.status.is_expiring())
        .map(|tracked| tracked.item.name())
        .collect();

    let mut suggestions = suggest_recipes(&names);
    suggestions.truncate(MAX_RECIPE_SUGGESTIONS);
    suggestions
}

/// Saved / expired counters and the CO₂ estimate.
#[must_use]
pub fn impact_summary(items: &[PantryItem], today: NaiveDate) -> ImpactSummary {
    let saved_count = items.iter().filter(|item| item.is_used()).count();
    let expired_count = items
        .iter()
        .filter(|item| !item.is_used() && item.status(today) == Status::Expired)
        .count();
    let co2_saved_kg = (Decimal::from(saved_count) * CO2_PER_ITEM_KG).round_dp(1);

    ImpactSummary {
        saved_count,
        expired_count,
        co2_saved_kg,
    }
}
