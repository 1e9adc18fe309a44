//! Pantry store: the authoritative list of tracked food items.
//!
//! The store owns the ordered item sequence and its serialized form under
//! [`PANTRY_KEY`]. Every mutation rewrites the whole collection, and the
//! in-memory list only changes once that write has succeeded.

mod recipes;
mod views;

use chrono::NaiveDate;
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::milestone::Milestone;
use crate::storage::{KeyValueStore, PANTRY_KEY, StorageError, load_json_or_default, save_json};
use crate::types::{ItemError, PantryItem, StorageLocation};

pub use recipes::{FALLBACK_RECIPES, suggest_recipes};
pub use views::{
    CO2_PER_ITEM_KG, ImpactSummary, MAX_RECIPE_SUGGESTIONS, TrackedItem, compute_status,
    expiring_soon, impact_summary, recipe_suggestions, recompute,
};

/// Errors that can occur when changing the pantry.
#[derive(Debug, Error)]
pub enum PantryError {
    /// The new item failed validation.
    #[error("invalid item: {0}")]
    Invalid(#[from] ItemError),

    /// No item exists at the requested position.
    #[error("no pantry item at position {index} (pantry has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The pantry could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Read the persisted pantry.
///
/// Missing or corrupt state yields an empty pantry. Records that parse but
/// fail item validation are skipped one by one, so their valid siblings
/// survive the next write.
pub fn load(storage: &impl KeyValueStore) -> Vec<PantryItem> {
    let records: Vec<serde_json::Value> = load_json_or_default(storage, PANTRY_KEY);
    records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            serde_json::from_value(record)
                .inspect_err(|e| {
                    tracing::warn!(index, error = %e, "Skipping invalid pantry item");
                })
                .ok()
        })
        .collect()
}

/// Overwrite the persisted pantry with `items`.
///
/// # Errors
///
/// Returns an error if the items cannot be serialized or written.
pub fn save(storage: &mut impl KeyValueStore, items: &[PantryItem]) -> Result<(), StorageError> {
    save_json(storage, PANTRY_KEY, items)
}

/// The pantry of a single session.
///
/// ## Examples
///
/// ```
/// use refoodify_core::{MemoryStorage, Milestone, PantryStore, StorageLocation};
///
/// let mut pantry = PantryStore::open(MemoryStorage::new());
/// let index = pantry.add("Milk", "1 L", "2099-01-01", StorageLocation::Fridge).unwrap();
/// assert_eq!(pantry.mark_used(index).unwrap(), Some(Milestone::FirstItem));
/// assert_eq!(pantry.impact_summary().saved_count, 1);
/// ```
#[derive(Debug)]
pub struct PantryStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    items: Vec<PantryItem>,
}

impl<S: KeyValueStore> PantryStore<S> {
    /// Open the pantry persisted in `storage`, using the system clock.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> PantryStore<S, C> {
    /// Open the pantry persisted in `storage` with an explicit clock.
    pub fn with_clock(storage: S, clock: C) -> Self {
        let items = load(&storage);
        tracing::debug!(count = items.len(), "Pantry loaded");
        Self {
            storage,
            clock,
            items,
        }
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[PantryItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PantryItem> {
        self.items.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items marked used.
    #[must_use]
    pub fn used_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_used()).count()
    }

    /// Today's date according to the store's clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the store, returning its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the pantry as currently persisted, bypassing the in-memory copy.
    #[must_use]
    pub fn load(&self) -> Vec<PantryItem> {
        load(&self.storage)
    }

    /// Replace the in-memory copy with the persisted pantry.
    pub fn reload(&mut self) {
        self.items = load(&self.storage);
    }

    /// Replace the whole pantry with `items` and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the store is left unchanged.
    pub fn save(&mut self, items: Vec<PantryItem>) -> Result<(), StorageError> {
        self.commit(items)
    }

    /// Append a new, unused item and persist the pantry.
    ///
    /// Returns the index of the new item.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::Invalid`] when `name`, `quantity` or `expiry`
    /// is blank or the date does not parse; nothing is written in that case.
    pub fn add(
        &mut self,
        name: &str,
        quantity: &str,
        expiry: &str,
        storage_location: StorageLocation,
    ) -> Result<usize, PantryError> {
        let item = PantryItem::new(name, quantity, expiry, storage_location, self.clock.now())?;
        tracing::info!(
            name = item.name(),
            expiry = %item.expiry_date(),
            storage = %item.storage_location(),
            "Adding pantry item"
        );

        let mut next = self.items.clone();
        next.push(item);
        self.commit(next)?;
        Ok(self.items.len() - 1)
    }

    /// Delete the item at `index` and persist the pantry.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::IndexOutOfRange`] when there is no such item,
    /// or a storage error if the write fails.
    pub fn remove(&mut self, index: usize) -> Result<PantryItem, PantryError> {
        let len = self.items.len();
        if index >= len {
            return Err(PantryError::IndexOutOfRange { index, len });
        }

        let mut next = self.items.clone();
        let removed = next.remove(index);
        self.commit(next)?;
        tracing::info!(name = removed.name(), index, "Removed pantry item");
        Ok(removed)
    }

    /// Mark the item at `index` as used and persist the pantry.
    ///
    /// Returns a [`Milestone`] when the number of used items becomes 1 or a
    /// multiple of 10. Marking an item that is already used changes nothing
    /// and never reports a milestone.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::IndexOutOfRange`] when there is no such item,
    /// or a storage error if the write fails.
    pub fn mark_used(&mut self, index: usize) -> Result<Option<Milestone>, PantryError> {
        let now = self.clock.now();
        let mut next = self.items.clone();
        let len = next.len();
        let item = next
            .get_mut(index)
            .ok_or(PantryError::IndexOutOfRange { index, len })?;

        if !item.mark_used(now) {
            tracing::debug!(name = item.name(), index, "Pantry item already used");
            return Ok(None);
        }

        self.commit(next)?;
        let used_count = self.used_count();
        let milestone = Milestone::check(used_count);
        tracing::info!(index, used_count, ?milestone, "Marked pantry item used");
        Ok(milestone)
    }

    /// Every item with its status as of today.
    #[must_use]
    pub fn recompute(&self) -> Vec<TrackedItem<'_>> {
        recompute(&self.items, self.today())
    }

    /// `Soon` and `Urgent` items, fewest days first.
    #[must_use]
    pub fn expiring_soon(&self) -> Vec<TrackedItem<'_>> {
        expiring_soon(&self.items, self.today())
    }

    /// Recipe ideas for the items about to expire.
    #[must_use]
    pub fn recipe_suggestions(&self) -> Vec<&'static str> {
        recipe_suggestions(&self.items, self.today())
    }

    #[must_use]
    pub fn impact_summary(&self) -> ImpactSummary {
        impact_summary(&self.items, self.today())
    }

    fn commit(&mut self, next: Vec<PantryItem>) -> Result<(), StorageError> {
        save(&mut self.storage, &next)?;
        self.items = next;
        Ok(())
    }
}
