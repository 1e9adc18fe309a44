//! Food-waste tips catalogue and the user's saved tips.

use core::fmt;

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;
use thiserror::Error;

use crate::milestone::Milestone;
use crate::storage::{KeyValueStore, SAVED_TIPS_KEY, StorageError, load_json_or_default, save_json};

/// Tip category, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TipCategory {
    StorageTips,
    ZeroWasteHacks,
    NearExpiryTips,
    IngredientSpecificTips,
    BeginnerTips,
    BudgetFriendlyTips,
}

impl TipCategory {
    /// All categories in display order.
    pub const ALL: [Self; 6] = [
        Self::StorageTips,
        Self::ZeroWasteHacks,
        Self::NearExpiryTips,
        Self::IngredientSpecificTips,
        Self::BeginnerTips,
        Self::BudgetFriendlyTips,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StorageTips => "Storage Tips",
            Self::ZeroWasteHacks => "Zero-Waste Hacks",
            Self::NearExpiryTips => "Near-Expiry Tips",
            Self::IngredientSpecificTips => "Ingredient-Specific Tips",
            Self::BeginnerTips => "Beginner Tips",
            Self::BudgetFriendlyTips => "Budget-Friendly Tips",
        }
    }
}

impl fmt::Display for TipCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TipCategory {
    type Err = String;

    /// Accepts the display name in any case, with hyphens, underscores or
    /// spaces between words (`zero-waste-hacks`, `Zero-Waste Hacks`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_category(s);
        Self::ALL
            .into_iter()
            .find(|category| normalize_category(category.as_str()) == wanted)
            .ok_or_else(|| format!("invalid tip category: {s}"))
    }
}

fn normalize_category(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// A single tip from the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tip {
    pub id: &'static str,
    pub category: TipCategory,
    pub text: &'static str,
}

/// The fixed tips catalogue.
pub const TIPS: [Tip; 9] = [
    Tip {
        id: "t1",
        category: TipCategory::StorageTips,
        text: "Store carrots submerged in water in the fridge to keep them crisp for weeks.",
    },
    Tip {
        id: "t2",
        category: TipCategory::ZeroWasteHacks,
        text: "Use vegetable scraps to make a rich homemade stock.",
    },
    Tip {
        id: "t3",
        category: TipCategory::NearExpiryTips,
        text: "Turn near-expiry yogurt into smoothies or frozen pops.",
    },
    Tip {
        id: "t4",
        category: TipCategory::IngredientSpecificTips,
        text: "Keep herbs fresh by storing them upright in a jar of water like a bouquet.",
    },
    Tip {
        id: "t5",
        category: TipCategory::BeginnerTips,
        text: "Plan meals for the week and shop with a list to avoid waste.",
    },
    Tip {
        id: "t6",
        category: TipCategory::BudgetFriendlyTips,
        text: "Freeze leftover cooked rice in portions to reduce waste and save time.",
    },
    Tip {
        id: "t7",
        category: TipCategory::StorageTips,
        text: "Keep bread in a cool, dry place; freeze slices to extend shelf life.",
    },
    Tip {
        id: "t8",
        category: TipCategory::ZeroWasteHacks,
        text: "Regrow green onions by placing roots in a jar of water.",
    },
    Tip {
        id: "t9",
        category: TipCategory::NearExpiryTips,
        text: "Make a quick pickle with near-expiry cucumbers, vinegar, salt, and sugar.",
    },
];

/// Look up a tip by id.
#[must_use]
pub fn find_tip(id: &str) -> Option<&'static Tip> {
    TIPS.iter().find(|tip| tip.id == id)
}

/// Tips whose text contains `query` (case-insensitive) and, when given,
/// belong to `category`. An empty query matches everything.
#[must_use]
pub fn filter_tips(query: &str, category: Option<TipCategory>) -> Vec<&'static Tip> {
    let query = query.trim().to_lowercase();
    TIPS.iter()
        .filter(|tip| query.is_empty() || tip.text.to_lowercase().contains(&query))
        .filter(|tip| category.is_none_or(|category| tip.category == category))
        .collect()
}

/// Pick a tip of the day.
pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> Option<&'static Tip> {
    TIPS.choose(rng)
}

/// Errors that can occur when changing saved tips.
#[derive(Debug, Error)]
pub enum TipsError {
    /// No tip with this id exists in the catalogue.
    #[error("unknown tip: {0}")]
    UnknownTip(String),

    /// Saved tips could not be persisted.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result of toggling a saved tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipToggle {
    /// Whether the tip is saved after the toggle.
    pub saved: bool,
    /// Reported only when a tip was added.
    pub milestone: Option<Milestone>,
}

/// Tip ids the user has saved, persisted under [`SAVED_TIPS_KEY`].
#[derive(Debug)]
pub struct SavedTips<S> {
    storage: S,
    ids: Vec<String>,
}

impl<S: KeyValueStore> SavedTips<S> {
    /// Load saved tips from `storage`. Corrupt state yields an empty list.
    pub fn open(storage: S) -> Self {
        let ids = load_json_or_default(&storage, SAVED_TIPS_KEY);
        Self { storage, ids }
    }

    /// Saved ids in the order they were saved.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|saved| saved == id)
    }

    /// Saved tips in catalogue order.
    #[must_use]
    pub fn tips(&self) -> Vec<&'static Tip> {
        TIPS.iter().filter(|tip| self.contains(tip.id)).collect()
    }

    /// Save the tip if it is not saved yet, otherwise unsave it.
    ///
    /// Saving reports a [`Milestone`] when the saved count becomes 1 or a
    /// multiple of 10; unsaving never does.
    ///
    /// # Errors
    ///
    /// Returns [`TipsError::UnknownTip`] for ids outside the catalogue, or a
    /// storage error if the write fails (saved tips are then unchanged).
    pub fn toggle(&mut self, id: &str) -> Result<TipToggle, TipsError> {
        let tip = find_tip(id).ok_or_else(|| TipsError::UnknownTip(id.to_owned()))?;

        let mut next = self.ids.clone();
        let saved = if let Some(pos) = next.iter().position(|saved| saved == tip.id) {
            next.remove(pos);
            false
        } else {
            next.push(tip.id.to_owned());
            true
        };

        save_json(&mut self.storage, SAVED_TIPS_KEY, &next)?;
        self.ids = next;

        let milestone = if saved {
            Milestone::check(self.ids.len())
        } else {
            None
        };
        tracing::info!(id = tip.id, saved, ?milestone, "Toggled saved tip");
        Ok(TipToggle { saved, milestone })
    }

    /// Consume the saved tips, returning their storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_catalogue_ids_unique() {
        for tip in &TIPS {
            assert_eq!(TIPS.iter().filter(|t| t.id == tip.id).count(), 1);
        }
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            "zero-waste-hacks".parse::<TipCategory>().unwrap(),
            TipCategory::ZeroWasteHacks
        );
        assert_eq!(
            "Near-Expiry Tips".parse::<TipCategory>().unwrap(),
            TipCategory::NearExpiryTips
        );
        assert_eq!(
            "budget_friendly_tips".parse::<TipCategory>().unwrap(),
            TipCategory::BudgetFriendlyTips
        );
        assert!("gardening".parse::<TipCategory>().is_err());
    }

    #[test]
    fn test_filter_by_query() {
        let ids: Vec<_> = filter_tips("JAR", None).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t4", "t8"]);
    }

    #[test]
    fn test_filter_by_category() {
        let ids: Vec<_> = filter_tips("", Some(TipCategory::StorageTips))
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["t1", "t7"]);
    }

    #[test]
    fn test_filter_by_query_and_category() {
        let tips = filter_tips("freeze", Some(TipCategory::StorageTips));
        assert_eq!(tips.len(), 1);
        assert_eq!(tips.first().unwrap().id, "t7");
    }

    #[test]
    fn test_filter_empty_query_matches_all() {
        assert_eq!(filter_tips("  ", None).len(), TIPS.len());
    }

    #[test]
    fn test_random_tip_is_from_catalogue() {
        let mut rng = StdRng::seed_from_u64(7);
        let tip = random_tip(&mut rng).unwrap();
        assert!(find_tip(tip.id).is_some());
    }

    #[test]
    fn test_toggle_saves_and_unsaves() {
        let mut saved = SavedTips::open(MemoryStorage::new());

        let first = saved.toggle("t3").unwrap();
        assert_eq!(
            first,
            TipToggle {
                saved: true,
                milestone: Some(Milestone::FirstItem)
            }
        );

        let second = saved.toggle("t1").unwrap();
        assert!(second.saved);
        assert_eq!(second.milestone, None);
        assert_eq!(saved.ids(), ["t3".to_string(), "t1".to_string()]);

        // Catalogue order, not save order.
        let ids: Vec<_> = saved.tips().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec!["t1", "t3"]);

        let removed = saved.toggle("t3").unwrap();
        assert!(!removed.saved);
        assert_eq!(removed.milestone, None);
        assert!(!saved.contains("t3"));
    }

    #[test]
    fn test_toggle_unknown_tip() {
        let mut saved = SavedTips::open(MemoryStorage::new());
        assert!(matches!(saved.toggle("t42"), Err(TipsError::UnknownTip(_))));
        assert!(saved.ids().is_empty());
    }

    #[test]
    fn test_unsave_back_to_one_is_not_a_milestone() {
        let mut saved = SavedTips::open(MemoryStorage::new());
        saved.toggle("t1").unwrap();
        saved.toggle("t2").unwrap();
        let toggle = saved.toggle("t2").unwrap();
        assert_eq!(toggle.milestone, None);
        assert_eq!(saved.ids().len(), 1);
    }

    #[test]
    fn test_persisted_layout() {
        let mut saved = SavedTips::open(MemoryStorage::new());
        saved.toggle("t2").unwrap();
        saved.toggle("t5").unwrap();
        let storage = saved.into_storage();
        assert_eq!(storage.raw(SAVED_TIPS_KEY), Some(r#"["t2","t5"]"#));

        let reopened = SavedTips::open(storage);
        assert!(reopened.contains("t5"));
    }

    #[test]
    fn test_corrupt_saved_tips_open_empty() {
        let saved = SavedTips::open(MemoryStorage::with_entry(SAVED_TIPS_KEY, "true"));
        assert!(saved.ids().is_empty());
    }
}
