//! Celebration events returned by mutating operations.
//!
//! Marking pantry items used and saving tips both report a [`Milestone`] when
//! the running count hits one of the celebrated values. The store never
//! renders anything; callers decide how (or whether) to celebrate.

use serde::{Deserialize, Serialize};

/// Every this many items is celebrated after the first.
pub const MILESTONE_INTERVAL: usize = 10;

/// A running count reached a celebrated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "count")]
pub enum Milestone {
    /// The count became 1.
    FirstItem,
    /// The count became a positive multiple of [`MILESTONE_INTERVAL`].
    Multiple(usize),
}

impl Milestone {
    /// Check whether `count` is a celebrated value.
    #[must_use]
    pub const fn check(count: usize) -> Option<Self> {
        if count == 1 {
            Some(Self::FirstItem)
        } else if count > 0 && count % MILESTONE_INTERVAL == 0 {
            Some(Self::Multiple(count))
        } else {
            None
        }
    }

    /// The count that triggered the milestone.
    #[must_use]
    pub const fn count(self) -> usize {
        match self {
            Self::FirstItem => 1,
            Self::Multiple(count) => count,
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FirstItem => write!(f, "first one"),
            Self::Multiple(count) => write!(f, "{count} and counting"),
        }
    }
}
