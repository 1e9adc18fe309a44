//! Freshness status derived from an item's expiry date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Freshness category of a pantry item.
///
/// Never persisted; always recomputed from the expiry date and today's date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// More than five days left.
    Fresh,
    /// Three to five days left.
    Soon,
    /// One or two days left.
    Urgent,
    /// Expiry date is today or in the past.
    Expired,
}

impl Status {
    /// All statuses, freshest first.
    pub const ALL: [Self; 4] = [Self::Fresh, Self::Soon, Self::Urgent, Self::Expired];

    /// Classify a number of days remaining until expiry.
    ///
    /// Boundaries are inclusive on the lower status: 2 days is `Urgent`,
    /// 5 days is `Soon`, 0 days is `Expired`.
    #[must_use]
    pub const fn from_days_remaining(days: i64) -> Self {
        match days {
            i64::MIN..=0 => Self::Expired,
            1..=2 => Self::Urgent,
            3..=5 => Self::Soon,
            _ => Self::Fresh,
        }
    }

    /// Whether the item belongs on the "use soon" list.
    #[must_use]
    pub const fn is_expiring(self) -> bool {
        matches!(self, Self::Soon | Self::Urgent)
    }

    /// Display name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fresh => "Fresh",
            Self::Soon => "Soon",
            Self::Urgent => "Urgent",
            Self::Expired => "Expired",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("invalid status: {s}"))
    }
}

/// Whole calendar days from `today` until `expiry`.
///
/// Negative once the expiry date has passed. Both values are midnight-aligned
/// dates, so time of day never affects the result.
#[must_use]
pub fn days_between(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}
