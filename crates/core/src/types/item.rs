//! Pantry item record.

use chrono::{DateTime, NaiveDate, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::location::StorageLocation;
use super::status::{Status, days_between};

/// Date format of the persisted `expiry` field and of user input.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur when building a [`PantryItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ItemError {
    /// The name is empty after trimming.
    #[error("name cannot be empty")]
    EmptyName,
    /// The quantity is empty after trimming.
    #[error("quantity cannot be empty")]
    EmptyQuantity,
    /// The expiry date is empty after trimming.
    #[error("expiry date cannot be empty")]
    EmptyExpiryDate,
    /// The expiry date is not a `YYYY-MM-DD` calendar date.
    #[error("invalid expiry date '{0}', expected YYYY-MM-DD")]
    InvalidExpiryDate(String),
    /// A stored record has `used` and `usedAt` out of step.
    #[error("used flag and usedAt timestamp disagree")]
    UsedAtMismatch,
}

/// A tracked food item.
///
/// Fields are only reachable through accessors so the record can never hold
/// an empty name, quantity, or a `used` flag without its timestamp.
///
/// ## Examples
///
/// ```
/// use chrono::{NaiveDate, Utc};
/// use refoodify_core::{PantryItem, Status, StorageLocation};
///
/// let item = PantryItem::new("Yogurt", "2", "2026-10-21", StorageLocation::Fridge, Utc::now())
///     .unwrap();
/// let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
/// assert_eq!(item.days_remaining(today), 2);
/// assert_eq!(item.status(today), Status::Urgent);
///
/// assert!(PantryItem::new("  ", "2", "2026-10-21", StorageLocation::Fridge, Utc::now()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredItem", into = "StoredItem")]
pub struct PantryItem {
    name: String,
    quantity: String,
    expiry_date: NaiveDate,
    storage_location: StorageLocation,
    added_at: DateTime<Utc>,
    used_at: Option<DateTime<Utc>>,
}

impl PantryItem {
    /// Build a new, unused item.
    ///
    /// `name`, `quantity` and `expiry` are trimmed before validation.
    /// `added_at` is kept to millisecond precision, as persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is empty after trimming, or if
    /// `expiry` is not a `YYYY-MM-DD` date.
    pub fn new(
        name: &str,
        quantity: &str,
        expiry: &str,
        storage_location: StorageLocation,
        added_at: DateTime<Utc>,
    ) -> Result<Self, ItemError> {
        let name = required(name, ItemError::EmptyName)?;
        let quantity = required(quantity, ItemError::EmptyQuantity)?;
        let expiry_date = parse_expiry_date(expiry)?;

        Ok(Self {
            name,
            quantity,
            expiry_date,
            storage_location,
            added_at: added_at.trunc_subsecs(3),
            used_at: None,
        })
    }

    /// Free-text food name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free-text quantity label.
    #[must_use]
    pub fn quantity(&self) -> &str {
        &self.quantity
    }

    #[must_use]
    pub const fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    #[must_use]
    pub const fn storage_location(&self) -> &StorageLocation {
        &self.storage_location
    }

    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Whether the item has been marked as consumed.
    #[must_use]
    pub const fn is_used(&self) -> bool {
        self.used_at.is_some()
    }

    #[must_use]
    pub const fn used_at(&self) -> Option<DateTime<Utc>> {
        self.used_at
    }

    /// Whole days until expiry, negative once expired.
    #[must_use]
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        days_between(self.expiry_date, today)
    }

    /// Freshness status as of `today`.
    #[must_use]
    pub fn status(&self, today: NaiveDate) -> Status {
        Status::from_days_remaining(self.days_remaining(today))
    }

    /// Mark the item consumed at `at`.
    ///
    /// Returns `false` and keeps the first timestamp in place when the
    /// item was already used.
    pub(crate) fn mark_used(&mut self, at: DateTime<Utc>) -> bool {
        if self.used_at.is_some() {
            return false;
        }
        self.used_at = Some(at.trunc_subsecs(3));
        true
    }
}

/// Parse a `YYYY-MM-DD` expiry date, trimming surrounding whitespace.
///
/// # Errors
///
/// Returns [`ItemError::EmptyExpiryDate`] for blank input and
/// [`ItemError::InvalidExpiryDate`] for anything that is not a calendar date.
pub fn parse_expiry_date(input: &str) -> Result<NaiveDate, ItemError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ItemError::EmptyExpiryDate);
    }
    NaiveDate::parse_from_str(trimmed, EXPIRY_DATE_FORMAT)
        .map_err(|_| ItemError::InvalidExpiryDate(trimmed.to_owned()))
}

fn required(value: &str, err: ItemError) -> Result<String, ItemError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(err);
    }
    Ok(trimmed.to_owned())
}

/// Persisted shape of a pantry item, field names as written by the website.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredItem {
    name: String,
    qty: String,
    expiry: NaiveDate,
    storage: StorageLocation,
    #[serde(serialize_with = "iso_millis")]
    added_at: DateTime<Utc>,
    #[serde(default)]
    used: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "iso_millis_opt"
    )]
    used_at: Option<DateTime<Utc>>,
}

/// Timestamps are written as `2026-10-19T09:30:00.000Z`, the form browsers
/// produce, so website state saves back unchanged.
fn iso_millis<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[allow(clippy::ref_option)]
fn iso_millis_opt<S: Serializer>(
    at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => iso_millis(at, serializer),
        None => serializer.serialize_none(),
    }
}

impl TryFrom<StoredItem> for PantryItem {
    type Error = ItemError;

    fn try_from(stored: StoredItem) -> Result<Self, Self::Error> {
        if stored.name.trim().is_empty() {
            return Err(ItemError::EmptyName);
        }
        if stored.qty.trim().is_empty() {
            return Err(ItemError::EmptyQuantity);
        }
        if stored.used != stored.used_at.is_some() {
            return Err(ItemError::UsedAtMismatch);
        }

        Ok(Self {
            name: stored.name,
            quantity: stored.qty,
            expiry_date: stored.expiry,
            storage_location: stored.storage,
            added_at: stored.added_at,
            used_at: stored.used_at,
        })
    }
}

impl From<PantryItem> for StoredItem {
    fn from(item: PantryItem) -> Self {
        Self {
            name: item.name,
            qty: item.quantity,
            expiry: item.expiry_date,
            storage: item.storage_location,
            added_at: item.added_at,
            used: item.used_at.is_some(),
            used_at: item.used_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn added_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
    }

    fn milk() -> PantryItem {
        PantryItem::new("Milk", "1 L", "2026-10-22", StorageLocation::Fridge, added_at()).unwrap()
    }

    #[test]
    fn test_new_trims_fields() {
        let item = PantryItem::new(
            "  Spinach ",
            " 1 bag",
            " 2026-10-25 ",
            StorageLocation::Fridge,
            added_at(),
        )
        .unwrap();
        assert_eq!(item.name(), "Spinach");
        assert_eq!(item.quantity(), "1 bag");
        assert_eq!(item.expiry_date(), NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
        assert!(!item.is_used());
        assert_eq!(item.used_at(), None);
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        let loc = StorageLocation::Pantry;
        assert_eq!(
            PantryItem::new(" ", "1", "2026-10-22", loc.clone(), added_at()),
            Err(ItemError::EmptyName)
        );
        assert_eq!(
            PantryItem::new("Rice", "\t", "2026-10-22", loc.clone(), added_at()),
            Err(ItemError::EmptyQuantity)
        );
        assert_eq!(
            PantryItem::new("Rice", "1", "", loc, added_at()),
            Err(ItemError::EmptyExpiryDate)
        );
    }

    #[test]
    fn test_new_rejects_bad_date() {
        let result = PantryItem::new("Rice", "1", "22/10/2026", StorageLocation::Pantry, added_at());
        assert!(matches!(result, Err(ItemError::InvalidExpiryDate(_))));
    }

    #[test]
    fn test_mark_used_sets_timestamp_once() {
        let mut item = milk();
        let first = added_at() + chrono::Duration::hours(2);
        assert!(item.mark_used(first));
        assert!(item.is_used());
        assert_eq!(item.used_at(), Some(first));

        assert!(!item.mark_used(first + chrono::Duration::hours(1)));
        assert_eq!(item.used_at(), Some(first));
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_string(&milk()).unwrap();
        assert_eq!(
            json,
            r#"{"name":"Milk","qty":"1 L","expiry":"2026-10-22","storage":"Fridge","addedAt":"2026-10-19T09:30:00.000Z","used":false}"#
        );
    }

    #[test]
    fn test_timestamps_keep_milliseconds() {
        let json = r#"{"name":"Bread","qty":"1","expiry":"2026-10-20","storage":"Pantry","addedAt":"2026-10-18T07:12:45.120Z","used":true,"usedAt":"2026-10-19T08:00:00.000Z"}"#;
        let item: PantryItem = serde_json::from_str(json).unwrap();
        assert_eq!(serde_json::to_string(&item).unwrap(), json);
    }

    #[test]
    fn test_new_truncates_to_milliseconds() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        let mut item =
            PantryItem::new("Milk", "1 L", "2026-10-22", StorageLocation::Fridge, at).unwrap();
        item.mark_used(at);

        let back: PantryItem =
            serde_json::from_str(&serde_json::to_string(&item).unwrap()).unwrap();
        assert_eq!(back, item);
        assert_eq!(item.added_at().timestamp_subsec_millis(), 123);
    }

    #[test]
    fn test_deserialize_ignores_derived_fields() {
        let json = r#"{"name":"Bread","qty":"1","expiry":"2026-10-20","storage":"Pantry",
            "addedAt":"2026-10-18T08:00:00.000Z","used":false,"days":1,"status":"Urgent"}"#;
        let item: PantryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.name(), "Bread");
        assert_eq!(item.storage_location(), &StorageLocation::Pantry);
    }

    #[test]
    fn test_deserialize_used_item() {
        let json = r#"{"name":"Bread","qty":"1","expiry":"2026-10-20","storage":"Pantry",
            "addedAt":"2026-10-18T08:00:00Z","used":true,"usedAt":"2026-10-19T08:00:00Z"}"#;
        let item: PantryItem = serde_json::from_str(json).unwrap();
        assert!(item.is_used());
    }

    #[test]
    fn test_deserialize_rejects_used_without_timestamp() {
        let json = r#"{"name":"Bread","qty":"1","expiry":"2026-10-20","storage":"Pantry",
            "addedAt":"2026-10-18T08:00:00Z","used":true}"#;
        assert!(serde_json::from_str::<PantryItem>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_empty_name() {
        let json = r#"{"name":"","qty":"1","expiry":"2026-10-20","storage":"Pantry",
            "addedAt":"2026-10-18T08:00:00Z","used":false}"#;
        assert!(serde_json::from_str::<PantryItem>(json).is_err());
    }

    #[test]
    fn test_status_scenario_yogurt() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let expiry = (today + chrono::Days::new(2)).to_string();
        let yogurt =
            PantryItem::new("Yogurt", "2", &expiry, StorageLocation::Fridge, added_at()).unwrap();
        assert_eq!(yogurt.days_remaining(today), 2);
        assert_eq!(yogurt.status(today), Status::Urgent);
    }
}
