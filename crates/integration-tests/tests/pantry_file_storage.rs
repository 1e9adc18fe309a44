//! Integration tests for the pantry and saved tips persisted in a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use refoodify_cli::FileStorage;
use refoodify_cli::commands;
use refoodify_core::storage::{PANTRY_KEY, SAVED_TIPS_KEY};
use refoodify_core::tips::SavedTips;
use refoodify_core::{
    FixedClock, KeyValueStore, Milestone, PantryStore, Status, StorageLocation,
};

fn clock() -> FixedClock {
    FixedClock::new(
        Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
    )
}

/// Write a data file holding `entries` as its key-value pairs.
fn write_data(path: &Path, entries: &[(&str, &str)]) {
    let map: BTreeMap<&str, &str> = entries.iter().copied().collect();
    fs::write(path, serde_json::to_string(&map).unwrap()).unwrap();
}

fn open(path: &Path) -> PantryStore<FileStorage, FixedClock> {
    PantryStore::with_clock(FileStorage::new(path), clock())
}

// =============================================================================
// Pantry Persistence Tests
// =============================================================================

#[test]
fn test_added_item_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut store = open(&path);
    store.add("Milk", "1 L", "2026-10-22", StorageLocation::Fridge).unwrap();
    store.add("Yogurt", "2", "2026-10-21", StorageLocation::Fridge).unwrap();

    let reopened = open(&path);
    assert_eq!(reopened.len(), 2);
    let last = reopened.items().last().unwrap();
    assert_eq!(last.name(), "Yogurt");
    assert!(!last.is_used());
    assert_eq!(last.status(reopened.today()), Status::Urgent);
}

#[test]
fn test_save_of_load_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut store = open(&path);
    store.add("Bread", "1 loaf", "2026-10-20", StorageLocation::Pantry).unwrap();
    store.add("Herbs", "1 bunch", "2026-10-25", StorageLocation::Other("Windowsill".into())).unwrap();
    store.mark_used(0).unwrap();
    let before = store.storage().get(PANTRY_KEY).unwrap().unwrap();

    let loaded = store.load();
    store.save(loaded).unwrap();
    let after = store.storage().get(PANTRY_KEY).unwrap().unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_reads_state_written_by_the_website() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let pantry = r#"[{"name":"Spinach","qty":"1 bag","expiry":"2026-10-23","storage":"Fridge","addedAt":"2026-10-18T07:12:45.120Z","used":false,"days":5,"status":"Fresh"}]"#;
    write_data(&path, &[(PANTRY_KEY, pantry), (SAVED_TIPS_KEY, r#"["t4"]"#)]);

    let store = open(&path);
    assert_eq!(store.len(), 1);
    let soon = store.expiring_soon();
    assert_eq!(soon.len(), 1);
    assert_eq!(soon[0].days_remaining, 4);
    assert_eq!(soon[0].status, Status::Soon);

    let tips = SavedTips::open(FileStorage::new(&path));
    assert!(tips.contains("t4"));
}

#[test]
fn test_corrupt_file_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, "garbage").unwrap();

    let mut store = open(&path);
    assert!(store.is_empty());
    store.add("Rice", "1 kg", "2027-01-01", StorageLocation::Pantry).unwrap();
    assert_eq!(open(&path).len(), 1);
}

#[test]
fn test_corrupt_pantry_value_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    write_data(&path, &[(PANTRY_KEY, r#"[{"name":"Milk"}]"#)]);

    assert!(open(&path).is_empty());
}

#[test]
fn test_invalid_item_does_not_erase_valid_items_on_add() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let pantry = r#"[{"name":"Milk","qty":"1 L","expiry":"2026-10-22","storage":"Fridge","addedAt":"2026-10-18T07:12:45.000Z","used":false},{"name":"Eggs","qty":"6","expiry":"2026-10-25","storage":"Fridge","addedAt":"2026-10-18T07:13:00.000Z","used":true}]"#;
    write_data(&path, &[(PANTRY_KEY, pantry)]);

    let mut store = open(&path);
    assert_eq!(store.len(), 1);
    store.add("Bread", "1 loaf", "2026-10-21", StorageLocation::Pantry).unwrap();

    let reopened = open(&path);
    let names: Vec<_> = reopened.items().iter().map(|i| i.name()).collect();
    assert_eq!(names, ["Milk", "Bread"]);
}

#[test]
fn test_website_state_saves_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let pantry = r#"[{"name":"Milk","qty":"1 L","expiry":"2026-10-22","storage":"Fridge","addedAt":"2026-10-18T07:12:45.000Z","used":false}]"#;
    write_data(&path, &[(PANTRY_KEY, pantry)]);

    let mut store = open(&path);
    let loaded = store.load();
    store.save(loaded).unwrap();
    assert_eq!(store.storage().get(PANTRY_KEY).unwrap().unwrap(), pantry);
}

#[test]
fn test_pantry_and_tips_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut store = open(&path);
    let mut tips = SavedTips::open(FileStorage::new(&path));
    store.add("Milk", "1 L", "2026-10-22", StorageLocation::Fridge).unwrap();
    tips.toggle("t1").unwrap();
    store.add("Bread", "1", "2026-10-21", StorageLocation::Pantry).unwrap();

    let raw: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.contains_key(PANTRY_KEY));
    assert_eq!(raw.get(SAVED_TIPS_KEY).unwrap(), "[\"t1\"]");
    assert_eq!(open(&path).len(), 2);
}

#[test]
fn test_mark_used_milestones_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut store = open(&path);
    for i in 0..10 {
        store
            .add(&format!("Item {i}"), "1", "2026-10-30", StorageLocation::Pantry)
            .unwrap();
    }

    assert_eq!(store.mark_used(0).unwrap(), Some(Milestone::FirstItem));
    assert_eq!(store.mark_used(0).unwrap(), None);
    for i in 1..9 {
        assert_eq!(store.mark_used(i).unwrap(), None);
    }

    // A fresh store picks up the nine used items from disk.
    let mut reopened = open(&path);
    assert_eq!(reopened.used_count(), 9);
    assert_eq!(reopened.mark_used(9).unwrap(), Some(Milestone::Multiple(10)));

    let impact = open(&path).impact_summary();
    assert_eq!(impact.saved_count, 10);
    assert_eq!(impact.co2_display(), "5.0 kg");
}

#[test]
fn test_failed_write_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    // The data file path is a directory, so every write fails.
    let blocked = dir.path().join("blocked");
    fs::create_dir(&blocked).unwrap();

    let mut store = PantryStore::with_clock(FileStorage::new(&blocked), clock());
    assert!(store.add("Milk", "1 L", "2026-10-22", StorageLocation::Fridge).is_err());
    assert!(store.is_empty());
}

// =============================================================================
// Command Tests
// =============================================================================

#[test]
fn test_pantry_commands_against_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut out = Vec::new();

    let mut store = open(&path);
    commands::pantry::add(&mut store, "Banana", "6", "2026-10-21", "pantry", &mut out).unwrap();
    commands::pantry::add(&mut store, "Cheese", "200 g", "2026-11-20", "Fridge", &mut out).unwrap();

    let mut store = open(&path);
    commands::pantry::mark_used(&mut store, 2, &mut out).unwrap();
    commands::pantry::suggest(&store, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Added #1 Banana (6), expires 2026-10-21 [Urgent • 2d]"));
    assert!(text.contains("Marked Cheese as used."));
    assert!(text.contains("- Banana bread"));
    assert!(open(&path).items()[1].is_used());
}
