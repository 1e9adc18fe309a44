//! Refoodify Core - pantry tracking and food-waste logic.
//!
//! This crate provides everything the Refoodify front ends share:
//! - `cli` - Command-line tracker, recipe lookup and tips browser
//! - `integration-tests` - End-to-end checks against file storage and the recipe proxy
//!
//! # Architecture
//!
//! The core crate performs no network or filesystem I/O. Persistence goes
//! through the [`KeyValueStore`] trait, which mirrors a browser's local
//! storage (string keys, string values); front ends supply the backend.
//!
//! # Modules
//!
//! - [`types`] - Pantry items, storage locations and freshness status
//! - [`pantry`] - The pantry store and its derived views
//! - [`storage`] - Key-value storage contract and an in-memory backend
//! - [`clock`] - Injectable source of "now" and "today"
//! - [`milestone`] - Celebration events returned by mutations
//! - [`tips`] - Tips catalogue and saved tips
//! - [`analyzer`] - Ingredient parsing, categories and waste risk

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analyzer;
pub mod clock;
pub mod milestone;
pub mod pantry;
pub mod storage;
pub mod tips;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use milestone::Milestone;
pub use pantry::{ImpactSummary, PantryError, PantryStore, TrackedItem};
pub use storage::{KeyValueStore, MemoryStorage, StorageError};
pub use types::*;
