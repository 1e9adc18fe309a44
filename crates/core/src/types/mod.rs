//! Core types for Refoodify.
//!
//! This module provides the fixed-schema pantry record and the values derived
//! from it.

pub mod item;
pub mod location;
pub mod status;

pub use item::{ItemError, PantryItem};
pub use location::StorageLocation;
pub use status::{Status, days_between};
