//! Command implementations.
//!
//! Each command writes its report to the given writer and returns a
//! [`CliError`](crate::error::CliError) on failure.

pub mod analyze;
pub mod pantry;
pub mod recipes;
pub mod tips;
