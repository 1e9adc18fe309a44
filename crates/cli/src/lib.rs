//! Refoodify command-line tools.
//!
//! Tracks pantry items in a local JSON file, looks up recipes and storage
//! tips through the Refoodify proxy, and runs the ingredient analyzer.
//!
//! # Modules
//!
//! - [`config`] - environment configuration
//! - [`storage`] - file-backed key-value storage
//! - [`api`] - recipe and tips proxy client
//! - [`commands`] - command implementations
//! - [`error`] - command error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod storage;

pub use api::{ApiError, RecipeApiClient};
pub use config::{CliConfig, ConfigError};
pub use error::CliError;
pub use storage::FileStorage;
