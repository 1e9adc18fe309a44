//! Error type returned by CLI commands.

use refoodify_core::PantryError;
use refoodify_core::tips::TipsError;
use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("pantry error: {0}")]
    Pantry(#[from] PantryError),

    #[error("tips error: {0}")]
    Tips(#[from] TipsError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Command output could not be written.
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
