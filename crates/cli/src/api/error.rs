//! Error types for the recipe proxy client.

use thiserror::Error;

/// Errors that can occur when talking to the recipe and tips proxy.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with a non-success status code.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },

    /// The proxy answered `success: false`.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Failed to parse response.
    #[error("parse error: {0}")]
    Parse(String),

    /// A request URL could not be built from the base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
