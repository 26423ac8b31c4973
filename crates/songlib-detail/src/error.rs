//! Internal error types for detail lookups.
//!
//! These errors stay inside `songlib-detail` and are mapped to
//! `DetailPortError` at the port boundary.

use thiserror::Error;

/// Result type alias for detail operations.
pub type DetailResult<T> = Result<T, DetailError>;

#[derive(Debug, Error)]
pub enum DetailError {
    /// The service answered with something other than 200 OK.
    #[error("Detail request failed with status {status}: {url}")]
    ApiRequestFailed {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// The configured base URL can't have a path appended.
    #[error("Base URL cannot be used for requests: {url}")]
    UnusableBaseUrl { url: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
