//! External song detail lookup port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Enrichment data for one song as returned by the detail service.
///
/// `release_date` is kept verbatim (`DD.MM.YYYY`); parsing it is the
/// orchestrator's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetail {
    pub release_date: String,
    pub text: String,
    pub link: String,
}

/// Errors from detail port operations.
///
/// Implementation-specific errors (HTTP, JSON) are mapped to these.
#[derive(Debug, Error)]
pub enum DetailPortError {
    /// The service answered with a non-success status.
    #[error("Detail service returned status {status}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
    },

    /// Network or connectivity error, including timeouts.
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Invalid detail response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },
}

/// Port for looking up enrichment data of a song.
///
/// No retries: any failure is returned to the caller as-is.
#[async_trait]
pub trait SongDetailPort: Send + Sync {
    /// Fetch details for `title` performed by `group`.
    async fn fetch_detail(&self, group: &str, title: &str)
    -> Result<SongDetail, DetailPortError>;
}
