//! HTTP backend abstraction for the detail service.
//!
//! The trait allows injecting a fake backend in tests. The production
//! implementation uses reqwest and makes exactly one attempt per call.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{DetailError, DetailResult};

/// Longest response body excerpt written to the log on failure.
const BODY_LOG_LIMIT: usize = 512;

/// Trait for HTTP backends that can fetch JSON from URLs.
///
/// This is an implementation detail; external code uses the
/// `SongDetailPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Fetch JSON from a URL and deserialize it.
    ///
    /// Any status other than 200 OK is an error.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> DetailResult<T>;
}

/// Production HTTP backend using reqwest.
///
/// No retries: transport failures, timeouts and non-200 statuses are
/// returned to the caller on the first attempt.
pub struct ReqwestBackend {
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Create a backend with the given request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> DetailResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> DetailResult<T> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.as_str())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!(
                %url,
                status = status.as_u16(),
                body = truncate(&body, BODY_LOG_LIMIT),
                "Detail service returned an error"
            );
            return Err(DetailError::ApiRequestFailed {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
