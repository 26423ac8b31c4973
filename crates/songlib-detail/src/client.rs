//! Client for the song detail service.

use tracing::debug;
use url::Url;

use songlib_core::DetailPortError;

use crate::config::DetailClientConfig;
use crate::error::DetailResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::InfoResponse;
use crate::port::map_error;
use crate::url::build_info_url;

/// Default detail client using the reqwest HTTP backend.
pub type DefaultDetailClient = DetailClient<ReqwestBackend>;

/// Client for the song detail service.
///
/// Generic over an HTTP backend for testing. Use [`DefaultDetailClient`]
/// in production code.
pub struct DetailClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) base_url: Url,
}

impl DefaultDetailClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails when the base URL doesn't parse or the HTTP client can't be
    /// built.
    pub fn new(config: &DetailClientConfig) -> Result<Self, DetailPortError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| DetailPortError::Configuration {
            message: format!("invalid detail service URL '{}': {e}", config.base_url),
        })?;
        let backend = ReqwestBackend::new(config.timeout, &config.user_agent).map_err(map_error)?;
        Ok(Self { backend, base_url })
    }
}

impl<B: HttpBackend> DetailClient<B> {
    /// Create a new client with a custom backend.
    #[cfg(test)]
    pub(crate) const fn with_backend(base_url: Url, backend: B) -> Self {
        Self { backend, base_url }
    }

    /// Fetch the detail record of `song` by `group`.
    pub(crate) async fn fetch_info(&self, group: &str, song: &str) -> DetailResult<InfoResponse> {
        let url = build_info_url(&self.base_url, group, song)?;
        debug!(group, song, "Fetching song detail");
        self.backend.get_json(&url).await
    }
}
