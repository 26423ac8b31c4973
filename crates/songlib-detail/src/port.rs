//! `SongDetailPort` implementation for `DetailClient`.

use async_trait::async_trait;
use songlib_core::{DetailPortError, SongDetail, SongDetailPort};

use crate::client::DetailClient;
use crate::error::DetailError;
use crate::http::HttpBackend;

/// Convert internal `DetailError` to core `DetailPortError`.
pub(crate) fn map_error(err: DetailError) -> DetailPortError {
    match err {
        DetailError::ApiRequestFailed { status, .. } => DetailPortError::UnexpectedStatus { status },
        DetailError::UnusableBaseUrl { url } => DetailPortError::Configuration {
            message: format!("base URL cannot be used for requests: {url}"),
        },
        DetailError::Network(e) => DetailPortError::Network {
            message: e.to_string(),
        },
        DetailError::InvalidUrl(e) => DetailPortError::Configuration {
            message: e.to_string(),
        },
        DetailError::JsonParse(e) => DetailPortError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl<B: HttpBackend> SongDetailPort for DetailClient<B> {
    async fn fetch_detail(&self, group: &str, title: &str) -> Result<SongDetail, DetailPortError> {
        self.fetch_info(group, title)
            .await
            .map(SongDetail::from)
            .map_err(map_error)
    }
}
