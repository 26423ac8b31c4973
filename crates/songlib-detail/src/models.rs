//! Wire types of the detail service.

use serde::Deserialize;
use songlib_core::SongDetail;

/// Body of a successful `/info` response.
///
/// Missing `text` or `link` decode as empty strings; a missing
/// `releaseDate` is a decode error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub release_date: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub link: String,
}

impl From<InfoResponse> for SongDetail {
    fn from(info: InfoResponse) -> Self {
        Self {
            release_date: info.release_date,
            text: info.text,
            link: info.link,
        }
    }
}
