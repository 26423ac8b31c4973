//! URL construction for the detail service.

use url::Url;
use urlencoding::encode;

use crate::error::{DetailError, DetailResult};

/// Build `{base}/info?group=..&song=..`.
///
/// A path on the base URL is kept, so `http://host/api` yields
/// `http://host/api/info`.
pub fn build_info_url(base: &Url, group: &str, song: &str) -> DetailResult<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| DetailError::UnusableBaseUrl {
            url: base.to_string(),
        })?
        .pop_if_empty()
        .push("info");
    url.set_query(Some(&format!(
        "group={}&song={}",
        encode(group),
        encode(song)
    )));
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_info_url_on_bare_host() {
        let url = build_info_url(&base("http://detail.local"), "Muse", "Uprising").unwrap();
        assert_eq!(url.as_str(), "http://detail.local/info?group=Muse&song=Uprising");
    }

    #[test]
    fn test_info_url_keeps_base_path() {
        let url = build_info_url(&base("http://detail.local/api/"), "Muse", "Uprising").unwrap();
        assert_eq!(url.path(), "/api/info");

        let url = build_info_url(&base("http://detail.local/api"), "Muse", "Uprising").unwrap();
        assert_eq!(url.path(), "/api/info");
    }

    #[test]
    fn test_info_url_encodes_values() {
        let url = build_info_url(
            &base("http://detail.local"),
            "Simon & Garfunkel",
            "Mrs. Robinson?",
        )
        .unwrap();
        assert_eq!(
            url.query(),
            Some("group=Simon%20%26%20Garfunkel&song=Mrs.%20Robinson%3F")
        );
    }

    #[test]
    fn test_cannot_be_base_url_rejected() {
        let result = build_info_url(&base("mailto:someone@example.com"), "a", "b");
        assert!(matches!(result, Err(DetailError::UnusableBaseUrl { .. })));
    }
}
