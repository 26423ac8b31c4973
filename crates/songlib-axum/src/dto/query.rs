//! Query string parameters and their validation.
//!
//! Parameters arrive as strings so that malformed values produce the
//! specific messages below instead of a generic rejection. An empty value
//! counts as absent.

use chrono::NaiveDate;
use serde::Deserialize;
use songlib_core::{PageRequest, SongFilter};

use super::songs::API_DATE_FORMAT;
use crate::error::HttpError;

/// Query of `GET /songs`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongListQuery {
    pub title: Option<String>,
    pub group: Option<String>,
    pub link: Option<String>,
    pub text: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl SongListQuery {
    /// Validate the parameters and build a search filter.
    ///
    /// The date bounds and the page/limit pair must each be given together
    /// or not at all.
    pub fn into_filter(self) -> Result<SongFilter, HttpError> {
        let (released_from, released_to) =
            match (present(self.start_date), present(self.end_date)) {
                (None, None) => (None, None),
                (Some(start), Some(end)) => {
                    let start = parse_date(&start, "invalid startDate")?;
                    let end = parse_date(&end, "invalid endDate")?;
                    if start > end {
                        return Err(HttpError::BadRequest(
                            "start_date cannot be after end_date".into(),
                        ));
                    }
                    (Some(start), Some(end))
                }
                _ => {
                    return Err(HttpError::BadRequest(
                        "either both startDate and endDate should be provided, or neither of them"
                            .into(),
                    ));
                }
            };

        let filter = SongFilter {
            title: present(self.title),
            group: present(self.group),
            link: present(self.link),
            text: present(self.text),
            released_from,
            released_to,
            ..SongFilter::default()
        };

        Ok(match page_request(self.page, self.limit)? {
            Some(page) => filter.with_page(page),
            None => filter,
        })
    }
}

/// Query of `GET /songs/lyrics/{song_id}`.
#[derive(Debug, Default, Deserialize)]
pub struct LyricsPageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl LyricsPageQuery {
    /// Both `page` and `limit` are required here.
    pub fn into_page(self) -> Result<PageRequest, HttpError> {
        page_request(self.page, self.limit)?
            .ok_or_else(|| HttpError::BadRequest("page and limit are required".into()))
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_date(raw: &str, message: &str) -> Result<NaiveDate, HttpError> {
    NaiveDate::parse_from_str(raw, API_DATE_FORMAT).map_err(|_| HttpError::BadRequest(message.into()))
}

fn parse_positive(raw: &str, message: &str) -> Result<u32, HttpError> {
    match raw.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(HttpError::BadRequest(message.into())),
    }
}

fn page_request(
    page: Option<String>,
    limit: Option<String>,
) -> Result<Option<PageRequest>, HttpError> {
    match (present(page), present(limit)) {
        (None, None) => Ok(None),
        (Some(page), Some(limit)) => Ok(Some(PageRequest::new(
            parse_positive(&page, "invalid page number")?,
            parse_positive(&limit, "invalid limit number")?,
        ))),
        _ => Err(HttpError::BadRequest(
            "either both page and limit should be provided, or neither of them".into(),
        )),
    }
}
