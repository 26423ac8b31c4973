//! Song request and response bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use songlib_core::{LyricsVerse, Song, SongId, SongUpdate};

use crate::error::HttpError;

/// Date format accepted in request bodies and query strings.
pub const API_DATE_FORMAT: &str = "%Y-%m-%d";

/// Body of `POST /songs`.
#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub group: String,
    pub title: String,
}

/// Data returned by `POST /songs`.
#[derive(Debug, Serialize)]
pub struct CreatedSong {
    pub id: SongId,
}

/// Body of `PUT /songs`.
///
/// Every field but `id` is optional; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub group_name: Option<String>,
    pub link: Option<String>,
    pub lyrics: Option<String>,
}

impl UpdateSongRequest {
    /// Validate the body and turn it into a domain update.
    ///
    /// Title and group name may be omitted but not blanked. An empty link
    /// or empty lyrics are legitimate values and are passed through.
    pub fn into_update(self) -> Result<SongUpdate, HttpError> {
        if self.id.trim().is_empty() {
            return Err(HttpError::BadRequest("id not provided".into()));
        }
        let id = parse_song_id(&self.id)?;

        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(HttpError::BadRequest("title must not be empty".into()));
        }
        if self.group_name.as_deref().is_some_and(|g| g.trim().is_empty()) {
            return Err(HttpError::BadRequest("groupName must not be empty".into()));
        }

        let release_date = self
            .release_date
            .as_deref()
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), API_DATE_FORMAT)
                    .map_err(|_| HttpError::BadRequest("invalid releaseDate".into()))
            })
            .transpose()?;

        Ok(SongUpdate {
            id,
            title: self.title,
            release_date,
            group_name: self.group_name,
            link: self.link,
            lyrics: self.lyrics,
        })
    }
}

/// Parse a song ID taken from a path or body.
pub fn parse_song_id(raw: &str) -> Result<SongId, HttpError> {
    raw.parse()
        .map_err(|_| HttpError::BadRequest("invalid song id".into()))
}

/// A song as exposed by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDto {
    pub id: SongId,
    pub title: String,
    pub group_name: String,
    pub release_date: NaiveDate,
    pub lyrics: String,
    pub link: String,
}

impl From<Song> for SongDto {
    fn from(song: Song) -> Self {
        Self {
            id: song.id,
            title: song.title,
            group_name: song.group_name,
            release_date: song.release_date,
            lyrics: song.lyrics,
            link: song.link,
        }
    }
}

/// One verse of a lyrics page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseDto {
    pub verse_number: u32,
    pub verse: String,
}

impl From<LyricsVerse> for VerseDto {
    fn from(verse: LyricsVerse) -> Self {
        Self {
            verse_number: verse.verse_number,
            verse: verse.verse,
        }
    }
}
