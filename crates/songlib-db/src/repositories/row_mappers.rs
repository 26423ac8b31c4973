//! Row mapping helpers for `SQLite` queries.

use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use songlib_core::{LyricsVerse, RepositoryError, Song};

/// Shared SELECT column list for song queries (`s` = songs, `g` = groups).
pub const SONG_SELECT_COLUMNS: &str =
    "s.id, s.title, g.name AS group_name, s.release_date, s.link";

/// Parse a TEXT id column into a typed ID.
pub fn parse_id<T: FromStr>(row: &SqliteRow, column: &str) -> Result<T, RepositoryError>
where
    T::Err: std::fmt::Display,
{
    let raw: String = row
        .try_get(column)
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
    raw.parse()
        .map_err(|e| RepositoryError::Serialization(format!("{column} '{raw}': {e}")))
}

/// Parse a database row into a Song. `lyrics` is left empty.
pub fn row_to_song(row: &SqliteRow) -> Result<Song, RepositoryError> {
    let release_date: NaiveDate = row
        .try_get("release_date")
        .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

    Ok(Song {
        id: parse_id(row, "id")?,
        title: row
            .try_get("title")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        group_name: row
            .try_get("group_name")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        release_date,
        link: row
            .try_get("link")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
        lyrics: String::new(),
    })
}

/// Parse a `lyrics_verses` row.
pub fn row_to_verse(row: &SqliteRow) -> Result<LyricsVerse, RepositoryError> {
    let number: i64 = row
        .try_get("verse_number")
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;
    let verse_number = u32::try_from(number)
        .map_err(|_| RepositoryError::Serialization(format!("verse_number {number}")))?;

    Ok(LyricsVerse {
        verse_number,
        verse: row
            .try_get("verse")
            .map_err(|e| RepositoryError::Storage(e.to_string()))?,
    })
}

/// Translate a failed write into a repository error.
///
/// Uniqueness violations become `AlreadyExists(subject)`, other constraint
/// failures become `Constraint`, anything else is `Storage`.
pub fn write_error(e: sqlx::Error, subject: &str) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::AlreadyExists(subject.to_string())
        }
        sqlx::Error::Database(db) if db.is_foreign_key_violation() || db.is_check_violation() => {
            RepositoryError::Constraint(db.message().to_string())
        }
        _ => RepositoryError::Storage(e.to_string()),
    }
}
