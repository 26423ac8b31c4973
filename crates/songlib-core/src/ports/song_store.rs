//! Song store trait definition.
//!
//! Read operations run directly against the store; writes are only
//! reachable through the unit of work returned by [`SongStore::begin`].

use async_trait::async_trait;

use super::{RepositoryError, SongUnitOfWork};
use crate::domain::{LyricsVerse, Song, SongFilter, SongId};

/// Persistence for songs, groups and lyric verses.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Songs returned by the store carry an empty `lyrics` field; joining
///   verses is the service's job
#[async_trait]
pub trait SongStore: Send + Sync {
    /// Get a song by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the song doesn't exist.
    async fn get_by_id(&self, id: SongId) -> Result<Song, RepositoryError>;

    /// Search songs with the given filter.
    ///
    /// Each matching song appears exactly once, ordered by ID ascending and
    /// then release date descending.
    async fn search(&self, filter: &SongFilter) -> Result<Vec<Song>, RepositoryError>;

    /// All verses of a song, ascending by verse number.
    ///
    /// An unknown song yields an empty list.
    async fn list_verses(&self, song_id: SongId) -> Result<Vec<LyricsVerse>, RepositoryError>;

    /// A window of a song's verses, ascending by verse number.
    async fn list_verses_page(
        &self,
        song_id: SongId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LyricsVerse>, RepositoryError>;

    /// Open a unit of work. All writes of one use case run through it.
    async fn begin(&self) -> Result<Box<dyn SongUnitOfWork>, RepositoryError>;
}
