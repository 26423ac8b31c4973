//! Transactional write handle.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{GroupId, LyricsVerse, NewSong, SongChanges, SongId};

/// A store-owned transaction through which every write of one use case runs.
///
/// Nothing written through a unit of work is visible to other callers until
/// [`commit`](Self::commit) succeeds. Dropping an unfinished unit of work
/// discards its writes.
#[async_trait]
pub trait SongUnitOfWork: Send {
    /// Look up a group by exact name.
    async fn find_group_id(&mut self, name: &str) -> Result<Option<GroupId>, RepositoryError>;

    /// Insert a new group.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if the name is taken.
    async fn insert_group(&mut self, name: &str) -> Result<GroupId, RepositoryError>;

    /// Insert a song row.
    ///
    /// Returns `Err(RepositoryError::AlreadyExists)` if the (title, group)
    /// pair is taken.
    async fn insert_song(&mut self, song: &NewSong) -> Result<SongId, RepositoryError>;

    /// Apply column changes to a song row.
    ///
    /// Empty `changes` are a caller error (`Constraint`). Returns
    /// `NotFound` when no row matched and `AlreadyExists` when the change
    /// collides with another song's (title, group) pair.
    async fn update_song(
        &mut self,
        id: SongId,
        changes: &SongChanges,
    ) -> Result<(), RepositoryError>;

    /// Whether a song row exists.
    async fn song_exists(&mut self, id: SongId) -> Result<bool, RepositoryError>;

    /// Delete a song row.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the song doesn't exist.
    async fn delete_song(&mut self, id: SongId) -> Result<(), RepositoryError>;

    /// Store one verse of a song.
    async fn insert_verse(
        &mut self,
        song_id: SongId,
        verse: &LyricsVerse,
    ) -> Result<(), RepositoryError>;

    /// Remove every verse of a song. Removing zero verses is not an error.
    async fn delete_verses(&mut self, song_id: SongId) -> Result<(), RepositoryError>;

    /// Make every write visible.
    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    /// Discard every write.
    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}
