//! `SQLite` implementation of the `SongStore` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use songlib_core::{
    LyricsVerse, RepositoryError, Song, SongFilter, SongId, SongStore, SongUnitOfWork,
};

use super::row_mappers::{SONG_SELECT_COLUMNS, row_to_song, row_to_verse};
use super::song_query::search_query;
use super::unit_of_work::SqliteUnitOfWork;

/// `SQLite` implementation of the `SongStore` trait.
///
/// Reads run directly on the pool; writes go through a
/// [`SqliteUnitOfWork`] obtained from [`SongStore::begin`].
pub struct SqliteSongStore {
    pool: SqlitePool,
}

impl SqliteSongStore {
    /// Create a new `SQLite` song store.
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SongStore for SqliteSongStore {
    async fn get_by_id(&self, id: SongId) -> Result<Song, RepositoryError> {
        let query = format!(
            "SELECT {SONG_SELECT_COLUMNS} FROM songs s \
             JOIN groups g ON g.id = s.group_id WHERE s.id = ?"
        );
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?
            .ok_or_else(|| RepositoryError::NotFound(format!("song {id}")))?;

        row_to_song(&row)
    }

    async fn search(&self, filter: &SongFilter) -> Result<Vec<Song>, RepositoryError> {
        let mut qb = search_query(filter);
        debug!(sql = qb.sql(), "Searching songs");

        let rows = qb
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_song).collect()
    }

    async fn list_verses(&self, song_id: SongId) -> Result<Vec<LyricsVerse>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT verse_number, verse FROM lyrics_verses \
             WHERE song_id = ? ORDER BY verse_number ASC",
        )
        .bind(song_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_verse).collect()
    }

    async fn list_verses_page(
        &self,
        song_id: SongId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LyricsVerse>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT verse_number, verse FROM lyrics_verses \
             WHERE song_id = ? ORDER BY verse_number ASC LIMIT ? OFFSET ?",
        )
        .bind(song_id.to_string())
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        rows.iter().map(row_to_verse).collect()
    }

    /// Opens the transaction with `BEGIN IMMEDIATE`: the write lock is taken
    /// up front, so concurrent units of work queue on the busy timeout
    /// instead of failing when a read lock would have to be upgraded.
    async fn begin(&self) -> Result<Box<dyn SongUnitOfWork>, RepositoryError> {
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        Ok(Box::new(SqliteUnitOfWork::new(tx)))
    }
}
