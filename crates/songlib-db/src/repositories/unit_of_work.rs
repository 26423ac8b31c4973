//! `SQLite` implementation of the `SongUnitOfWork` port.

use async_trait::async_trait;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use songlib_core::{
    GroupId, LyricsVerse, NewSong, RepositoryError, SongChanges, SongId, SongUnitOfWork,
};

use super::row_mappers::{parse_id, write_error};
use super::song_query::{fold_case, update_query};

/// A write transaction on the song database.
///
/// Statements run on the transaction's connection. Dropping the unit of
/// work without committing rolls the transaction back.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    pub const fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl SongUnitOfWork for SqliteUnitOfWork {
    async fn find_group_id(&mut self, name: &str) -> Result<Option<GroupId>, RepositoryError> {
        let row = sqlx::query("SELECT id FROM groups WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;

        row.map(|r| parse_id(&r, "id")).transpose()
    }

    async fn insert_group(&mut self, name: &str) -> Result<GroupId, RepositoryError> {
        let id = GroupId::generate();
        sqlx::query("INSERT INTO groups (id, name, name_folded) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(name)
            .bind(fold_case(name))
            .execute(&mut *self.tx)
            .await
            .map_err(|e| write_error(e, &format!("group '{name}'")))?;
        Ok(id)
    }

    async fn insert_song(&mut self, song: &NewSong) -> Result<SongId, RepositoryError> {
        let id = SongId::generate();
        sqlx::query(
            "INSERT INTO songs (id, title, title_folded, group_id, release_date, link) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&song.title)
        .bind(fold_case(&song.title))
        .bind(song.group_id.to_string())
        .bind(song.release_date)
        .bind(&song.link)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| write_error(e, &format!("song '{}'", song.title)))?;
        Ok(id)
    }

    async fn update_song(
        &mut self,
        id: SongId,
        changes: &SongChanges,
    ) -> Result<(), RepositoryError> {
        let Some(mut qb) = update_query(id, changes) else {
            return Err(RepositoryError::Constraint(
                "update must change at least one column".to_string(),
            ));
        };
        debug!(song_id = %id, sql = qb.sql(), "Updating song");

        let result = qb
            .build()
            .execute(&mut *self.tx)
            .await
            .map_err(|e| write_error(e, &format!("song {id}")))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("song {id}")));
        }
        Ok(())
    }

    async fn song_exists(&mut self, id: SongId) -> Result<bool, RepositoryError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM songs WHERE id = ?)")
            .bind(id.to_string())
            .fetch_one(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    async fn delete_song(&mut self, id: SongId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM songs WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| write_error(e, &format!("song {id}")))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("song {id}")));
        }
        Ok(())
    }

    async fn insert_verse(
        &mut self,
        song_id: SongId,
        verse: &LyricsVerse,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO lyrics_verses (song_id, verse_number, verse, verse_folded) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(song_id.to_string())
        .bind(i64::from(verse.verse_number))
        .bind(&verse.verse)
        .bind(fold_case(&verse.verse))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| write_error(e, &format!("verse {} of song {song_id}", verse.verse_number)))?;
        Ok(())
    }

    async fn delete_verses(&mut self, song_id: SongId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM lyrics_verses WHERE song_id = ?")
            .bind(song_id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))?;
        debug!(song_id = %song_id, removed = result.rows_affected(), "Deleted verses");
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx
            .commit()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx
            .rollback()
            .await
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}
