//! Song service - orchestrates the song lifecycle.
//!
//! Every write use case runs through one [`SongUnitOfWork`]: it is committed
//! when the sequence succeeds and rolled back before any error is returned.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::resolve_or_create_group;
use crate::domain::{
    LyricsVerse, NewSong, PageRequest, Song, SongChanges, SongFilter, SongId, SongUpdate,
    join_verses, split_verses,
};
use crate::ports::{DetailPortError, RepositoryError, SongDetailPort, SongStore, SongUnitOfWork};

/// Date format used by the song detail service.
const DETAIL_DATE_FORMAT: &str = "%d.%m.%Y";

/// Errors returned by song use cases.
#[derive(Debug, Error)]
pub enum SongError {
    #[error("song not found")]
    SongNotFound,

    #[error("song already exists")]
    SongAlreadyExists,

    #[error("{0}")]
    Validation(String),

    #[error("song detail lookup failed: {0}")]
    External(#[from] DetailPortError),

    /// The detail service returned a release date that isn't `DD.MM.YYYY`.
    #[error("invalid release date '{value}' from detail service")]
    ReleaseDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("failed to {context}: {source}")]
    Storage {
        context: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl SongError {
    /// True for failures the caller caused (bad input, unknown or duplicate song).
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SongNotFound | Self::SongAlreadyExists | Self::Validation(_)
        )
    }
}

fn storage(context: &'static str) -> impl FnOnce(RepositoryError) -> SongError {
    move |source| SongError::Storage { context, source }
}

/// Service for song operations.
pub struct SongService {
    store: Arc<dyn SongStore>,
    detail: Arc<dyn SongDetailPort>,
}

impl SongService {
    /// Create a new song service over a store and a detail lookup.
    pub fn new(store: Arc<dyn SongStore>, detail: Arc<dyn SongDetailPort>) -> Self {
        Self { store, detail }
    }

    /// Create a song enriched from the detail service.
    ///
    /// The detail lookup runs before the unit of work is opened, so no write
    /// transaction is held open across the external call. Nothing is stored
    /// unless every step succeeds.
    pub async fn create(&self, group: &str, title: &str) -> Result<SongId, SongError> {
        if group.trim().is_empty() {
            return Err(SongError::Validation("group must not be empty".into()));
        }
        if title.trim().is_empty() {
            return Err(SongError::Validation("title must not be empty".into()));
        }

        debug!(group, title, "Fetching song detail");
        let detail = self.detail.fetch_detail(group, title).await?;
        let release_date = parse_release_date(&detail.release_date)?;

        let mut uow = self.begin().await?;
        let result = async {
            let group_id = resolve_or_create_group(uow.as_mut(), group)
                .await
                .map_err(storage("resolve group"))?;
            let new_song = NewSong {
                title: title.to_string(),
                group_id,
                release_date,
                link: detail.link.clone(),
            };
            let id = uow.insert_song(&new_song).await.map_err(|e| match e {
                RepositoryError::AlreadyExists(_) => SongError::SongAlreadyExists,
                other => SongError::Storage {
                    context: "insert song",
                    source: other,
                },
            })?;
            store_verses(uow.as_mut(), id, &detail.text).await?;
            Ok::<_, SongError>(id)
        }
        .await;

        let id = finish(uow, result).await?;
        info!(song_id = %id, group, title, "Created song");
        Ok(id)
    }

    /// Get a song by ID with its lyrics joined.
    pub async fn get(&self, id: SongId) -> Result<Song, SongError> {
        let mut song = match self.store.get_by_id(id).await {
            Ok(song) => song,
            Err(RepositoryError::NotFound(_)) => return Err(SongError::SongNotFound),
            Err(e) => return Err(storage("load song")(e)),
        };
        song.lyrics = self.lyrics_of(id).await?;
        Ok(song)
    }

    /// Search songs, each with its lyrics joined, in query order.
    pub async fn search(&self, filter: &SongFilter) -> Result<Vec<Song>, SongError> {
        debug!(?filter, "Searching songs");
        let mut songs = self
            .store
            .search(filter)
            .await
            .map_err(storage("search songs"))?;
        for song in &mut songs {
            song.lyrics = self.lyrics_of(song.id).await?;
        }
        Ok(songs)
    }

    /// Apply a partial update.
    ///
    /// An update without any field is rejected. A group name is resolved (or
    /// created) first. When only lyrics are supplied the song must exist.
    /// Supplied lyrics replace every verse, renumbered from 1.
    pub async fn update(&self, update: &SongUpdate) -> Result<(), SongError> {
        if update.is_empty() {
            return Err(SongError::Validation("no fields to update".into()));
        }

        let mut uow = self.begin().await?;
        let result = apply_update(uow.as_mut(), update).await;
        finish(uow, result).await?;

        info!(song_id = %update.id, "Updated song");
        Ok(())
    }

    /// Delete a song and all of its verses.
    pub async fn delete(&self, id: SongId) -> Result<(), SongError> {
        let mut uow = self.begin().await?;
        let result = remove_song(uow.as_mut(), id).await;
        finish(uow, result).await?;

        info!(song_id = %id, "Deleted song");
        Ok(())
    }

    /// One page of a song's verses.
    ///
    /// An unknown song, or a page past the last verse, yields an empty list.
    pub async fn lyrics_page(
        &self,
        id: SongId,
        page: PageRequest,
    ) -> Result<Vec<LyricsVerse>, SongError> {
        if page.page == 0 || page.limit == 0 {
            return Err(SongError::Validation(
                "page and limit must be at least 1".into(),
            ));
        }
        self.store
            .list_verses_page(id, page.limit, page.offset())
            .await
            .map_err(storage("load verses"))
    }

    async fn lyrics_of(&self, id: SongId) -> Result<String, SongError> {
        let verses = self
            .store
            .list_verses(id)
            .await
            .map_err(storage("load verses"))?;
        Ok(join_verses(&verses))
    }

    async fn begin(&self) -> Result<Box<dyn SongUnitOfWork>, SongError> {
        self.store
            .begin()
            .await
            .map_err(storage("begin transaction"))
    }
}

fn parse_release_date(value: &str) -> Result<NaiveDate, SongError> {
    NaiveDate::parse_from_str(value.trim(), DETAIL_DATE_FORMAT).map_err(|source| {
        SongError::ReleaseDate {
            value: value.to_string(),
            source,
        }
    })
}

async fn store_verses(
    uow: &mut dyn SongUnitOfWork,
    song_id: SongId,
    text: &str,
) -> Result<(), SongError> {
    let verses = split_verses(text);
    debug!(song_id = %song_id, count = verses.len(), "Storing verses");
    for verse in &verses {
        uow.insert_verse(song_id, verse)
            .await
            .map_err(storage("insert verse"))?;
    }
    Ok(())
}

async fn apply_update(uow: &mut dyn SongUnitOfWork, update: &SongUpdate) -> Result<(), SongError> {
    let group_id = match update.group_name.as_deref() {
        Some(name) => Some(
            resolve_or_create_group(uow, name)
                .await
                .map_err(storage("resolve group"))?,
        ),
        None => None,
    };

    let changes = SongChanges {
        title: update.title.clone(),
        release_date: update.release_date,
        group_id,
        link: update.link.clone(),
    };

    if changes.is_empty() {
        let exists = uow
            .song_exists(update.id)
            .await
            .map_err(storage("check song"))?;
        if !exists {
            return Err(SongError::SongNotFound);
        }
    } else {
        uow.update_song(update.id, &changes)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound(_) => SongError::SongNotFound,
                RepositoryError::AlreadyExists(_) => SongError::SongAlreadyExists,
                other => SongError::Storage {
                    context: "update song",
                    source: other,
                },
            })?;
    }

    if let Some(lyrics) = &update.lyrics {
        uow.delete_verses(update.id)
            .await
            .map_err(storage("delete verses"))?;
        store_verses(uow, update.id, lyrics).await?;
    }
    Ok(())
}

async fn remove_song(uow: &mut dyn SongUnitOfWork, id: SongId) -> Result<(), SongError> {
    uow.delete_verses(id)
        .await
        .map_err(storage("delete verses"))?;
    uow.delete_song(id).await.map_err(|e| match e {
        RepositoryError::NotFound(_) => SongError::SongNotFound,
        other => SongError::Storage {
            context: "delete song",
            source: other,
        },
    })
}

/// Commit on success, roll back on failure.
async fn finish<T>(
    uow: Box<dyn SongUnitOfWork>,
    result: Result<T, SongError>,
) -> Result<T, SongError> {
    match result {
        Ok(value) => {
            uow.commit().await.map_err(storage("commit transaction"))?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = uow.rollback().await {
                warn!(error = %rollback, "Rollback failed");
            }
            debug!(error = %e, "Rolled back song write");
            Err(e)
        }
    }
}
