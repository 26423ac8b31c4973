//! In-memory port implementations for service tests.
//!
//! `FakeStore` keeps a committed state behind a mutex; each unit of work
//! edits a private copy that replaces the committed state on commit, so
//! rollback and drop discard writes the way a database transaction does.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{
    GroupId, LyricsVerse, NewSong, Song, SongChanges, SongFilter, SongId,
};
use crate::ports::{
    DetailPortError, RepositoryError, SongDetail, SongDetailPort, SongStore, SongUnitOfWork,
};

#[derive(Debug, Clone)]
struct StoredSong {
    id: SongId,
    title: String,
    group_id: GroupId,
    release_date: NaiveDate,
    link: String,
}

#[derive(Debug, Clone, Default)]
struct State {
    groups: Vec<(GroupId, String)>,
    songs: Vec<StoredSong>,
    verses: BTreeMap<(SongId, u32), String>,
}

impl State {
    fn group_name(&self, id: GroupId) -> String {
        self.groups
            .iter()
            .find(|(g, _)| *g == id)
            .map(|(_, name)| name.clone())
            .unwrap_or_default()
    }

    fn to_song(&self, row: &StoredSong) -> Song {
        Song {
            id: row.id,
            title: row.title.clone(),
            group_name: self.group_name(row.group_id),
            release_date: row.release_date,
            link: row.link.clone(),
            lyrics: String::new(),
        }
    }

    fn verses_of(&self, song_id: SongId) -> Vec<LyricsVerse> {
        self.verses
            .range((song_id, 0)..=(song_id, u32::MAX))
            .map(|((_, n), v)| LyricsVerse::new(*n, v.clone()))
            .collect()
    }
}

#[derive(Default)]
struct Shared {
    committed: State,
    commits: usize,
    rollbacks: usize,
    race_groups: Vec<String>,
    fail_verse_inserts: bool,
}

#[derive(Clone, Default)]
pub struct FakeStore {
    shared: Arc<Mutex<Shared>>,
}

impl FakeStore {
    pub fn seed_group(&self, name: &str) -> GroupId {
        let id = GroupId::generate();
        self.shared
            .lock()
            .unwrap()
            .committed
            .groups
            .push((id, name.to_string()));
        id
    }

    pub fn group_count(&self) -> usize {
        self.shared.lock().unwrap().committed.groups.len()
    }

    pub fn group_id(&self, name: &str) -> Option<GroupId> {
        self.shared
            .lock()
            .unwrap()
            .committed
            .groups
            .iter()
            .find(|(_, n)| n == name)
            .map(|(id, _)| *id)
    }

    pub fn song_count(&self) -> usize {
        self.shared.lock().unwrap().committed.songs.len()
    }

    pub fn verse_texts(&self, song_id: SongId) -> Vec<String> {
        self.shared
            .lock()
            .unwrap()
            .committed
            .verses_of(song_id)
            .into_iter()
            .map(|v| v.verse)
            .collect()
    }

    pub fn commits(&self) -> usize {
        self.shared.lock().unwrap().commits
    }

    pub fn rollbacks(&self) -> usize {
        self.shared.lock().unwrap().rollbacks
    }

    /// The next insert of `name` behaves as if another writer committed it first.
    pub fn race_on_group_insert(&self, name: &str) {
        self.shared
            .lock()
            .unwrap()
            .race_groups
            .push(name.to_string());
    }

    pub fn fail_verse_inserts(&self) {
        self.shared.lock().unwrap().fail_verse_inserts = true;
    }
}

#[async_trait]
impl SongStore for FakeStore {
    async fn get_by_id(&self, id: SongId) -> Result<Song, RepositoryError> {
        let shared = self.shared.lock().unwrap();
        let state = &shared.committed;
        state
            .songs
            .iter()
            .find(|s| s.id == id)
            .map(|s| state.to_song(s))
            .ok_or_else(|| RepositoryError::NotFound(format!("song {id}")))
    }

    async fn search(&self, filter: &SongFilter) -> Result<Vec<Song>, RepositoryError> {
        let shared = self.shared.lock().unwrap();
        let state = &shared.committed;
        let contains = |hay: &str, needle: &Option<String>| {
            needle
                .as_deref()
                .filter(|n| !n.is_empty())
                .is_none_or(|n| hay.to_lowercase().contains(&n.to_lowercase()))
        };

        let mut rows: Vec<&StoredSong> = state
            .songs
            .iter()
            .filter(|s| contains(&s.title, &filter.title))
            .filter(|s| contains(&state.group_name(s.group_id), &filter.group))
            .filter(|s| {
                filter
                    .link
                    .as_deref()
                    .filter(|l| !l.is_empty())
                    .is_none_or(|l| s.link == l)
            })
            .filter(|s| {
                state
                    .verses_of(s.id)
                    .iter()
                    .any(|v| contains(&v.verse, &filter.text))
                    || filter.text.as_deref().is_none_or(str::is_empty)
            })
            .filter(|s| filter.released_from.is_none_or(|d| s.release_date >= d))
            .filter(|s| filter.released_to.is_none_or(|d| s.release_date <= d))
            .collect();
        rows.sort_by_key(|s| s.id);

        let take = if filter.limit == 0 {
            usize::MAX
        } else {
            filter.limit as usize
        };
        Ok(rows
            .into_iter()
            .skip(filter.offset as usize)
            .take(take)
            .map(|s| state.to_song(s))
            .collect())
    }

    async fn list_verses(&self, song_id: SongId) -> Result<Vec<LyricsVerse>, RepositoryError> {
        Ok(self.shared.lock().unwrap().committed.verses_of(song_id))
    }

    async fn list_verses_page(
        &self,
        song_id: SongId,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<LyricsVerse>, RepositoryError> {
        Ok(self
            .shared
            .lock()
            .unwrap()
            .committed
            .verses_of(song_id)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn SongUnitOfWork>, RepositoryError> {
        let working = self.shared.lock().unwrap().committed.clone();
        Ok(Box::new(FakeUnitOfWork {
            shared: Arc::clone(&self.shared),
            working,
        }))
    }
}

struct FakeUnitOfWork {
    shared: Arc<Mutex<Shared>>,
    working: State,
}

#[async_trait]
impl SongUnitOfWork for FakeUnitOfWork {
    async fn find_group_id(&mut self, name: &str) -> Result<Option<GroupId>, RepositoryError> {
        Ok(self
            .working
            .groups
            .iter()
            .find(|(_, n)| n == name)
            .map(|(id, _)| *id))
    }

    async fn insert_group(&mut self, name: &str) -> Result<GroupId, RepositoryError> {
        let raced = {
            let mut shared = self.shared.lock().unwrap();
            let pos = shared.race_groups.iter().position(|n| n == name);
            pos.map(|p| shared.race_groups.remove(p)).is_some()
        };
        if raced {
            let winner = (GroupId::generate(), name.to_string());
            self.shared
                .lock()
                .unwrap()
                .committed
                .groups
                .push(winner.clone());
            self.working.groups.push(winner);
        }
        if self.working.groups.iter().any(|(_, n)| n == name) {
            return Err(RepositoryError::AlreadyExists(format!("group '{name}'")));
        }
        let id = GroupId::generate();
        self.working.groups.push((id, name.to_string()));
        Ok(id)
    }

    async fn insert_song(&mut self, song: &NewSong) -> Result<SongId, RepositoryError> {
        if self
            .working
            .songs
            .iter()
            .any(|s| s.title == song.title && s.group_id == song.group_id)
        {
            return Err(RepositoryError::AlreadyExists(format!(
                "song '{}'",
                song.title
            )));
        }
        let id = SongId::generate();
        self.working.songs.push(StoredSong {
            id,
            title: song.title.clone(),
            group_id: song.group_id,
            release_date: song.release_date,
            link: song.link.clone(),
        });
        Ok(id)
    }

    async fn update_song(
        &mut self,
        id: SongId,
        changes: &SongChanges,
    ) -> Result<(), RepositoryError> {
        if changes.is_empty() {
            return Err(RepositoryError::Constraint("no columns to update".into()));
        }
        let current = self
            .working
            .songs
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("song {id}")))?;

        let title = changes.title.clone().unwrap_or(current.title);
        let group_id = changes.group_id.unwrap_or(current.group_id);
        if self
            .working
            .songs
            .iter()
            .any(|s| s.id != id && s.title == title && s.group_id == group_id)
        {
            return Err(RepositoryError::AlreadyExists(format!("song '{title}'")));
        }

        let row = self
            .working
            .songs
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepositoryError::NotFound(format!("song {id}")))?;
        row.title = title;
        row.group_id = group_id;
        if let Some(date) = changes.release_date {
            row.release_date = date;
        }
        if let Some(link) = &changes.link {
            row.link.clone_from(link);
        }
        Ok(())
    }

    async fn song_exists(&mut self, id: SongId) -> Result<bool, RepositoryError> {
        Ok(self.working.songs.iter().any(|s| s.id == id))
    }

    async fn delete_song(&mut self, id: SongId) -> Result<(), RepositoryError> {
        let before = self.working.songs.len();
        self.working.songs.retain(|s| s.id != id);
        if self.working.songs.len() == before {
            return Err(RepositoryError::NotFound(format!("song {id}")));
        }
        self.working.verses.retain(|(song, _), _| *song != id);
        Ok(())
    }

    async fn insert_verse(
        &mut self,
        song_id: SongId,
        verse: &LyricsVerse,
    ) -> Result<(), RepositoryError> {
        if self.shared.lock().unwrap().fail_verse_inserts {
            return Err(RepositoryError::Storage("disk I/O error".into()));
        }
        self.working
            .verses
            .insert((song_id, verse.verse_number), verse.verse.clone());
        Ok(())
    }

    async fn delete_verses(&mut self, song_id: SongId) -> Result<(), RepositoryError> {
        self.working.verses.retain(|(song, _), _| *song != song_id);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let mut shared = self.shared.lock().unwrap();
        shared.committed = self.working;
        shared.commits += 1;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.shared.lock().unwrap().rollbacks += 1;
        Ok(())
    }
}

pub enum FakeResponse {
    Detail(SongDetail),
    Status(u16),
}

/// Detail port answering every lookup with the same canned response.
pub struct FakeDetail {
    response: FakeResponse,
    calls: AtomicUsize,
}

impl FakeDetail {
    pub fn returning(release_date: &str, text: &str, link: &str) -> Self {
        Self {
            response: FakeResponse::Detail(SongDetail {
                release_date: release_date.to_string(),
                text: text.to_string(),
                link: link.to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            response: FakeResponse::Status(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SongDetailPort for FakeDetail {
    async fn fetch_detail(
        &self,
        _group: &str,
        _title: &str,
    ) -> Result<SongDetail, DetailPortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            FakeResponse::Detail(detail) => Ok(detail.clone()),
            FakeResponse::Status(status) => {
                Err(DetailPortError::UnexpectedStatus { status: *status })
            }
        }
    }
}
