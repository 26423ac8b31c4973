//! Core domain types, ports and services for the song catalog.
//!
//! This crate owns everything the adapters agree on: the song, group and
//! verse types, the storage and song-detail ports, and `SongService`, which
//! sequences group resolution, enrichment and the lyric writes of each use
//! case through one unit of work. It knows nothing about SQL, HTTP or the
//! wire format of the detail service.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    GroupId, LyricsVerse, NewSong, PageRequest, Song, SongChanges, SongFilter, SongId, SongUpdate,
    join_verses, split_verses,
};
pub use ports::{
    DetailPortError, RepositoryError, SongDetail, SongDetailPort, SongStore, SongUnitOfWork,
};
pub use services::{AppCore, SongError, SongService, resolve_or_create_group};
