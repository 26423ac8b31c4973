//! Domain types for the song catalog.
//!
//! These types are independent of infrastructure concerns (database,
//! HTTP, external services).

mod lyrics;
mod pagination;
mod song;

pub use lyrics::{LyricsVerse, join_verses, split_verses};
pub use pagination::PageRequest;
pub use song::{GroupId, NewSong, Song, SongChanges, SongFilter, SongId, SongUpdate};
