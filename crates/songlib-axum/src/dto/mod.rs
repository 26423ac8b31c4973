//! Data Transfer Objects (DTOs) for HTTP API contract.
//!
//! These types define the stable HTTP API contract with explicit serialization
//! control. They decouple internal domain types from external API representation.

pub mod query;
pub mod songs;

use serde::Serialize;

pub use query::{LyricsPageQuery, SongListQuery};
pub use songs::{CreateSongRequest, CreatedSong, SongDto, UpdateSongRequest, VerseDto};

/// Envelope for every successful response.
///
/// `data` serializes as `null` when it is `()`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: &'static str,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub const fn new(message: &'static str, data: T) -> Self {
        Self { message, data }
    }
}
