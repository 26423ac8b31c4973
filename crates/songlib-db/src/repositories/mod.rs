//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod song_query;
mod sqlite_song_store;
mod unit_of_work;

pub use sqlite_song_store::SqliteSongStore;
pub use unit_of_work::SqliteUnitOfWork;
