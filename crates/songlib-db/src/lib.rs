//! `SQLite` storage for songlib.
//!
//! Provides schema setup, the [`SqliteSongStore`] implementation of the
//! core `SongStore` port and the [`SqliteUnitOfWork`] every write runs
//! through. `sqlx` types never leave this crate.

pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use repositories::{SqliteSongStore, SqliteUnitOfWork};

pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;
