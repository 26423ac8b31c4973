//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` or `reqwest` types in any signature
//! - Reads go through [`SongStore`]; every write goes through a [`SongUnitOfWork`]
//! - The external detail lookup is an injected [`SongDetailPort`]

pub mod song_detail;
pub mod song_store;
pub mod unit_of_work;

use thiserror::Error;

pub use song_detail::{DetailPortError, SongDetail, SongDetailPort};
pub use song_store::SongStore;
pub use unit_of_work::SongUnitOfWork;

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An entity with the same unique key already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Storage backend error (connection, statement execution, transaction).
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored value could not be decoded into a domain type.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint other than uniqueness was violated (e.g., foreign key).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}
