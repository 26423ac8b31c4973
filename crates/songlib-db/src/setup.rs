//! Database setup and initialization.
//!
//! `setup_database()` opens the pool and ensures the schema exists. There is
//! no migration framework: every statement is `IF NOT EXISTS` and safe to
//! run on each start.
//!
//! Searchable text is stored twice: as written, and lowercased in a
//! `*_folded` column. `SQLite`'s `LIKE` only folds ASCII, so substring
//! searches match the folded copy against a lowercased needle.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{debug, info};

/// How long a connection waits for another writer before giving up.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the database at `database_url` and ensure the schema exists.
///
/// Accepts any `sqlx` `SQLite` URL, e.g. `sqlite://songlib.db` or
/// `sqlite::memory:`. File databases are created if missing and run in WAL
/// mode, so readers are not blocked by the single writer. Foreign keys are
/// enforced on every connection.
///
/// An in-memory database only lives as long as its connections, so it is
/// served from a single connection that is never recycled.
///
/// # Example
///
/// ```rust,no_run
/// use songlib_db::setup_database;
///
/// # async fn example() -> anyhow::Result<()> {
/// let pool = setup_database("sqlite://songlib.db").await?;
/// # Ok(())
/// # }
/// ```
pub async fn setup_database(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database URL '{database_url}'"))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = if is_in_memory(database_url) {
        single_connection_pool(options).await?
    } else {
        SqlitePool::connect_with(options.journal_mode(SqliteJournalMode::Wal))
            .await
            .with_context(|| format!("failed to open database '{database_url}'"))?
    };

    create_schema(&pool).await?;
    info!(database_url, "Database ready");
    Ok(pool)
}

/// Sets up an in-memory `SQLite` database for testing.
///
/// Creates a fresh in-memory database with the full production schema.
#[cfg(any(test, feature = "test-utils"))]
pub async fn setup_test_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = single_connection_pool(options).await?;
    create_schema(&pool).await?;
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

async fn single_connection_pool(options: SqliteConnectOptions) -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .context("failed to open in-memory database")?;
    Ok(pool)
}

/// Creates the complete database schema.
async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS groups (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL UNIQUE,
            name_folded TEXT NOT NULL
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS songs (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            title_folded TEXT NOT NULL,
            group_id TEXT NOT NULL REFERENCES groups(id),
            release_date TEXT NOT NULL,
            link TEXT NOT NULL DEFAULT '',
            UNIQUE (title, group_id)
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS lyrics_verses (
            song_id TEXT NOT NULL REFERENCES songs(id) ON DELETE CASCADE,
            verse_number INTEGER NOT NULL,
            verse TEXT NOT NULL,
            verse_folded TEXT NOT NULL,
            PRIMARY KEY (song_id, verse_number)
        )
        ",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_release_date ON songs(release_date)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_songs_group_id ON songs(group_id)")
        .execute(pool)
        .await?;

    debug!("Schema ensured");
    Ok(())
}
