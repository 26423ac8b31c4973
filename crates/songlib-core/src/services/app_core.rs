//! `AppCore` - the primary application facade.
//!
//! Adapters receive an `AppCore` instance and use it to access all
//! functionality.

use std::sync::Arc;

use super::SongService;
use crate::ports::{SongDetailPort, SongStore};

/// The core application facade.
///
/// Constructed at the adapter's composition root with a concrete store
/// and detail lookup.
///
/// # Example
///
/// ```ignore
/// let store = songlib_db::factory::CoreFactory::song_store(pool);
/// let detail = Arc::new(DefaultDetailClient::new(config)?);
/// let core = AppCore::new(store, detail);
///
/// let song = core.songs().get(id).await?;
/// ```
pub struct AppCore {
    songs: SongService,
}

impl AppCore {
    pub fn new(store: Arc<dyn SongStore>, detail: Arc<dyn SongDetailPort>) -> Self {
        Self {
            songs: SongService::new(store, detail),
        }
    }

    /// Access the song service.
    pub const fn songs(&self) -> &SongService {
        &self.songs
    }
}
