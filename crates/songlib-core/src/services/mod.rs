//! Core services - the application's business logic layer.
//!
//! Services here are pure orchestrators over the ports in
//! [`crate::ports`]; they don't know about concrete implementations.

mod app_core;
mod group_resolver;
mod song_service;

#[cfg(test)]
mod fakes;

pub use app_core::AppCore;
pub use group_resolver::resolve_or_create_group;
pub use song_service::{SongError, SongService};
