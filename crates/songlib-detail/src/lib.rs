//! Client for the external song detail service.
//!
//! The service answers `GET {base}/info?group=..&song=..` with the release
//! date, link and full lyrics of a song. [`DefaultDetailClient`] implements
//! the core `SongDetailPort` on top of it; internal HTTP and JSON errors are
//! mapped to `DetailPortError` at the port boundary.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// DefaultDetailClient is used through the SongDetailPort trait, not its
// generic backend parameter
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;
mod url;

pub use client::DefaultDetailClient;
pub use config::DetailClientConfig;
