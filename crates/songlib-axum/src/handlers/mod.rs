//! HTTP request handlers for the Axum web server.
//!
//! Handlers are thin wrappers: they validate and convert the request,
//! delegate to `SongService` and wrap the result in an `ApiResponse`.

pub mod songs;
