//! Route definitions and router construction.

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Build the API routes without the `/api/v1` prefix.
///
/// The caller applies `.with_state()` before nesting.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/songs",
            get(handlers::songs::list)
                .post(handlers::songs::create)
                .put(handlers::songs::update),
        )
        .route(
            "/songs/{song_id}",
            get(handlers::songs::get).delete(handlers::songs::remove),
        )
        .route("/songs/lyrics/{song_id}", get(handlers::songs::lyrics))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the main router with all routes.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}
