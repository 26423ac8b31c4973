//! Axum-specific error types and mappings.
//!
//! Maps `SongError` and extractor rejections to HTTP status codes and the
//! `{"error": ...}` response body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use songlib_core::SongError;
use thiserror::Error;
use tracing::{debug, error};

/// Message returned for malformed JSON bodies.
pub const INVALID_BODY: &str = "invalid request body";

/// Axum-specific error type.
///
/// Not-found and duplicate songs are reported with status 400, the same as
/// validation failures; only `Internal` maps to 500.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Song not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Song already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error. The message is safe to show to clients.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::NotFound(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            Self::BadRequest(msg) | Self::NotFound(msg) | Self::Conflict(msg) | Self::Internal(msg) => {
                msg
            }
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<SongError> for HttpError {
    fn from(err: SongError) -> Self {
        if !err.is_client_error() {
            error!(error = %err, "Request failed");
        }
        match err {
            SongError::SongNotFound => Self::NotFound(err.to_string()),
            SongError::SongAlreadyExists => Self::Conflict(err.to_string()),
            SongError::Validation(msg) => Self::BadRequest(msg),
            SongError::External(_) | SongError::ReleaseDate { .. } => {
                Self::Internal("failed to fetch song details".to_string())
            }
            SongError::Storage { context, .. } => Self::Internal(format!("failed to {context}")),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest(INVALID_BODY.to_string())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        debug!(error = %rejection.body_text(), "Rejected query string");
        Self::BadRequest("invalid query parameters".to_string())
    }
}
