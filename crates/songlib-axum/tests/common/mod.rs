//! Shared helpers for the router integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use songlib_axum::bootstrap::{AxumContext, CorsConfig};
use songlib_axum::routes::create_router;
use songlib_core::{AppCore, DetailPortError, SongDetail, SongDetailPort};
use songlib_db::TestDb;

/// Detail service stand-in.
///
/// The title `Unreleased` answers 404 and `Bad Date` returns a release date
/// in the wrong format; every other title gets three verses.
pub struct StubDetail;

#[async_trait]
impl SongDetailPort for StubDetail {
    async fn fetch_detail(&self, group: &str, title: &str) -> Result<SongDetail, DetailPortError> {
        match title {
            "Unreleased" => Err(DetailPortError::UnexpectedStatus { status: 404 }),
            "Bad Date" => Ok(SongDetail {
                release_date: "2006-07-16".to_string(),
                text: String::new(),
                link: String::new(),
            }),
            _ => Ok(SongDetail {
                release_date: "16.07.2006".to_string(),
                text: format!("{title} by {group}\nsecond verse\nthird verse"),
                link: format!("https://example.com/{title}"),
            }),
        }
    }
}

/// A router over a fresh in-memory database.
pub async fn test_app() -> Router {
    let db = TestDb::new().await.unwrap();
    let core = AppCore::new(Arc::new(db.song_store()), Arc::new(StubDetail));
    let ctx = AxumContext {
        core: Arc::new(core),
    };
    create_router(ctx, &CorsConfig::AllowAll)
}

/// Send one request and decode the JSON response body.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Create a song through the API and return its ID.
pub async fn create_song(app: &Router, group: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/songs",
        Some(serde_json::json!({"group": group, "title": title})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["data"]["id"].as_str().unwrap().to_string()
}
