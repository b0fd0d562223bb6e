#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use energy_monitor::server::{self, AppState, Dashboard};

pub const INDEX_HTML: &str = "<!doctype html><html><body>energy</body></html>";
pub const SCRIPT_JS: &str = "fetch('/data');";

/// fresh state with in-memory dashboard assets
pub fn test_state() -> AppState {
    AppState::new(
        Dashboard {
            index_html: INDEX_HTML.to_string(),
            script_js: SCRIPT_JS.to_string(),
        },
        true,
    )
}

/// router sharing the given state, so tests can inspect the stores
pub fn build_test_app(state: &AppState) -> Router {
    server::router(state.clone())
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST with no content-type header at all
pub async fn post_raw(app: &Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::from(body))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
