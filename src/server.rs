//! ==============================================================================
//! server.rs - HTTP surface
//! ==============================================================================
//!
//! purpose:
//!     the web side of the monitor. a publisher posts readings, the dashboard
//!     polls them back, an operator posts advisory limits.
//!
//! routes:
//!     GET  /                  dashboard page (templates/index.html)
//!     GET  /static/script.js  dashboard script (templates/script.js)
//!     POST /data              replace the current reading
//!     GET  /data              current reading as json
//!     POST /set-limits        replace the advisory limits
//!
//! request bodies are taken as raw bytes and parsed leniently (see domain.rs),
//! so a missing content-type or a broken body still gets a 200. the default
//! 2 MB body limit is lifted on the POST routes for the same reason. limits are
//! stored but no route reads them back or checks readings against them.
//!
//! relationships:
//!     - uses: store.rs (SensorStore, LimitStore)
//!     - uses: domain.rs (Reading, LimitSet parsing)
//!     - used by: main.rs (run), tests/http_api.rs (router)
//!
//! ==============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::header,
    response::{Html, IntoResponse, Json},
    routing::get,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::domain::{LimitSet, Reading};
use crate::store::{LimitStore, SensorStore};

pub const DATA_RECEIVED: &str = "Data received successfully!";
pub const LIMITS_SET: &str = "Limits set successfully!";

// ==============================================================================
// dashboard assets
// ==============================================================================

/// page and script, read once at startup
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub index_html: String,
    pub script_js: String,
}

impl Dashboard {
    /// read `index.html` and `script.js` from `dir`
    ///
    /// a missing file is a configuration error, so it fails here rather
    /// than on the first request.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| {
            let path = dir.join(name);
            std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read dashboard template {}", path.display()))
        };
        Ok(Self {
            index_html: read("index.html")?,
            script_js: read("script.js")?,
        })
    }
}

// ==============================================================================
// shared state
// ==============================================================================

#[derive(Clone)]
pub struct AppState {
    pub sensors: SensorStore,
    pub limits: LimitStore,
    pub dashboard: Arc<Dashboard>,
    /// log each reading at info rather than debug
    pub show_sensor_data: bool,
}

impl AppState {
    /// fresh stores: zero reading, no limits
    pub fn new(dashboard: Dashboard, show_sensor_data: bool) -> Self {
        Self {
            sensors: SensorStore::default(),
            limits: LimitStore::default(),
            dashboard: Arc::new(dashboard),
            show_sensor_data,
        }
    }
}

// ==============================================================================
// web server
// ==============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/static/script.js", get(script_handler))
        .route(
            "/data",
            get(fetch_reading_handler)
                .post(ingest_reading_handler)
                .layer(DefaultBodyLimit::disable()),
        )
        .route(
            "/set-limits",
            post(set_limits_handler).layer(DefaultBodyLimit::disable()),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// bind `addr` and serve until `shutdown` resolves
pub async fn run<F>(addr: SocketAddr, state: AppState, shutdown: F) -> Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("[STARTUP] Dashboard live at http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn dashboard_handler(State(state): State<AppState>) -> Html<String> {
    Html(state.dashboard.index_html.clone())
}

async fn script_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        state.dashboard.script_js.clone(),
    )
}

/// POST /data - overwrite the current reading
async fn ingest_reading_handler(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let reading = Reading::from_body(&body);

    if state.show_sensor_data {
        let [c, v, p, e] = reading.values();
        tracing::info!(
            "[DATA] Current: {:.2}A | Voltage: {:.2}V | Power: {:.2}W | Energy: {:.4}kWh",
            c.1, v.1, p.1, e.1
        );
    } else {
        tracing::debug!("[DATA] {:?}", reading);
    }

    state.sensors.replace(reading).await;
    Json(json!({ "message": DATA_RECEIVED }))
}

/// GET /data - current reading, zeros if nothing was posted yet
async fn fetch_reading_handler(State(state): State<AppState>) -> Json<Reading> {
    Json(state.sensors.snapshot().await)
}

/// POST /set-limits - overwrite all four limits
async fn set_limits_handler(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    let limits = LimitSet::from_body(&body);
    tracing::info!("[LIMITS] {} of 4 limits set: {:?}", limits.set_count(), limits);

    state.limits.replace(limits).await;
    Json(json!({ "message": LIMITS_SET }))
}
