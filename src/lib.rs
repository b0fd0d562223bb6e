//! ==============================================================================
//! energy-monitor - telemetry endpoint for a single energy sensor
//! ==============================================================================
//!
//! modules:
//!     - config: monitor.toml schema and loader
//!     - domain: Reading / LimitSet and their lenient body parsers
//!     - store: in-memory stores (snapshot / replace only)
//!     - server: axum router and handlers
//!     - tips: one-shot sqlite tip seeder
//!
//! binaries:
//!     - energy-monitor (src/main.rs): the HTTP server
//!     - seed-tips (src/bin/seed_tips.rs): the seeder
//!
//! ==============================================================================

pub mod config;
pub mod domain;
pub mod server;
pub mod store;
pub mod tips;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// install the global fmt subscriber
///
/// RUST_LOG wins when set; otherwise `default_level` applies to this crate
/// and tower_http.
pub fn init_tracing(default_level: &str) {
    let fallback = format!("energy_monitor={0},seed_tips={0},tower_http={0}", default_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
