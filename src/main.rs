//! ==============================================================================
//! main.rs - energy monitor entry point
//! ==============================================================================
//!
//! purpose:
//!     starts the HTTP surface: a publisher posts readings to /data, the
//!     dashboard polls them back, an operator posts limits to /set-limits.
//!
//! startup:
//!     1. load monitor.toml (or defaults)
//!     2. install the tracing subscriber
//!     3. read the dashboard templates (fatal if missing)
//!     4. serve until ctrl-c / sigterm
//!
//!     ┌──────────────┐  POST /data        ┌──────────────────────────┐
//!     │  publisher   │ ─────────────────> │                          │
//!     └──────────────┘                    │   axum router            │
//!     ┌──────────────┐  GET / , /data     │   ├─ SensorStore         │
//!     │  dashboard   │ <────────────────> │   └─ LimitStore          │
//!     └──────────────┘                    │                          │
//!     ┌──────────────┐  POST /set-limits  │                          │
//!     │  operator    │ ─────────────────> │                          │
//!     └──────────────┘                    └──────────────────────────┘
//!
//! ==============================================================================

use anyhow::Result;
use energy_monitor::config::MonitorConfig;
use energy_monitor::server::{self, AppState, Dashboard};

#[tokio::main]
async fn main() -> Result<()> {
    // step 1: load configuration
    let config = MonitorConfig::from_env_or_default()?;

    // step 2: logging
    energy_monitor::init_tracing(&config.logging.level);
    tracing::info!("[STARTUP] Energy monitor v{}", env!("CARGO_PKG_VERSION"));
    config.print_summary();

    // step 3: dashboard templates
    // a missing template ends startup here; anyhow prints the error on exit
    let dashboard = Dashboard::load(&config.dashboard.template_dir)?;

    // step 4: shared state and server
    let state = AppState::new(dashboard, config.logging.show_sensor_data);

    let addr = config.server.socket_addr()?;
    server::run(addr, state, shutdown_signal()).await?;

    tracing::info!("[SHUTDOWN] Server stopped");
    Ok(())
}

/// resolves on ctrl-c, or sigterm on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("[ERROR] Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("[ERROR] Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("[SHUTDOWN] Received Ctrl-C"),
        () = terminate => tracing::info!("[SHUTDOWN] Received SIGTERM"),
    }
}
