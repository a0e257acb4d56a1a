//! ==============================================================================
//! main.rs - tank-monitor entry point
//! ==============================================================================
//!
//! purpose:
//!     receives water tank telemetry from the sensor device and serves a live
//!     dashboard.
//!
//! responsibilities:
//!     - load configuration (server.toml or defaults)
//!     - create the bounded history and the log forwarder
//!     - serve the http api and dashboard
//!     - on ctrl-c: stop accepting requests, then drain the log queue
//!
//! architecture:
//!
//!     ┌──────────────┐  GET /api/sensor-data   ┌───────────────────────────┐
//!     │ tank sensor  │ ──────────────────────▶ │  ingest handler           │
//!     └──────────────┘                         │   ├─▶ BoundedHistory      │
//!                                              │   └─▶ SinkHandle ─┐       │
//!     ┌──────────────┐  GET /api/readings      │                   │       │
//!     │  dashboard   │ ◀────────────────────── │  query handlers   │       │
//!     └──────────────┘  GET /api/latest        └───────────────────┼───────┘
//!                                                                  ▼
//!                                                    log writer (blocking task)
//!                                                                  │
//!                                                                  ▼
//!                                                      water-tank-sensor.log
//!
//! ==============================================================================

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use tank_monitor::{
    logging, router, spawn_forwarder, AppState, BoundedHistory, JsonlFileSink, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = logging::init();
    tracing::info!("=== Water Tank Sensor Server ===");

    // step 1: configuration. an optional first argument names the config file.
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ServerConfig::load_or_default(explicit);
    logging::set_level(&log_level, &config.logging.level);
    config.print_summary();

    // step 2: shared state
    let history = Arc::new(BoundedHistory::new(config.storage.max_readings));
    let file_sink = Arc::new(JsonlFileSink::new(&config.storage.log_file));
    let (sink, log_writer) = spawn_forwarder(file_sink, config.storage.sink_queue_depth);

    let mut state = AppState::new(history, sink);
    state.show_sensor_data = config.logging.show_sensor_data;

    // step 3: serve until ctrl-c
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("[STARTUP] Dashboard: http://localhost:{}/", config.server.port);
    tracing::info!("[STARTUP] Logging data to: {}", config.storage.log_file.display());
    tracing::info!("[STARTUP] Press Ctrl+C to stop");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("web server error")?;

    // the router (and every SinkHandle) is gone; let the writer finish the queue
    tracing::info!("[SHUTDOWN] Flushing log queue...");
    if let Err(e) = log_writer.await {
        tracing::error!("[SHUTDOWN] log writer failed: {}", e);
    }
    tracing::info!("[SHUTDOWN] Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("[SHUTDOWN] Shutting down server..."),
        Err(e) => tracing::error!("[SHUTDOWN] cannot listen for ctrl-c: {}", e),
    }
}
