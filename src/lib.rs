//! water tank telemetry server
//!
//! a sensor device pushes readings over plain GET requests; the server keeps a
//! bounded in-memory history for the dashboard and appends every reading to a
//! newline-delimited JSON log.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod history;
pub mod ingest;
pub mod logging;
pub mod sink;

use std::sync::Arc;

pub use api::router;
pub use config::ServerConfig;
pub use domain::{IngestResponse, Reading};
pub use error::{ApiError, SinkError};
pub use history::BoundedHistory;
pub use sink::{spawn_forwarder, JsonlFileSink, LogSink, SinkHandle};

// ==============================================================================
// shared state
// ==============================================================================
// handed to every request handler by axum. cloning is cheap:
// - history: one store for the whole process, owned here rather than global
// - sink: sender half of the log forwarder

#[derive(Clone)]
pub struct AppState {
    pub history: Arc<BoundedHistory>,
    pub sink: SinkHandle,
    /// log one console line per accepted reading
    pub show_sensor_data: bool,
}

impl AppState {
    pub fn new(history: Arc<BoundedHistory>, sink: SinkHandle) -> Self {
        Self {
            history,
            sink,
            show_sensor_data: true,
        }
    }
}
