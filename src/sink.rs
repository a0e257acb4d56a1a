//! ==============================================================================
//! sink.rs - append-only log of every accepted reading
//! ==============================================================================
//!
//! purpose:
//!     the in-memory history is lost on restart; the log file is the durable
//!     record. writing it is best-effort and must never stall ingestion.
//!
//! design:
//!     - LogSink: the capability `append(record)`, implemented by JsonlFileSink
//!     - SinkHandle: what handlers hold. `forward()` is a `try_send` on a
//!       bounded channel, so it never waits on the disk
//!     - the forwarder: one blocking worker draining the channel into the sink,
//!       logging and swallowing failures
//!
//! ==============================================================================

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use crate::domain::Reading;
use crate::error::SinkError;

pub trait LogSink: Send + Sync + 'static {
    fn append(&self, reading: &Reading) -> Result<(), SinkError>;
}

/// newline-delimited JSON, one reading per line
pub struct JsonlFileSink {
    path: PathBuf,
}

impl JsonlFileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogSink for JsonlFileSink {
    fn append(&self, reading: &Reading) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(reading)?;
        line.push(b'\n');

        // reopened per record so a rotated or deleted file is picked up
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&line)?;
        Ok(())
    }
}

/// cheap, clonable sender side of the forwarder
#[derive(Clone)]
pub struct SinkHandle {
    tx: mpsc::Sender<Reading>,
}

impl SinkHandle {
    /// queue a reading for the log without waiting
    ///
    /// returns false when the record was dropped.
    pub fn forward(&self, reading: Reading) -> bool {
        match self.tx.try_send(reading) {
            Ok(()) => true,
            Err(TrySendError::Full(r)) => {
                tracing::warn!("[LOG] backlog full, dropping reading from {}", r.timestamp);
                false
            }
            Err(TrySendError::Closed(r)) => {
                tracing::warn!("[LOG] writer stopped, dropping reading from {}", r.timestamp);
                false
            }
        }
    }
}

/// start the background writer
///
/// the returned task finishes once every `SinkHandle` clone is dropped and
/// the queue has been drained.
pub fn spawn_forwarder(sink: Arc<dyn LogSink>, queue_depth: usize) -> (SinkHandle, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<Reading>(queue_depth.max(1));

    // file i/o is blocking, keep it off the async workers
    let worker = tokio::task::spawn_blocking(move || {
        while let Some(reading) = rx.blocking_recv() {
            if let Err(e) = sink.append(&reading) {
                tracing::warn!("[LOG] Warning: could not write to log file: {}", e);
            }
        }
        tracing::debug!("[LOG] writer drained");
    });

    (SinkHandle { tx }, worker)
}
