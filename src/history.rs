//! ==============================================================================
//! history.rs - bounded, arrival-ordered store of readings
//! ==============================================================================
//!
//! purpose:
//!     keeps the last `capacity` readings in memory for the dashboard.
//!     this is the only mutable state shared between request handlers.
//!
//! lock discipline:
//!     - one tokio RwLock guards the ring buffer
//!     - append takes the write lock, snapshot/latest take the read lock
//!     - nothing inside the critical section awaits or does i/o, so a snapshot
//!       can never observe a buffer mid-eviction
//!     - snapshots are copies; a later append cannot touch data already
//!       returned to a caller
//!
//! relationships:
//!     - written by: api.rs (ingest handler)
//!     - read by: api.rs (readings/latest handlers)
//!
//! ==============================================================================

use std::collections::VecDeque;

use tokio::sync::RwLock;

use crate::domain::Reading;

/// default retention when nothing is configured
pub const DEFAULT_MAX_READINGS: usize = 100;

pub struct BoundedHistory {
    capacity: usize,
    readings: RwLock<VecDeque<Reading>>,
}

impl BoundedHistory {
    /// create an empty history holding at most `capacity` readings
    ///
    /// a capacity of zero is raised to one so `latest()` stays meaningful.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            readings: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// insert a reading, evicting the oldest one first when full
    pub async fn append(&self, reading: Reading) {
        let mut readings = self.readings.write().await;
        if readings.len() == self.capacity {
            readings.pop_front();
        }
        readings.push_back(reading);
    }

    /// copy of the current contents, oldest first
    pub async fn snapshot(&self) -> Vec<Reading> {
        let readings = self.readings.read().await;
        readings.iter().copied().collect()
    }

    /// most recently appended reading, if any
    pub async fn latest(&self) -> Option<Reading> {
        self.readings.read().await.back().copied()
    }

    pub async fn len(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.readings.read().await.is_empty()
    }
}

impl Default for BoundedHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_READINGS)
    }
}
