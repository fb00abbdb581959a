//! File cleanup worker configuration.

use serde::{Deserialize, Serialize};

/// File cleanup worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Capacity of the pending delete-task queue.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Seconds to wait for queued deletions to drain on shutdown.
    #[serde(default = "default_shutdown_wait")]
    pub shutdown_wait_seconds: u64,
}

fn default_queue_capacity() -> usize {
    256
}

fn default_shutdown_wait() -> u64 {
    5
}
