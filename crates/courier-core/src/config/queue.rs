//! Upload queue persistence configuration.

use serde::{Deserialize, Serialize};

/// Upload queue store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Path of the JSON file the queue is persisted to.
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "data/queue/uploads.json".to_string()
}
