//! Event broadcast configuration.

use serde::{Deserialize, Serialize};

/// Event broadcast channel configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Buffer size of the broadcast channel.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
}

fn default_buffer_size() -> usize {
    256
}
