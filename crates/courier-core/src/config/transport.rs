//! Upload transport configuration.

use serde::{Deserialize, Serialize};

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Per-request timeout in seconds. No deadline is applied when unset;
    /// a hung request then keeps its batch open until the process restarts.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}
