//! Periodic upload job scheduling configuration.

use serde::{Deserialize, Serialize};

/// Upload job scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Whether the periodic upload job is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron expression (with seconds field) for the periodic upload job.
    #[serde(default = "default_cron")]
    pub cron: String,
}

fn default_true() -> bool {
    true
}

fn default_cron() -> String {
    "0 */5 * * * *".to_string()
}
