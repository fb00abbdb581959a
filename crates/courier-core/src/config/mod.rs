//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod cleanup;
pub mod events;
pub mod logging;
pub mod queue;
pub mod scheduler;
pub mod transport;

use serde::{Deserialize, Serialize};

use self::cleanup::CleanupConfig;
use self::events::EventsConfig;
use self::logging::LoggingConfig;
use self::queue::QueueConfig;
use self::scheduler::SchedulerConfig;
use self::transport::TransportConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upload queue persistence settings.
    pub queue: QueueConfig,
    /// Upload transport settings.
    pub transport: TransportConfig,
    /// File cleanup worker settings.
    pub cleanup: CleanupConfig,
    /// Periodic job scheduler settings.
    pub scheduler: SchedulerConfig,
    /// Event broadcast settings.
    pub events: EventsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `COURIER_`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("COURIER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
