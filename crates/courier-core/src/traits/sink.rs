//! Lifecycle event sink contract.

use async_trait::async_trait;

use crate::events::upload::UploadEvent;

/// Receives upload lifecycle events.
///
/// Emission is fire-and-forget: implementations must never propagate a
/// failure back into the orchestration path.
#[async_trait]
pub trait EventSink: Send + Sync + std::fmt::Debug {
    /// Publish one event.
    async fn emit(&self, event: UploadEvent);
}
