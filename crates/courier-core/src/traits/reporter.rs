//! Job completion boundary toward the host scheduler.

use async_trait::async_trait;

use crate::types::job::JobHandle;

/// Receives the completion signal of one job invocation.
///
/// Called exactly once per invocation, only after every dispatched upload
/// has reported a terminal outcome. `needs_reschedule` asks the host to run
/// the job again later because retryable work remains queued. The call is
/// not idempotent at the boundary — a double report is a defect.
#[async_trait]
pub trait CompletionReporter: Send + Sync + std::fmt::Debug {
    /// Report that the batch dispatched for `job` has fully drained.
    async fn report_job_finished(&self, job: &JobHandle, needs_reschedule: bool);
}
