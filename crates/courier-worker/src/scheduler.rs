//! Cron scheduler that triggers batch runs — the host side of the
//! job-scheduling boundary.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use courier_core::config::scheduler::SchedulerConfig;
use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_core::traits::reporter::CompletionReporter;
use courier_core::types::job::JobHandle;

use crate::orchestrator::UploadOrchestrator;

/// Completion reporter for cron-triggered invocations.
///
/// Rescheduling needs no bookkeeping here: entries that failed retryably
/// are still in the queue, so the next periodic tick re-attempts them.
#[derive(Debug, Default)]
pub struct ScheduledJobReporter;

#[async_trait]
impl CompletionReporter for ScheduledJobReporter {
    async fn report_job_finished(&self, job: &JobHandle, needs_reschedule: bool) {
        if needs_reschedule {
            tracing::info!(job = %job, "Batch finished with retryable failures; next run will re-attempt");
        } else {
            tracing::info!(job = %job, "Batch finished; queue drained");
        }
    }
}

/// Periodic trigger for upload batch runs.
pub struct UploadJobScheduler {
    /// The underlying job scheduler.
    scheduler: JobScheduler,
}

impl std::fmt::Debug for UploadJobScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadJobScheduler").finish()
    }
}

impl UploadJobScheduler {
    /// Create a new scheduler.
    pub async fn new() -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;
        Ok(Self { scheduler })
    }

    /// Register the periodic upload batch job.
    pub async fn register_upload_job(
        &self,
        config: &SchedulerConfig,
        orchestrator: Arc<UploadOrchestrator>,
    ) -> AppResult<()> {
        let job = CronJob::new_async(config.cron.as_str(), move |_uuid, _lock| {
            let orchestrator = Arc::clone(&orchestrator);
            Box::pin(async move {
                let job = JobHandle::new();
                match orchestrator.start(job).await {
                    Ok(true) => tracing::debug!(job = %job, "Upload batch in flight"),
                    Ok(false) => tracing::debug!(job = %job, "Upload queue empty"),
                    Err(e) => tracing::error!(job = %job, error = %e, "Failed to start upload batch"),
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create upload schedule: {}", e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add upload schedule: {}", e)))?;

        tracing::info!(cron = %config.cron, "Registered: upload_batch");
        Ok(())
    }

    /// Start the scheduler.
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Upload scheduler started");
        Ok(())
    }

    /// Shut the scheduler down.
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Upload scheduler shut down");
        Ok(())
    }
}
