//! Upload orchestrator — dispatches queued files and tracks batch completion.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::Mutex;
use tracing;

use courier_core::events::upload::{UploadEvent, UploadFailure};
use courier_core::result::AppResult;
use courier_core::traits::reporter::CompletionReporter;
use courier_core::traits::sink::EventSink;
use courier_core::traits::store::UploadStore;
use courier_core::traits::transport::TransportClient;
use courier_core::types::job::JobHandle;
use courier_core::types::upload::UploadDescriptor;

use crate::batch::BatchState;
use crate::cleanup::FileCleanupWorker;

/// One job invocation's identity plus its batch accounting.
#[derive(Debug)]
struct Batch {
    job: JobHandle,
    state: Mutex<BatchState>,
}

/// Dispatches every queued upload as an independent task and decides batch
/// completion and reschedule need.
///
/// The orchestrator itself is long-lived; per-invocation state lives in the
/// batch created by [`start`](Self::start). Outcome callbacks race freely —
/// all accounting runs under the batch lock, where the completion report is
/// claimed exactly once.
#[derive(Debug)]
pub struct UploadOrchestrator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    store: Arc<dyn UploadStore>,
    transport: Arc<dyn TransportClient>,
    sink: Arc<dyn EventSink>,
    reporter: Arc<dyn CompletionReporter>,
    cleanup: Arc<FileCleanupWorker>,
    /// Batch of the most recent invocation, kept for `on_stop`.
    current: Mutex<Option<Arc<Batch>>>,
}

impl UploadOrchestrator {
    /// Create an orchestrator over the given collaborators.
    pub fn new(
        store: Arc<dyn UploadStore>,
        transport: Arc<dyn TransportClient>,
        sink: Arc<dyn EventSink>,
        reporter: Arc<dyn CompletionReporter>,
        cleanup: Arc<FileCleanupWorker>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                transport,
                sink,
                reporter,
                cleanup,
                current: Mutex::new(None),
            }),
        }
    }

    /// Start a batch for one job invocation.
    ///
    /// Returns `Ok(false)` when the queue is empty: the job may stop right
    /// away and needs no reschedule. Otherwise dispatches one upload task
    /// per committed queue entry and returns `Ok(true)` — the job must stay
    /// alive until the completion report goes out through the
    /// [`CompletionReporter`].
    pub async fn start(&self, job: JobHandle) -> AppResult<bool> {
        let entries = self.inner.store.list().await?;
        if entries.is_empty() {
            tracing::info!(job = %job, "Nothing to upload");
            return Ok(false);
        }

        tracing::info!(job = %job, files = entries.len(), "Upload batch started");

        let batch = Arc::new(Batch {
            job,
            state: Mutex::new(BatchState::new(entries.len())),
        });
        *self.inner.current.lock().await = Some(Arc::clone(&batch));

        for descriptor in entries {
            let inner = Arc::clone(&self.inner);
            let batch = Arc::clone(&batch);
            tokio::spawn(async move {
                inner.dispatch_one(&batch, descriptor).await;
            });
        }

        Ok(true)
    }

    /// Host preemption callback.
    ///
    /// Returns `true` when any upload dispatched by the current invocation
    /// has not yet reached a terminal outcome, i.e. the job should be
    /// rescheduled. Never cancels in-flight transport calls — their
    /// callbacks keep running and stay safe after this returns. Safe to
    /// call repeatedly and after completion.
    pub async fn on_stop(&self) -> bool {
        let current = self.inner.current.lock().await.clone();
        match current {
            Some(batch) => {
                let needs_reschedule = !batch.state.lock().await.is_complete();
                tracing::info!(job = %batch.job, needs_reschedule, "Job stop requested");
                needs_reschedule
            }
            None => false,
        }
    }

    /// Stop the cleanup worker with a bounded wait. Safe to call twice.
    pub async fn on_teardown(&self) {
        self.inner.cleanup.shutdown().await;
    }
}

impl Inner {
    async fn dispatch_one(&self, batch: &Batch, descriptor: UploadDescriptor) {
        self.sink.emit(UploadEvent::started(&descriptor)).await;

        let content = match tokio::fs::read(&descriptor.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Missing file: terminal and non-retryable. The entry is
                // dropped from the queue and never counts toward reschedule.
                tracing::warn!(
                    upload_id = %descriptor.upload_id,
                    path = %descriptor.file_path,
                    "File not found; abandoning upload"
                );
                self.remove_committed(&descriptor).await;
                self.sink.emit(UploadEvent::cancelled(&descriptor)).await;
                self.finish(batch, false).await;
                return;
            }
            Err(e) => {
                let failure =
                    UploadFailure::network(format!("Failed to read {}: {e}", descriptor.file_path));
                self.fail(batch, &descriptor, failure).await;
                return;
            }
        };

        tracing::debug!(
            upload_id = %descriptor.upload_id,
            bytes = content.len(),
            url = %descriptor.upload_url,
            "Uploading"
        );

        match self
            .transport
            .upload(&descriptor.upload_url, Bytes::from(content))
            .await
        {
            Ok(response) if response.is_success() => {
                self.remove_committed(&descriptor).await;
                if descriptor.delete_on_upload {
                    self.cleanup
                        .post(PathBuf::from(&descriptor.file_path))
                        .await;
                }
                tracing::info!(
                    upload_id = %descriptor.upload_id,
                    status = response.status,
                    "Upload delivered"
                );
                self.sink.emit(UploadEvent::completed(&descriptor)).await;
                self.finish(batch, false).await;
            }
            Ok(response) => {
                let failure = UploadFailure::response(response.status, response.message);
                self.fail(batch, &descriptor, failure).await;
            }
            Err(e) => {
                self.fail(batch, &descriptor, UploadFailure::network(e.message))
                    .await;
            }
        }
    }

    /// Retryable failure: the entry stays queued and counts toward reschedule.
    async fn fail(&self, batch: &Batch, descriptor: &UploadDescriptor, failure: UploadFailure) {
        tracing::warn!(
            upload_id = %descriptor.upload_id,
            kind = ?failure.kind,
            status = failure.http_status,
            error = %failure.message,
            "Upload attempt failed"
        );
        self.sink.emit(UploadEvent::failed(descriptor, failure)).await;
        self.finish(batch, true).await;
    }

    /// Remove the entry and make the removal durable before its terminal
    /// event is considered final. A failed commit leaves the entry queued,
    /// so the upload is re-attempted on a future run.
    async fn remove_committed(&self, descriptor: &UploadDescriptor) {
        if let Err(e) = self.store.remove(&descriptor.upload_id).await {
            tracing::error!(
                upload_id = %descriptor.upload_id,
                error = %e,
                "Failed to stage queue removal"
            );
            return;
        }
        if let Err(e) = self.store.commit().await {
            tracing::error!(
                upload_id = %descriptor.upload_id,
                error = %e,
                "Failed to commit queue removal; entry will be retried"
            );
        }
    }

    /// Record one terminal outcome and emit the completion report if this
    /// outcome drained the batch.
    async fn finish(&self, batch: &Batch, retryable_failure: bool) {
        let report = batch.state.lock().await.record_terminal(retryable_failure);
        if let Some(needs_reschedule) = report {
            tracing::info!(job = %batch.job, needs_reschedule, "Upload batch complete");
            self.reporter
                .report_job_finished(&batch.job, needs_reschedule)
                .await;
        }
    }
}
