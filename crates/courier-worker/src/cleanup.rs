//! File cleanup worker — deletes uploaded files off the upload path.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::fs;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use courier_core::config::cleanup::CleanupConfig;

/// Single background task draining a bounded queue of delete-file tasks.
///
/// Deletions run on their own task so disk I/O never delays reporting batch
/// completion. Cleanup is best-effort: failures are logged and never reach
/// the upload path.
#[derive(Debug)]
pub struct FileCleanupWorker {
    tx: Mutex<Option<mpsc::Sender<PathBuf>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    shutdown_wait: Duration,
}

impl FileCleanupWorker {
    /// Spawn the worker task.
    pub fn start(config: &CleanupConfig) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let handle = tokio::spawn(run(rx));
        Self {
            tx: Mutex::new(Some(tx)),
            handle: Mutex::new(Some(handle)),
            shutdown_wait: Duration::from_secs(config.shutdown_wait_seconds),
        }
    }

    /// Post a delete task. Non-blocking; a full queue or a stopped worker
    /// drops the task with a warning.
    pub async fn post(&self, path: PathBuf) {
        let guard = self.tx.lock().await;
        match guard.as_ref() {
            Some(tx) => {
                if let Err(e) = tx.try_send(path) {
                    warn!(error = %e, "Dropping cleanup task; queue full or worker stopped");
                }
            }
            None => warn!("Cleanup worker already stopped; dropping task"),
        }
    }

    /// Stop the worker, waiting up to the configured bound for queued
    /// deletions to drain. Safe to call more than once.
    pub async fn shutdown(&self) {
        self.tx.lock().await.take();
        let handle = self.handle.lock().await.take();
        if let Some(handle) = handle {
            if tokio::time::timeout(self.shutdown_wait, handle)
                .await
                .is_err()
            {
                warn!("Cleanup worker did not drain in time; abandoning remaining tasks");
            }
        }
    }
}

async fn run(mut rx: mpsc::Receiver<PathBuf>) {
    while let Some(path) = rx.recv().await {
        delete_file(&path).await;
    }
    debug!("Cleanup worker drained");
}

/// Delete `path`; if its parent directory is left empty, delete that too.
async fn delete_file(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Deleted uploaded file");
            if let Some(parent) = path.parent() {
                if dir_is_empty(parent).await {
                    match fs::remove_dir(parent).await {
                        Ok(()) => debug!(path = %parent.display(), "Deleted empty upload directory"),
                        Err(e) => warn!(
                            path = %parent.display(),
                            error = %e,
                            "Failed to delete upload directory"
                        ),
                    }
                }
            }
        }
        Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete uploaded file"),
    }
}

async fn dir_is_empty(dir: &Path) -> bool {
    match fs::read_dir(dir).await {
        Ok(mut entries) => matches!(entries.next_entry().await, Ok(None)),
        Err(_) => false,
    }
}
