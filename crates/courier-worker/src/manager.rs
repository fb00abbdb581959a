//! Enqueue/cancel surface over the durable upload queue.

use std::sync::Arc;

use tracing;

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_core::traits::store::UploadStore;
use courier_core::types::id::UploadId;
use courier_core::types::upload::UploadDescriptor;

/// Manages queue membership outside of batch runs.
///
/// Every mutation is committed immediately so it survives a crash and is
/// picked up by the next scheduled batch.
#[derive(Debug, Clone)]
pub struct UploadQueueManager {
    store: Arc<dyn UploadStore>,
}

impl UploadQueueManager {
    /// Create a manager over the given store.
    pub fn new(store: Arc<dyn UploadStore>) -> Self {
        Self { store }
    }

    /// Durably queue a new upload.
    pub async fn enqueue(&self, descriptor: UploadDescriptor) -> AppResult<()> {
        if self.store.get(&descriptor.upload_id).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Upload '{}' is already queued",
                descriptor.upload_id
            )));
        }

        let upload_id = descriptor.upload_id.clone();
        let file_path = descriptor.file_path.clone();
        self.store.add(descriptor).await?;
        self.store.commit().await?;

        tracing::info!(upload_id = %upload_id, path = %file_path, "Upload queued");
        Ok(())
    }

    /// Durably drop a queued upload before it is attempted.
    pub async fn cancel(&self, id: &UploadId) -> AppResult<()> {
        if self.store.get(id).await?.is_none() {
            return Err(AppError::not_found(format!("Upload '{id}' is not queued")));
        }

        self.store.remove(id).await?;
        self.store.commit().await?;

        tracing::info!(upload_id = %id, "Upload cancelled");
        Ok(())
    }

    /// Number of committed queue entries.
    pub async fn pending(&self) -> AppResult<usize> {
        Ok(self.store.list().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::error::ErrorKind;
    use courier_store::MemoryStore;

    fn manager() -> UploadQueueManager {
        UploadQueueManager::new(Arc::new(MemoryStore::new()))
    }

    fn descriptor(id: &str) -> UploadDescriptor {
        UploadDescriptor::new(
            id,
            format!("/tmp/{id}.bin"),
            "https://example.com/upload",
            false,
        )
    }

    #[tokio::test]
    async fn test_enqueue_commits_immediately() {
        let manager = manager();
        manager.enqueue(descriptor("a")).await.unwrap();
        assert_eq!(manager.pending().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_enqueue_is_a_conflict() {
        let manager = manager();
        manager.enqueue(descriptor("a")).await.unwrap();

        let err = manager.enqueue(descriptor("a")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(manager.pending().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cancel_removes_entry() {
        let manager = manager();
        manager.enqueue(descriptor("a")).await.unwrap();
        manager.cancel(&UploadId::new("a")).await.unwrap();
        assert_eq!(manager.pending().await.unwrap(), 0);

        let err = manager.cancel(&UploadId::new("a")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
