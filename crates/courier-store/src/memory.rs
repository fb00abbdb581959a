//! In-memory upload queue store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use courier_core::result::AppResult;
use courier_core::traits::store::UploadStore;
use courier_core::types::id::UploadId;
use courier_core::types::upload::UploadDescriptor;

/// Non-durable [`UploadStore`] with the same staged/commit contract as
/// [`JsonFileStore`](crate::json::JsonFileStore).
///
/// Commits survive only for the lifetime of the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    committed: BTreeMap<UploadId, UploadDescriptor>,
    staged: BTreeMap<UploadId, UploadDescriptor>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UploadStore for MemoryStore {
    async fn list(&self) -> AppResult<Vec<UploadDescriptor>> {
        let state = self.inner.read().await;
        Ok(state.committed.values().cloned().collect())
    }

    async fn get(&self, id: &UploadId) -> AppResult<Option<UploadDescriptor>> {
        let state = self.inner.read().await;
        Ok(state.committed.get(id).cloned())
    }

    async fn add(&self, descriptor: UploadDescriptor) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state
            .staged
            .insert(descriptor.upload_id.clone(), descriptor);
        Ok(())
    }

    async fn remove(&self, id: &UploadId) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state.staged.remove(id);
        Ok(())
    }

    async fn commit(&self) -> AppResult<()> {
        let mut state = self.inner.write().await;
        state.committed = state.staged.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str) -> UploadDescriptor {
        UploadDescriptor::new(
            id,
            format!("/tmp/{id}.bin"),
            "https://example.com/upload",
            false,
        )
    }

    #[tokio::test]
    async fn test_staged_changes_invisible_until_commit() {
        let store = MemoryStore::new();

        store.add(descriptor("a")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(store.get(&UploadId::new("a")).await.unwrap().is_none());

        store.commit().await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_then_commit_drops_entry() {
        let store = MemoryStore::new();
        store.add(descriptor("a")).await.unwrap();
        store.add(descriptor("b")).await.unwrap();
        store.commit().await.unwrap();

        store.remove(&UploadId::new("a")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 2);

        store.commit().await.unwrap();
        let entries = store.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].upload_id, UploadId::new("b"));
    }
}
