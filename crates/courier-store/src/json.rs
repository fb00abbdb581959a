//! JSON-file-backed upload queue store.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tracing::debug;

use courier_core::error::{AppError, ErrorKind};
use courier_core::result::AppResult;
use courier_core::traits::store::UploadStore;
use courier_core::types::id::UploadId;
use courier_core::types::upload::UploadDescriptor;

/// Upload queue persisted as a single JSON file.
///
/// Holds two in-memory views: the last committed state and a staged working
/// copy. `commit()` writes the staged map to a temporary file and atomically
/// renames it over the queue file, so a crash mid-commit leaves the previous
/// committed state on disk.
#[derive(Debug)]
pub struct JsonFileStore {
    /// Path of the persisted queue file.
    path: PathBuf,
    /// Committed and staged views, guarded together.
    inner: RwLock<StoreState>,
}

#[derive(Debug, Default)]
struct StoreState {
    committed: BTreeMap<UploadId, UploadDescriptor>,
    staged: BTreeMap<UploadId, UploadDescriptor>,
}

impl JsonFileStore {
    /// Open a store at the given path, loading the last committed state.
    ///
    /// The parent directory is created if missing; a missing queue file
    /// means an empty queue.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create queue directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        let committed = match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<BTreeMap<UploadId, UploadDescriptor>>(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read queue file: {}", path.display()),
                    e,
                ));
            }
        };

        debug!(path = %path.display(), entries = committed.len(), "Opened upload queue");

        let staged = committed.clone();
        Ok(Self {
            path,
            inner: RwLock::new(StoreState { committed, staged }),
        })
    }
}

#[async_trait]
impl UploadStore for JsonFileStore {
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
        if state.staged.remove(id).is_none() {
            debug!(upload_id = %id, "Staged removal of an id that is not present");
        }
        Ok(())
    }

    async fn commit(&self) -> AppResult<()> {
        let mut state = self.inner.write().await;
        let bytes = serde_json::to_vec_pretty(&state.staged)?;

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create queue temp file: {}", tmp.display()),
                e,
            )
        })?;
        file.write_all(&bytes).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write queue temp file: {}", tmp.display()),
                e,
            )
        })?;
        file.sync_all().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to sync queue temp file: {}", tmp.display()),
                e,
            )
        })?;
        drop(file);

        fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace queue file: {}", self.path.display()),
                e,
            )
        })?;

        state.committed = state.staged.clone();
        debug!(path = %self.path.display(), entries = state.committed.len(), "Committed upload queue");
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
    async fn test_add_is_staged_until_commit() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("uploads.json"))
            .await
            .unwrap();

        store.add(descriptor("a")).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());

        store.commit().await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert!(
            store
                .get(&UploadId::new("a"))
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_reopen_sees_last_committed_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploads.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.add(descriptor("a")).await.unwrap();
        store.add(descriptor("b")).await.unwrap();
        store.commit().await.unwrap();
        drop(store);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        let entries = reopened.list().await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            reopened
                .get(&UploadId::new("b"))
                .await
                .unwrap()
                .unwrap()
                .file_path,
            "/tmp/b.bin"
        );
    }

    #[tokio::test]
    async fn test_uncommitted_removal_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uploads.json");

        let store = JsonFileStore::open(&path).await.unwrap();
        store.add(descriptor("a")).await.unwrap();
        store.commit().await.unwrap();

        // Staged removal: still listed, and still on disk if we crash here.
        store.remove(&UploadId::new("a")).await.unwrap();
        assert_eq!(store.list().await.unwrap().len(), 1);

        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert_eq!(reopened.list().await.unwrap().len(), 1);

        store.commit().await.unwrap();
        let reopened = JsonFileStore::open(&path).await.unwrap();
        assert!(reopened.list().await.unwrap().is_empty());
    }
}
