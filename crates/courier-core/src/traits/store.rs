//! Durable upload queue store contract.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::id::UploadId;
use crate::types::upload::UploadDescriptor;

/// Durable mapping from upload id to upload descriptor.
///
/// The store survives process restarts; this is how retries work across
/// separate job runs. An entry exists exactly as long as its upload has not
/// been durably confirmed as delivered or permanently abandoned.
///
/// `list()` and `get()` reflect the last committed state. `add()` and
/// `remove()` only stage changes — a change is durable only once `commit()`
/// returns, and a crash between `remove()` and `commit()` must leave the
/// entry intact so the upload is re-attempted on a future run.
///
/// Implementations synchronize internally: `remove()` and `commit()` may be
/// called concurrently from different upload outcome callbacks.
#[async_trait]
pub trait UploadStore: Send + Sync + std::fmt::Debug {
    /// List all entries in the last committed state.
    async fn list(&self) -> AppResult<Vec<UploadDescriptor>>;

    /// Look up a single entry in the last committed state.
    async fn get(&self, id: &UploadId) -> AppResult<Option<UploadDescriptor>>;

    /// Stage an insert. Not visible to `list()`/`get()` until committed.
    async fn add(&self, descriptor: UploadDescriptor) -> AppResult<()>;

    /// Stage a removal. The entry stays visible until committed.
    async fn remove(&self, id: &UploadId) -> AppResult<()>;

    /// Durably persist all staged changes.
    async fn commit(&self) -> AppResult<()>;
}
