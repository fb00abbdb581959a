//! Descriptor of a single queued file upload.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::UploadId;

/// A single file queued for upload.
///
/// Immutable once created. Owned by the queue store; the orchestrator only
/// references it while a batch is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadDescriptor {
    /// Unique id of this upload within the queue.
    pub upload_id: UploadId,
    /// Path of the file to upload.
    pub file_path: String,
    /// Destination URL the file content is sent to.
    pub upload_url: String,
    /// Whether the local file should be deleted after a successful upload.
    pub delete_on_upload: bool,
    /// Caller-supplied key/value pairs echoed back in lifecycle events.
    #[serde(default)]
    pub extras: BTreeMap<String, String>,
    /// When the upload was enqueued.
    pub enqueued_at: DateTime<Utc>,
}

impl UploadDescriptor {
    /// Create a descriptor with no extras, enqueued now.
    pub fn new(
        upload_id: impl Into<UploadId>,
        file_path: impl Into<String>,
        upload_url: impl Into<String>,
        delete_on_upload: bool,
    ) -> Self {
        Self {
            upload_id: upload_id.into(),
            file_path: file_path.into(),
            upload_url: upload_url.into(),
            delete_on_upload,
            extras: BTreeMap::new(),
            enqueued_at: Utc::now(),
        }
    }

    /// Attach an extra key/value pair.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }
}
