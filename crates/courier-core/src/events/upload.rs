//! Upload lifecycle events.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::id::UploadId;
use crate::types::upload::UploadDescriptor;

/// State a queued upload transitioned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadStatus {
    /// Dispatch of the upload began.
    Started,
    /// The upload was delivered and durably removed from the queue.
    Completed,
    /// The upload was abandoned (file gone) and removed from the queue.
    Cancelled,
    /// The attempt failed; the upload stays queued for a future run.
    Failed,
}

/// Category of a failed upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadErrorKind {
    /// The endpoint responded with a non-success HTTP status.
    Response,
    /// No response was obtained (connection, DNS, local I/O).
    Network,
}

/// Details of a failed upload attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFailure {
    /// Failure category.
    pub kind: UploadErrorKind,
    /// HTTP status code, when a response was obtained.
    pub http_status: Option<u16>,
    /// Human-readable description.
    pub message: String,
}

impl UploadFailure {
    /// Failure carrying the HTTP status of a non-success response.
    pub fn response(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: UploadErrorKind::Response,
            http_status: Some(status),
            message: message.into(),
        }
    }

    /// Failure where no response was obtained.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: UploadErrorKind::Network,
            http_status: None,
            message: message.into(),
        }
    }
}

/// A state transition of an individual upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEvent {
    /// The upload this event refers to.
    pub upload_id: UploadId,
    /// The state the upload transitioned into.
    pub status: UploadStatus,
    /// Failure details, present iff `status` is [`UploadStatus::Failed`].
    pub error: Option<UploadFailure>,
    /// Extras copied from the upload descriptor.
    pub extras: BTreeMap<String, String>,
}

impl UploadEvent {
    /// Event for an upload whose dispatch just began.
    pub fn started(descriptor: &UploadDescriptor) -> Self {
        Self::with_status(descriptor, UploadStatus::Started, None)
    }

    /// Event for a successfully delivered upload.
    pub fn completed(descriptor: &UploadDescriptor) -> Self {
        Self::with_status(descriptor, UploadStatus::Completed, None)
    }

    /// Event for an upload abandoned because its file is gone.
    pub fn cancelled(descriptor: &UploadDescriptor) -> Self {
        Self::with_status(descriptor, UploadStatus::Cancelled, None)
    }

    /// Event for a failed upload attempt.
    pub fn failed(descriptor: &UploadDescriptor, failure: UploadFailure) -> Self {
        Self::with_status(descriptor, UploadStatus::Failed, Some(failure))
    }

    fn with_status(
        descriptor: &UploadDescriptor,
        status: UploadStatus,
        error: Option<UploadFailure>,
    ) -> Self {
        Self {
            upload_id: descriptor.upload_id.clone(),
            status,
            error,
            extras: descriptor.extras.clone(),
        }
    }
}
