//! Lifecycle events emitted by Courier operations.
//!
//! Events are published through an event sink and consumed by in-process
//! subscribers (status displays, audit logging, follow-up actions).

pub mod upload;

pub use upload::{UploadErrorKind, UploadEvent, UploadFailure, UploadStatus};
