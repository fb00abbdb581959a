//! Core type definitions used across the Courier workspace.

pub mod id;
pub mod job;
pub mod upload;

pub use id::UploadId;
pub use job::JobHandle;
pub use upload::UploadDescriptor;
