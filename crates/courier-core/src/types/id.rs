//! Newtype wrapper for upload identifiers.
//!
//! Using a distinct type prevents accidentally passing an arbitrary string
//! where the queue key is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a queued upload.
///
/// Chosen by the caller at enqueue time and used as the key in the upload
/// queue store.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UploadId(String);

impl UploadId {
    /// Create an upload id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UploadId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UploadId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
