//! Per-invocation job identity handed across the scheduling boundary.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Handle identifying one job invocation.
///
/// Created by the host scheduler when it triggers a batch and echoed back
/// in the completion report so the two sides can correlate lifecycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobHandle(Uuid);

impl JobHandle {
    /// Create a new random job handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a handle from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Return a reference to the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for JobHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
