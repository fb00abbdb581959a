//! Upload transport contract.

use async_trait::async_trait;
use bytes::Bytes;

/// Response obtained from the remote endpoint.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Status line reason or response message.
    pub message: String,
}

impl TransportResponse {
    /// Whether the status code indicates success.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any response from the endpoint.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl TransportError {
    /// Create a transport error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Performs one upload attempt.
///
/// A non-success HTTP status is returned as a [`TransportResponse`], not an
/// error; [`TransportError`] means no response was obtained at all. There is
/// no retry or backoff at this layer — re-attempting is entirely the
/// orchestrator's responsibility via re-dispatch on a future job run.
#[async_trait]
pub trait TransportClient: Send + Sync + std::fmt::Debug {
    /// Upload `content` to `url` and report the outcome of this one attempt.
    async fn upload(&self, url: &str, content: Bytes)
    -> Result<TransportResponse, TransportError>;
}
