//! HTTP transport client for upload delivery.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use courier_core::config::transport::TransportConfig;
use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_core::traits::transport::{TransportClient, TransportError, TransportResponse};

/// Transport client delivering file content with one HTTP `PUT` per upload.
///
/// Performs exactly one attempt per call; whether an attempt is repeated on
/// a later job run is decided by the orchestrator.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport client from configuration.
    pub fn new(config: &TransportConfig) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(seconds) = config.request_timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        let client = builder
            .build()
            .map_err(|e| AppError::transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn upload(
        &self,
        url: &str,
        content: Bytes,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .put(url)
            .body(content)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status();
        debug!(url, status = status.as_u16(), "Upload attempt returned");

        Ok(TransportResponse {
            status: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, read the full request, answer with `status_line`.
    async fn serve_once(status_line: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                if request_complete(&buf) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{addr}/upload")
    }

    fn request_complete(buf: &[u8]) -> bool {
        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]);
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= header_end + 4 + content_length
    }

    fn transport() -> HttpTransport {
        HttpTransport::new(&TransportConfig {
            request_timeout_seconds: Some(5),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_success_status_maps_to_response() {
        let url = serve_once("200 OK").await;
        let response = transport()
            .upload(&url, Bytes::from("payload"))
            .await
            .unwrap();
        assert!(response.is_success());
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_server_error_is_a_response_not_an_error() {
        let url = serve_once("500 Internal Server Error").await;
        let response = transport()
            .upload(&url, Bytes::from("payload"))
            .await
            .unwrap();
        assert!(!response.is_success());
        assert_eq!(response.status, 500);
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_transport_error() {
        // Port 1 is reserved and unbound; the connection fails with no response.
        let err = transport()
            .upload("http://127.0.0.1:1/upload", Bytes::from("payload"))
            .await
            .unwrap_err();
        assert!(!err.message.is_empty());
    }
}
