//! Event sink implementations.

use async_trait::async_trait;
use tokio::sync::broadcast;

use courier_core::events::upload::UploadEvent;
use courier_core::traits::sink::EventSink;

/// Event sink backed by a tokio broadcast channel.
///
/// In-process subscribers attach with [`subscribe`](Self::subscribe). Send
/// failures (no subscribers, lagging receivers) are ignored — emission never
/// feeds back into the orchestration path.
#[derive(Debug)]
pub struct BroadcastEventSink {
    tx: broadcast::Sender<UploadEvent>,
}

impl BroadcastEventSink {
    /// Create a sink with the given channel buffer size.
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Attach a new subscriber.
    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.tx.subscribe()
    }
}

#[async_trait]
impl EventSink for BroadcastEventSink {
    async fn emit(&self, event: UploadEvent) {
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courier_core::events::upload::UploadStatus;
    use courier_core::types::upload::UploadDescriptor;

    #[tokio::test]
    async fn test_subscribers_receive_emitted_events() {
        let sink = BroadcastEventSink::new(8);
        let mut rx = sink.subscribe();

        let descriptor = UploadDescriptor::new("a", "/tmp/a.bin", "https://example.com/up", false);
        sink.emit(UploadEvent::started(&descriptor)).await;

        let event = rx.recv().await.unwrap();
        assert_eq!(event.status, UploadStatus::Started);
        assert_eq!(event.upload_id, descriptor.upload_id);
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_a_no_op() {
        let sink = BroadcastEventSink::new(8);
        let descriptor = UploadDescriptor::new("a", "/tmp/a.bin", "https://example.com/up", false);
        sink.emit(UploadEvent::completed(&descriptor)).await;
    }
}
