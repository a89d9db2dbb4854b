//! A mock [`Transport`] for exercising server/client endpoint logic
//! without stdio or a real process on the other end. Grounded in the
//! teacher's `ultrafast-mcp-test-utils::mocks::MockTransport`.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use tachyon_mcp_protocol::JsonRpcMessage;
use tachyon_mcp_transport::{FrameEvent, Transport, TransportError, TransportHealth, TransportResult};

pub struct MockTransport {
    pub sent: Arc<Mutex<Vec<JsonRpcMessage>>>,
    receive_queue: Arc<Mutex<VecDeque<FrameEvent>>>,
    closed: Arc<Mutex<bool>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            receive_queue: Arc::new(Mutex::new(VecDeque::new())),
            closed: Arc::new(Mutex::new(false)),
        }
    }

    /// Queues a message that a subsequent `receive()` will hand back.
    pub async fn push_inbound(&self, message: JsonRpcMessage) {
        self.receive_queue
            .lock()
            .await
            .push_back(FrameEvent::Message(message));
    }

    pub async fn sent_messages(&self) -> Vec<JsonRpcMessage> {
        self.sent.lock().await.clone()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, message: &JsonRpcMessage) -> TransportResult<()> {
        if *self.closed.lock().await {
            return Err(TransportError::Closed);
        }
        self.sent.lock().await.push(message.clone());
        Ok(())
    }

    async fn receive(&mut self) -> TransportResult<Option<FrameEvent>> {
        if *self.closed.lock().await {
            return Err(TransportError::Closed);
        }
        Ok(self.receive_queue.lock().await.pop_front())
    }

    async fn close(&mut self) -> TransportResult<()> {
        *self.closed.lock().await = true;
        Ok(())
    }

    fn health(&self) -> TransportHealth {
        TransportHealth::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tachyon_mcp_protocol::{JsonRpcNotification, RequestId, JsonRpcResponse};

    #[tokio::test]
    async fn send_appends_to_the_sent_log() {
        let mut transport = MockTransport::new();
        let message = JsonRpcMessage::Notification(JsonRpcNotification::new("ping", None));
        transport.send(&message).await.unwrap();
        assert_eq!(transport.sent_messages().await.len(), 1);
    }

    #[tokio::test]
    async fn receive_drains_the_queued_messages_in_order() {
        let transport_outer = MockTransport::new();
        transport_outer
            .push_inbound(JsonRpcMessage::Response(JsonRpcResponse::success(
                RequestId::Numeric(1),
                json!(null),
            )))
            .await;
        let mut transport = transport_outer;
        let event = transport.receive().await.unwrap();
        assert!(matches!(event, Some(FrameEvent::Message(_))));
        assert!(transport.receive().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn operations_after_close_fail() {
        let mut transport = MockTransport::new();
        transport.close().await.unwrap();
        let message = JsonRpcMessage::Notification(JsonRpcNotification::new("ping", None));
        assert!(transport.send(&message).await.is_err());
        assert!(transport.receive().await.is_err());
    }
}
