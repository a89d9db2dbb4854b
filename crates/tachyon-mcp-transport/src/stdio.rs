//! The standard input/output binding: reads frame the peer's requests,
//! writes frame our own. Diagnostics are expected to go to a separate
//! error stream (stderr), left to the embedding binary's logging setup.

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt, Stdin, Stdout};

use tachyon_mcp_protocol::JsonRpcMessage;

use crate::error::{TransportError, TransportResult};
use crate::framer::LineFramer;
use crate::{Transport, TransportEvent, TransportHealth};

pub struct StdioTransport {
    stdin: Stdin,
    stdout: Stdout,
    framer: LineFramer,
    read_buf: [u8; 4096],
    pending: std::collections::VecDeque<TransportEvent>,
    health: TransportHealth,
    closed: bool,
}

impl StdioTransport {
    pub fn new() -> Self {
        Self {
            stdin: tokio::io::stdin(),
            stdout: tokio::io::stdout(),
            framer: LineFramer::new(),
            read_buf: [0u8; 4096],
            pending: std::collections::VecDeque::new(),
            health: TransportHealth::default(),
            closed: false,
        }
    }
}

impl Default for StdioTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StdioTransport {
    async fn send(&mut self, message: &JsonRpcMessage) -> TransportResult<()> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        let mut line = serde_json::to_vec(message)?;
        line.push(b'\n');
        self.stdout.write_all(&line).await?;
        self.stdout.flush().await?;
        self.health.messages_sent += 1;
        Ok(())
    }

    async fn receive(&mut self) -> TransportResult<Option<TransportEvent>> {
        loop {
            if let Some(event) = self.pending.pop_front() {
                match &event {
                    TransportEvent::Message(_) => self.health.messages_received += 1,
                    TransportEvent::ParseError(_) => self.health.parse_errors += 1,
                }
                return Ok(Some(event));
            }

            if self.closed {
                return Ok(None);
            }

            let n = self.stdin.read(&mut self.read_buf).await?;
            if n == 0 {
                self.closed = true;
                return Ok(None);
            }
            let events = self.framer.feed(&self.read_buf[..n]);
            self.pending.extend(events);
        }
    }

    async fn close(&mut self) -> TransportResult<()> {
        self.closed = true;
        Ok(())
    }

    fn health(&self) -> TransportHealth {
        self.health.clone()
    }
}
