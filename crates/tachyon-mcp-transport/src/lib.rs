//! Newline-delimited JSON framing over a bytestream transport (§4.1).
//!
//! The [`Transport`] trait is the abstraction boundary the endpoint core
//! dispatches against; only the [`stdio`] binding is implemented here, but
//! the trait stays generic so a second transport could be added without
//! touching the endpoint crates (§1 Non-goals: "though the transport is
//! abstracted so one could be added").

pub mod error;
pub mod framer;
#[cfg(feature = "stdio")]
pub mod stdio;

use async_trait::async_trait;
use tachyon_mcp_protocol::JsonRpcMessage;

pub use error::{TransportError, TransportResult};
pub use framer::{FrameEvent, LineFramer};

/// One parsed line, or a recoverable parse failure for a single line.
/// Mirrors [`FrameEvent`] at the transport boundary so callers do not
/// need to reach into `framer` directly.
pub type TransportEvent = FrameEvent;

/// Running counters describing a transport's traffic, useful for
/// diagnostics; not part of the protocol itself.
#[derive(Debug, Clone, Default)]
pub struct TransportHealth {
    pub messages_sent: u64,
    pub messages_received: u64,
    pub parse_errors: u64,
}

/// Frames newline-delimited JSON messages over a bytestream. `send`
/// serializes `message` as a single JSON line and writes it atomically
/// with respect to concurrent `send` calls (§4.1 "Concurrency"); `receive`
/// returns the next event in arrival order.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&mut self, message: &JsonRpcMessage) -> TransportResult<()>;

    /// Returns the next frame event, or `Ok(None)` once the underlying
    /// stream has reached EOF (§4.1 "Underlying read errors terminate the
    /// transport and emit `close`").
    async fn receive(&mut self) -> TransportResult<Option<TransportEvent>>;

    async fn close(&mut self) -> TransportResult<()>;

    fn health(&self) -> TransportHealth;
}
