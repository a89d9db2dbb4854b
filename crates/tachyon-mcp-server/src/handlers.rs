//! The three handler traits external collaborators implement against the
//! registry (§1 "Concrete tool/resource/prompt implementations... they
//! register against the core registry").

use async_trait::async_trait;
use serde_json::Value;

use tachyon_mcp_protocol::{GetPromptResult, ProtocolResult};

#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// `arguments` has already been schema-validated by the time this is
    /// called. Returns an arbitrary value; the dispatcher wraps it into
    /// the wire's text-content shape.
    async fn call(&self, arguments: Value) -> ProtocolResult<Value>;
}

#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Returns `(contents, mime_type)`; the dispatcher defaults
    /// `mime_type` to `"text/plain"` when `None`.
    async fn read(&self, uri: &str) -> ProtocolResult<(String, Option<String>)>;
}

#[async_trait]
pub trait PromptHandler: Send + Sync {
    async fn get(&self, arguments: Value) -> ProtocolResult<GetPromptResult>;
}
