//! # Tachyon MCP
//!
//! A Model Context Protocol core protocol engine: JSON-RPC 2.0 framing,
//! message types, schema validation, and a symmetric server/client
//! endpoint core.
//!
//! **Primary APIs:**
//! - [`ServerEndpoint`]: registers tools, resources, and prompts, and
//!   dispatches inbound requests against them.
//! - [`ClientEndpoint`]: sends requests and notifications, and correlates
//!   responses back to their caller.
//!
//! ## Example: server
//!
//! ```no_run
//! use tachyon_mcp::{Implementation, ServerCapabilities, ServerEndpoint, Tool, ToolHandler};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! struct Add;
//!
//! #[async_trait::async_trait]
//! impl ToolHandler for Add {
//!     async fn call(&self, arguments: Value) -> tachyon_mcp::ProtocolResult<Value> {
//!         let a = arguments["a"].as_f64().unwrap_or(0.0);
//!         let b = arguments["b"].as_f64().unwrap_or(0.0);
//!         Ok(json!(a + b))
//!     }
//! }
//!
//! # async fn run() {
//! let server = ServerEndpoint::new(
//!     Implementation { name: "my-server".into(), version: "1.0.0".into() },
//!     ServerCapabilities::default(),
//! );
//! server.start().await;
//! server.add_tool(
//!     Tool { name: "add".into(), description: "adds two numbers".into(), input_schema: json!({"type": "object"}) },
//!     Arc::new(Add),
//! ).await;
//!
//! # #[cfg(feature = "stdio")]
//! # async fn serve_stdio(server: ServerEndpoint) {
//! server.serve(Box::new(tachyon_mcp::StdioTransport::new())).await;
//! # }
//! # }
//! ```
//!
//! ## Example: client
//!
//! ```no_run
//! use tachyon_mcp::{ClientCapabilities, ClientEndpoint, Implementation, TimeoutConfig};
//!
//! # #[cfg(feature = "stdio")]
//! # async fn run() -> tachyon_mcp::ProtocolResult<()> {
//! let transport = Box::new(tachyon_mcp::StdioTransport::new());
//! let client = ClientEndpoint::new(
//!     transport,
//!     Implementation { name: "my-client".into(), version: "1.0.0".into() },
//!     ClientCapabilities::default(),
//!     TimeoutConfig::default(),
//! );
//! client.initialize().await?;
//! let tools = client.list_tools().await?;
//! # let _ = tools;
//! # Ok(())
//! # }
//! ```

pub use tachyon_mcp_protocol::{
    error_codes, validate, validate_tool_arguments, wrap_tool_result, ClientCapabilities,
    EndpointState, GetPromptResult, Implementation, InitializeParams, InitializeResult,
    JsonRpcErrorObject, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    LoggingCapability, Prompt, PromptArgument, PromptMessage, ProtocolError, ProtocolResult,
    PromptsCapability, ReadResourceResult, RequestId, Resource, ResourceContents,
    ResourcesCapability, RootsCapability, ServerCapabilities, TextContent, TimeoutConfig, Tool,
    ToolCallResult, ToolsCapability, ValidationError, DEFAULT_MIME_TYPE, JSONRPC_VERSION,
    PROTOCOL_VERSION,
};

pub use tachyon_mcp_endpoint::{classify, Classification, IdGenerator, PendingRequests, RequestOutcome};

pub use tachyon_mcp_transport::{FrameEvent, LineFramer, Transport, TransportError, TransportHealth, TransportResult};
#[cfg(feature = "stdio")]
pub use tachyon_mcp_transport::stdio::StdioTransport;

pub use tachyon_mcp_server::{
    is_reserved_method, run_chain, PreDispatchHook, PromptHandler, Registry, RequestContext,
    ResourceHandler, ServerEndpoint, ToolHandler,
};

pub use tachyon_mcp_client::{ClientEndpoint, ClientEvent};

#[cfg(feature = "middleware")]
pub use tachyon_mcp_middleware::{
    AuthConfig, AuthHook, CustomValidator, KeyGenerator, RateLimitConfig, RateLimiter,
};
