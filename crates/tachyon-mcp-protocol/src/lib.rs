//! Wire message types, the error taxonomy, capability types, the schema
//! validator, and the lifecycle state machine shared by the MCP server
//! and client endpoint roles.

pub mod capabilities;
pub mod config;
pub mod domain;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod validation;

pub use capabilities::{
    ClientCapabilities, Implementation, LoggingCapability, PromptsCapability,
    ResourcesCapability, RootsCapability, ServerCapabilities, ToolsCapability,
};
pub use config::TimeoutConfig;
pub use domain::{
    wrap_tool_result, GetPromptResult, InitializeParams, InitializeResult, Prompt,
    PromptArgument, PromptMessage, ReadResourceResult, Resource, ResourceContents, TextContent,
    Tool, ToolCallResult, DEFAULT_MIME_TYPE, PROTOCOL_VERSION,
};
pub use error::{error_codes, ProtocolError, ProtocolResult};
pub use lifecycle::EndpointState;
pub use message::{
    JsonRpcErrorObject, JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse,
    RequestId, JSONRPC_VERSION,
};
pub use validation::{validate, validate_tool_arguments, ValidationError};
