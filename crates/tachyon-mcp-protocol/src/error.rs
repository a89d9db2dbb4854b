//! The flat, wire-stable error code space (§4.3) and conversion to the
//! JSON-RPC error envelope.

use serde_json::Value;
use thiserror::Error;

use crate::message::JsonRpcErrorObject;

pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
    pub const INITIALIZATION_FAILED: i64 = -32000;
    pub const TOOL_EXECUTION_ERROR: i64 = -32001;
    pub const RESOURCE_NOT_FOUND: i64 = -32002;
    pub const PERMISSION_DENIED: i64 = -32003;
    pub const RATE_LIMIT_EXCEEDED: i64 = -32004;
    pub const VALIDATION_ERROR: i64 = -32005;
    pub const TIMEOUT_ERROR: i64 = -32006;
}

/// The protocol's full error taxonomy. Every wire error response is built
/// from one of these variants; no variant ever carries a backtrace or
/// language-specific failure detail into `data`.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("parse error: {0}")]
    ParseError(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not found: {0}")]
    MethodNotFound(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("internal error: {0}")]
    InternalError(String),

    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    #[error("tool execution error: {0}")]
    ToolExecutionError(String),

    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("rate limit exceeded: retry after {retry_after_secs}s")]
    RateLimitExceeded { retry_after_secs: u64, limit: u32 },

    #[error("validation error at {instance_path}: {message}")]
    ValidationError {
        instance_path: String,
        message: String,
    },

    #[error("timeout: {0}")]
    TimeoutError(String),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;

impl ProtocolError {
    pub fn code(&self) -> i64 {
        use error_codes::*;
        match self {
            ProtocolError::ParseError(_) => PARSE_ERROR,
            ProtocolError::InvalidRequest(_) => INVALID_REQUEST,
            ProtocolError::MethodNotFound(_) => METHOD_NOT_FOUND,
            ProtocolError::InvalidParams(_) => INVALID_PARAMS,
            ProtocolError::InternalError(_) => INTERNAL_ERROR,
            ProtocolError::InitializationFailed(_) => INITIALIZATION_FAILED,
            ProtocolError::ToolExecutionError(_) => TOOL_EXECUTION_ERROR,
            ProtocolError::ResourceNotFound(_) => RESOURCE_NOT_FOUND,
            ProtocolError::PermissionDenied(_) => PERMISSION_DENIED,
            ProtocolError::RateLimitExceeded { .. } => RATE_LIMIT_EXCEEDED,
            // Schema mismatches are reported under the InvalidParams family
            // on the wire (§7) even though they carry the richer
            // ValidationError(-32005) code as their own variant identity.
            ProtocolError::ValidationError { .. } => VALIDATION_ERROR,
            ProtocolError::TimeoutError(_) => TIMEOUT_ERROR,
            ProtocolError::Serialization(_) => PARSE_ERROR,
        }
    }

    pub fn data(&self) -> Option<Value> {
        match self {
            ProtocolError::RateLimitExceeded {
                retry_after_secs,
                limit,
            } => Some(serde_json::json!({
                "retryAfter": retry_after_secs,
                "limit": limit,
            })),
            ProtocolError::ValidationError { instance_path, .. } => Some(serde_json::json!({
                "instancePath": instance_path,
            })),
            _ => None,
        }
    }
}

impl From<ProtocolError> for JsonRpcErrorObject {
    fn from(err: ProtocolError) -> Self {
        let code = err.code();
        let data = err.data();
        JsonRpcErrorObject::new(code, err.to_string(), data)
    }
}

/// Reconstructs the typed error a peer's wire-format response represents,
/// keyed on the wire-stable code (§4.3) rather than the human-readable
/// message. A code outside the known taxonomy (a future peer extension,
/// or a non-conforming implementation) falls back to `InternalError`
/// rather than panicking or dropping the code on the floor.
impl From<JsonRpcErrorObject> for ProtocolError {
    fn from(err: JsonRpcErrorObject) -> Self {
        use error_codes::*;
        match err.code {
            PARSE_ERROR => ProtocolError::ParseError(err.message),
            INVALID_REQUEST => ProtocolError::InvalidRequest(err.message),
            METHOD_NOT_FOUND => ProtocolError::MethodNotFound(err.message),
            INVALID_PARAMS => ProtocolError::InvalidParams(err.message),
            INITIALIZATION_FAILED => ProtocolError::InitializationFailed(err.message),
            TOOL_EXECUTION_ERROR => ProtocolError::ToolExecutionError(err.message),
            RESOURCE_NOT_FOUND => ProtocolError::ResourceNotFound(err.message),
            PERMISSION_DENIED => ProtocolError::PermissionDenied(err.message),
            RATE_LIMIT_EXCEEDED => {
                let retry_after_secs = err
                    .data
                    .as_ref()
                    .and_then(|data| data.get("retryAfter"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0);
                let limit = err
                    .data
                    .as_ref()
                    .and_then(|data| data.get("limit"))
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as u32;
                ProtocolError::RateLimitExceeded {
                    retry_after_secs,
                    limit,
                }
            }
            VALIDATION_ERROR => {
                let instance_path = err
                    .data
                    .as_ref()
                    .and_then(|data| data.get("instancePath"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                ProtocolError::ValidationError {
                    instance_path,
                    message: err.message,
                }
            }
            TIMEOUT_ERROR => ProtocolError::TimeoutError(err.message),
            INTERNAL_ERROR => ProtocolError::InternalError(err.message),
            other => ProtocolError::InternalError(format!("{} (code {other})", err.message)),
        }
    }
}
