//! JSON-RPC 2.0 envelope types: the canonical wire shape shared by every
//! request, notification, and response that crosses a transport.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON-RPC id, preserved as whichever wire type the peer sent it as.
///
/// Responses must echo the exact id a peer used, including its JSON type
/// (a `1` must come back as a number, a `"1"` as a string) — this sum type
/// keeps that distinction instead of normalizing both to a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Numeric(i64),
    Str(String),
}

impl RequestId {
    pub fn as_json(&self) -> Value {
        match self {
            RequestId::Numeric(n) => Value::from(*n),
            RequestId::Str(s) => Value::from(s.clone()),
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Numeric(n) => write!(f, "{n}"),
            RequestId::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for RequestId {
    fn from(value: i64) -> Self {
        RequestId::Numeric(value)
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        RequestId::Str(value)
    }
}

pub const JSONRPC_VERSION: &str = "2.0";

/// An inbound or outbound request: carries `method` and an `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: RequestId,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    pub fn new(id: RequestId, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method: method.into(),
            params,
        }
    }
}

/// A one-way message: `method` without an `id`, no response expected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcNotification {
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

/// The `{code, message, data}` triple carried by an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcErrorObject {
    pub fn new(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }
}

/// A response: exactly one of `result` or `error` is present, never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: RequestId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorObject>,
}

impl JsonRpcResponse {
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: RequestId, error: JsonRpcErrorObject) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}

/// The union of shapes that can arrive on the wire. Untagged so that
/// deserialization falls through the variants structurally, matching the
/// way the wire format itself distinguishes them (presence of `id`,
/// `method`, `result`, `error`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcNotification),
    Response(JsonRpcResponse),
}

impl JsonRpcMessage {
    pub fn id(&self) -> Option<&RequestId> {
        match self {
            JsonRpcMessage::Request(r) => Some(&r.id),
            JsonRpcMessage::Notification(_) => None,
            JsonRpcMessage::Response(r) => Some(&r.id),
        }
    }

    pub fn method(&self) -> Option<&str> {
        match self {
            JsonRpcMessage::Request(r) => Some(&r.method),
            JsonRpcMessage::Notification(n) => Some(&n.method),
            JsonRpcMessage::Response(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_id_round_trips_numeric_and_string() {
        let numeric: RequestId = serde_json::from_value(json!(1)).unwrap();
        assert_eq!(numeric, RequestId::Numeric(1));
        assert_eq!(serde_json::to_value(&numeric).unwrap(), json!(1));

        let stringly: RequestId = serde_json::from_value(json!("1")).unwrap();
        assert_eq!(stringly, RequestId::Str("1".to_string()));
        assert_eq!(serde_json::to_value(&stringly).unwrap(), json!("1"));

        assert_ne!(numeric, stringly);
    }

    #[test]
    fn request_parses_as_request_variant() {
        let raw = json!({"jsonrpc":"2.0","id":1,"method":"tools/list"});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        match msg {
            JsonRpcMessage::Request(r) => {
                assert_eq!(r.id, RequestId::Numeric(1));
                assert_eq!(r.method, "tools/list");
            }
            other => panic!("expected Request, got {other:?}"),
        }
    }

    #[test]
    fn notification_parses_as_notification_variant() {
        let raw = json!({"jsonrpc":"2.0","method":"initialized"});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(msg, JsonRpcMessage::Notification(_)));
        assert!(msg.id().is_none());
    }

    #[test]
    fn response_never_serializes_both_result_and_error() {
        let ok = JsonRpcResponse::success(RequestId::Numeric(1), json!({"x": 1}));
        let as_value = serde_json::to_value(&ok).unwrap();
        assert!(as_value.get("result").is_some());
        assert!(as_value.get("error").is_none());

        let err = JsonRpcResponse::failure(
            RequestId::Numeric(1),
            JsonRpcErrorObject::new(-32601, "method not found", None),
        );
        let as_value = serde_json::to_value(&err).unwrap();
        assert!(as_value.get("result").is_none());
        assert!(as_value.get("error").is_some());
    }
}
