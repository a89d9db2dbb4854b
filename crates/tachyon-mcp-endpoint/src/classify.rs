//! Inbound message classification (§4.4.1): every parsed message is sorted
//! into exactly one of five buckets before anything else happens to it.

use tachyon_mcp_protocol::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, JsonRpcResponse};

#[derive(Debug)]
pub enum Classification {
    SuccessResponse(JsonRpcResponse),
    ErrorResponse(JsonRpcResponse),
    InboundRequest(JsonRpcRequest),
    InboundNotification(JsonRpcNotification),
    /// Neither a recognized request, notification, nor response shape —
    /// e.g. an envelope carrying an `id` but no `method`, `result`, or
    /// `error`. §4.4.1 case 5: answer with `InvalidRequest` since an id
    /// is present.
    Malformed { id: tachyon_mcp_protocol::RequestId },
}

pub fn classify(message: JsonRpcMessage) -> Classification {
    match message {
        JsonRpcMessage::Response(response) if response.result.is_none() && response.error.is_none() => {
            Classification::Malformed { id: response.id }
        }
        JsonRpcMessage::Response(response) if response.is_success() => {
            Classification::SuccessResponse(response)
        }
        JsonRpcMessage::Response(response) => Classification::ErrorResponse(response),
        JsonRpcMessage::Request(request) => Classification::InboundRequest(request),
        JsonRpcMessage::Notification(notification) => {
            Classification::InboundNotification(notification)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_with_result_classifies_as_success() {
        let raw = json!({"jsonrpc":"2.0","id":1,"result":{}});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(classify(msg), Classification::SuccessResponse(_)));
    }

    #[test]
    fn response_with_error_classifies_as_error_response() {
        let raw = json!({"jsonrpc":"2.0","id":1,"error":{"code":-32601,"message":"nope"}});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(classify(msg), Classification::ErrorResponse(_)));
    }

    #[test]
    fn request_with_id_classifies_as_inbound_request() {
        let raw = json!({"jsonrpc":"2.0","id":1,"method":"tools/list"});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(classify(msg), Classification::InboundRequest(_)));
    }

    #[test]
    fn method_without_id_classifies_as_notification() {
        let raw = json!({"jsonrpc":"2.0","method":"initialized"});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(
            classify(msg),
            Classification::InboundNotification(_)
        ));
    }

    #[test]
    fn id_without_method_result_or_error_classifies_as_malformed() {
        let raw = json!({"jsonrpc":"2.0","id":1});
        let msg: JsonRpcMessage = serde_json::from_value(raw).unwrap();
        assert!(matches!(classify(msg), Classification::Malformed { .. }));
    }
}
