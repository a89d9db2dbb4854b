//! The three extensible capability kinds — tools, resources, prompts —
//! and the payload shapes their handlers produce.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::{ClientCapabilities, Implementation, ServerCapabilities};

pub const PROTOCOL_VERSION: &str = "2024-11-05";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<PromptArgument>>,
}

/// A single content block in a tool result, per the `{type, text}` shape
/// §4.4.3 specifies for wrapping non-string handler output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    pub content_type: String,
    pub text: String,
}

impl TextContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content_type: "text".to_string(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<TextContent>,
}

/// Turns an arbitrary handler return value into the wire's text-content
/// wrapper: strings pass through verbatim, everything else is stringified
/// JSON (§4.4.3 "wrap return value into a text content block").
pub fn wrap_tool_result(value: Value) -> ToolCallResult {
    let text = match value {
        Value::String(s) => s,
        other => other.to_string(),
    };
    ToolCallResult {
        content: vec![TextContent::text(text)],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
}

pub const DEFAULT_MIME_TYPE: &str = "text/plain";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: String,
    pub content: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPromptResult {
    pub messages: Vec<PromptMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeParams {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ClientCapabilities,
    #[serde(rename = "clientInfo")]
    pub client_info: Implementation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: Implementation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wraps_string_result_verbatim() {
        let result = wrap_tool_result(json!("hello"));
        assert_eq!(result.content[0].text, "hello");
    }

    #[test]
    fn wraps_numeric_result_as_stringified_json() {
        let result = wrap_tool_result(json!(8));
        assert_eq!(result.content[0].text, "8");
    }

    #[test]
    fn wraps_object_result_as_stringified_json() {
        let result = wrap_tool_result(json!({"sum": 8}));
        assert_eq!(result.content[0].text, r#"{"sum":8}"#);
    }

    #[test]
    fn tool_input_schema_renames_on_the_wire() {
        let tool = Tool {
            name: "add".into(),
            description: "adds two numbers".into(),
            input_schema: json!({"type": "object"}),
        };
        let value = serde_json::to_value(&tool).unwrap();
        assert!(value.get("inputSchema").is_some());
    }
}
