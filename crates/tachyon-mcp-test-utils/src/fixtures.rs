//! Shared sample data for tests: a tool/resource/prompt definition and a
//! ready-made `initialize` request. Grounded in the teacher's
//! `ultrafast-mcp-test-utils::fixtures` consolidation.

use serde_json::json;

use tachyon_mcp_protocol::{
    ClientCapabilities, Implementation, InitializeParams, Prompt, PromptArgument, Resource, Tool,
    PROTOCOL_VERSION,
};

pub fn test_server_info() -> Implementation {
    Implementation {
        name: "test-server".to_string(),
        version: "1.0.0".to_string(),
    }
}

pub fn test_client_info() -> Implementation {
    Implementation {
        name: "test-client".to_string(),
        version: "1.0.0".to_string(),
    }
}

pub fn add_tool() -> Tool {
    Tool {
        name: "add".to_string(),
        description: "adds two numbers".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {"a": {"type": "number"}, "b": {"type": "number"}},
            "required": ["a", "b"]
        }),
    }
}

pub fn sample_resource() -> Resource {
    Resource {
        uri: "file:///sample.txt".to_string(),
        name: Some("sample".to_string()),
        description: Some("a sample text resource".to_string()),
        mime_type: Some("text/plain".to_string()),
    }
}

pub fn sample_prompt() -> Prompt {
    Prompt {
        name: "greet".to_string(),
        description: Some("greets the named person".to_string()),
        arguments: Some(vec![PromptArgument {
            name: "name".to_string(),
            description: Some("who to greet".to_string()),
            required: Some(true),
        }]),
    }
}

pub fn initialize_params() -> InitializeParams {
    InitializeParams {
        protocol_version: PROTOCOL_VERSION.to_string(),
        capabilities: ClientCapabilities::default(),
        client_info: test_client_info(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_tool_schema_requires_a_and_b() {
        let tool = add_tool();
        let required = tool.input_schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 2);
    }
}
