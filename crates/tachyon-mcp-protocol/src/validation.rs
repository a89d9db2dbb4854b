//! A minimal JSON Schema (draft 2020-12 subset) validator: object types
//! with `properties`, `required`, `type`, `minimum`, `maximum`, `default`,
//! and `enum`. Full draft compliance is a non-goal (§9); this validator
//! exists to gate tool-call arguments against a registered `inputSchema`.

use serde_json::Value;

use crate::error::ProtocolError;

/// One structural mismatch between an instance and its schema, carrying
/// the JSON-Pointer-style path at which the mismatch occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub instance_path: String,
    pub message: String,
}

impl From<ValidationError> for ProtocolError {
    fn from(err: ValidationError) -> Self {
        ProtocolError::ValidationError {
            instance_path: err.instance_path,
            message: err.message,
        }
    }
}

/// Validates `instance` against `schema`, returning the first structural
/// mismatch found. `path` accumulates the JSON-Pointer-style location as
/// validation recurses into object properties and array items.
pub fn validate(instance: &Value, schema: &Value) -> Result<(), ValidationError> {
    validate_at("", instance, schema)
}

fn validate_at(path: &str, instance: &Value, schema: &Value) -> Result<(), ValidationError> {
    let Some(schema_obj) = schema.as_object() else {
        return Ok(());
    };

    if let Some(expected_type) = schema_obj.get("type").and_then(Value::as_str) {
        if !matches_type(instance, expected_type) {
            return Err(ValidationError {
                instance_path: path.to_string(),
                message: format!(
                    "expected type \"{expected_type}\", found {}",
                    type_name(instance)
                ),
            });
        }
    }

    if let Some(allowed) = schema_obj.get("enum").and_then(Value::as_array) {
        if !allowed.contains(instance) {
            return Err(ValidationError {
                instance_path: path.to_string(),
                message: "value is not one of the allowed enum values".to_string(),
            });
        }
    }

    if let Some(minimum) = schema_obj.get("minimum").and_then(Value::as_f64) {
        if let Some(n) = instance.as_f64() {
            if n < minimum {
                return Err(ValidationError {
                    instance_path: path.to_string(),
                    message: format!("value {n} is less than minimum {minimum}"),
                });
            }
        }
    }

    if let Some(maximum) = schema_obj.get("maximum").and_then(Value::as_f64) {
        if let Some(n) = instance.as_f64() {
            if n > maximum {
                return Err(ValidationError {
                    instance_path: path.to_string(),
                    message: format!("value {n} is greater than maximum {maximum}"),
                });
            }
        }
    }

    if let Some(required) = schema_obj.get("required").and_then(Value::as_array) {
        let Some(obj) = instance.as_object() else {
            return Ok(());
        };
        for key in required {
            let Some(key) = key.as_str() else { continue };
            if !obj.contains_key(key) {
                return Err(ValidationError {
                    instance_path: format!("{path}/{key}"),
                    message: format!("missing required property \"{key}\""),
                });
            }
        }
    }

    if let Some(properties) = schema_obj.get("properties").and_then(Value::as_object) {
        if let Some(obj) = instance.as_object() {
            for (key, sub_schema) in properties {
                if let Some(value) = obj.get(key) {
                    validate_at(&format!("{path}/{key}"), value, sub_schema)?;
                }
            }
        }
    }

    if let Some(items_schema) = schema_obj.get("items") {
        if let Some(items) = instance.as_array() {
            for (index, item) in items.iter().enumerate() {
                validate_at(&format!("{path}/{index}"), item, items_schema)?;
            }
        }
    }

    Ok(())
}

fn matches_type(value: &Value, expected: &str) -> bool {
    match expected {
        "object" => value.is_object(),
        "array" => value.is_array(),
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "null" => value.is_null(),
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An empty `arguments` field is equivalent to an empty object (§4.4.3).
pub fn validate_tool_arguments(
    arguments: Option<&Value>,
    schema: Option<&Value>,
) -> Result<(), ValidationError> {
    let Some(schema) = schema else {
        return Ok(());
    };
    if schema.as_object().map(|o| o.is_empty()).unwrap_or(true) {
        return Ok(());
    }
    let empty = Value::Object(Default::default());
    let instance = arguments.unwrap_or(&empty);
    validate(instance, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add_schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": {"type": "number"},
                "b": {"type": "number"}
            },
            "required": ["a", "b"]
        })
    }

    #[test]
    fn accepts_a_matching_instance() {
        let instance = json!({"a": 5, "b": 3});
        assert!(validate(&instance, &add_schema()).is_ok());
    }

    #[test]
    fn reports_missing_required_property_with_instance_path() {
        let instance = json!({"a": 5});
        let err = validate(&instance, &add_schema()).unwrap_err();
        assert_eq!(err.instance_path, "/b");
    }

    #[test]
    fn reports_type_mismatch() {
        let instance = json!({"a": "five", "b": 3});
        let err = validate(&instance, &add_schema()).unwrap_err();
        assert_eq!(err.instance_path, "/a");
    }

    #[test]
    fn empty_schema_always_passes() {
        assert!(validate_tool_arguments(None, Some(&json!({}))).is_ok());
    }

    #[test]
    fn missing_arguments_treated_as_empty_object() {
        let schema = json!({"type": "object", "properties": {}});
        assert!(validate_tool_arguments(None, Some(&schema)).is_ok());
    }

    #[test]
    fn enum_mismatch_is_reported() {
        let schema = json!({"enum": ["a", "b"]});
        let err = validate(&json!("c"), &schema).unwrap_err();
        assert_eq!(err.instance_path, "");
    }

    #[test]
    fn nested_array_items_validate_with_indexed_path() {
        let schema = json!({"type": "array", "items": {"type": "number"}});
        let instance = json!([1, 2, "three"]);
        let err = validate(&instance, &schema).unwrap_err();
        assert_eq!(err.instance_path, "/2");
    }
}
