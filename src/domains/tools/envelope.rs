//! Response envelopes.
//!
//! The dispatcher produces a bare [`CallResult`]; transports wrap it in one
//! of the shapes below before putting it on the wire.

use rmcp::model::{CallToolResult, Content};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dispatcher::CallResult;
use super::error::ToolError;
use super::schema::OperationDescriptor;

/// REST envelope: `{"tool": .., "result": ..}` or `{"error": ..}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolEnvelope {
    /// Name of the tool that ran (success only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,

    /// The result data from the tool.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Error message if execution failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolEnvelope {
    /// Create a successful envelope.
    pub fn success(tool: impl Into<String>, result: Value) -> Self {
        Self {
            tool: Some(tool.into()),
            result: Some(result),
            error: None,
        }
    }

    /// Create a failed envelope.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            tool: None,
            result: None,
            error: Some(error.into()),
        }
    }

    pub fn from_result(tool: &str, result: &CallResult) -> Self {
        match result {
            Ok(value) => Self::success(tool, value.clone()),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

/// Entry of the REST introspection listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
    /// Parameter name to a short signature such as `string (required)`.
    pub parameters: Map<String, Value>,
}

impl From<&OperationDescriptor> for ToolSummary {
    fn from(descriptor: &OperationDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: descriptor
                .parameters
                .iter()
                .map(|p| (p.name.clone(), Value::String(p.signature())))
                .collect(),
        }
    }
}

/// MCP result for a successful call.
///
/// Strings go out as-is in the text content; anything else as compact JSON.
/// Mappings are also sent as structured content, other values wrapped as
/// `{"result": value}`.
pub fn success_tool_result(value: Value) -> CallToolResult {
    let text = match &value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let structured = match value {
        Value::Object(map) => Value::Object(map),
        other => serde_json::json!({ "result": other }),
    };

    CallToolResult {
        content: vec![Content::text(text)],
        structured_content: Some(structured),
        is_error: Some(false),
        meta: None,
    }
}

/// MCP result for a call whose body failed.
pub fn error_tool_result(error: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::schema::{ParamType, ParameterSpec, ReturnKind};
    use rmcp::model::RawContent;
    use serde_json::json;

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn test_envelope_shapes() {
        let ok = serde_json::to_value(ToolEnvelope::success("add", json!(5))).unwrap();
        assert_eq!(ok, json!({"tool": "add", "result": 5}));

        let err = serde_json::to_value(ToolEnvelope::failure("boom")).unwrap();
        assert_eq!(err, json!({"error": "boom"}));
    }

    #[test]
    fn test_scalar_result() {
        let result = success_tool_result(json!("Hello, World! Welcome to MCP!"));
        assert_eq!(text_of(&result), "Hello, World! Welcome to MCP!");
        assert_eq!(
            result.structured_content,
            Some(json!({"result": "Hello, World! Welcome to MCP!"}))
        );
        assert_eq!(result.is_error, Some(false));
    }

    #[test]
    fn test_mapping_result() {
        let result = success_tool_result(json!({"greeting": "hi"}));
        assert_eq!(result.structured_content, Some(json!({"greeting": "hi"})));
        assert_eq!(text_of(&result), r#"{"greeting":"hi"}"#);
    }

    #[test]
    fn test_error_result() {
        let result = error_tool_result(&ToolError::execution_failed("Cannot divide by zero"));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(text_of(&result), "Cannot divide by zero");
    }

    #[test]
    fn test_summary() {
        let descriptor = OperationDescriptor {
            name: "say_hello".into(),
            description: "A simple tool that says hello to someone".into(),
            parameters: vec![ParameterSpec::optional("name", ParamType::String, "World")],
            return_kind: ReturnKind::Scalar,
        };
        let summary = ToolSummary::from(&descriptor);
        assert_eq!(
            summary.parameters["name"],
            "string (optional, default='World')"
        );
    }
}
