//! Greeting service information tool.

use serde::Serialize;
use serde_json::Value;

use super::super::ToolDefinition;
use crate::core::time::local_timestamp;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::registry::ToolContext;
use crate::domains::tools::schema::{BoundArguments, ParameterSpec, ReturnKind};

const AVAILABLE_LANGUAGES: [&str; 1] = ["English"];

/// Structured output of `get_greeting_info`.
#[derive(Debug, Clone, Serialize)]
pub struct GreetingInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub current_time: String,
    pub available_languages: Vec<&'static str>,
    pub total_greetings_available: usize,
}

/// Returns information about the greeting service.
pub struct GetGreetingInfoTool;

impl ToolDefinition for GetGreetingInfoTool {
    const NAME: &'static str = "get_greeting_info";
    const DESCRIPTION: &'static str = "Returns information about the greeting service";
    const RETURNS: ReturnKind = ReturnKind::Mapping;

    fn parameters() -> Vec<ParameterSpec> {
        vec![]
    }

    fn execute(_args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        let info = GreetingInfo {
            service: "Hello World MCP Server",
            version: env!("CARGO_PKG_VERSION"),
            current_time: local_timestamp(),
            available_languages: AVAILABLE_LANGUAGES.to_vec(),
            total_greetings_available: AVAILABLE_LANGUAGES.len(),
        };
        serde_json::to_value(info).map_err(|e| ToolError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_info_fields() {
        let info =
            GetGreetingInfoTool::execute(&BoundArguments::default(), &ToolContext::default())
                .unwrap();
        assert_eq!(info["service"], "Hello World MCP Server");
        assert_eq!(info["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(info["available_languages"], serde_json::json!(["English"]));
        assert_eq!(info["total_greetings_available"], 1);
        assert!(info["current_time"].is_string());
    }
}
