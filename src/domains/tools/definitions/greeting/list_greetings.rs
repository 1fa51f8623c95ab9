//! List available greetings tool definition.

use serde_json::Value;

use super::super::ToolDefinition;
use super::GREETING_TYPES;
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::registry::ToolContext;
use crate::domains::tools::schema::{BoundArguments, ParameterSpec, ReturnKind};

/// Lists all available greeting types.
pub struct ListAvailableGreetingsTool;

impl ToolDefinition for ListAvailableGreetingsTool {
    const NAME: &'static str = "list_available_greetings";
    const DESCRIPTION: &'static str = "Lists all available greeting types";
    const RETURNS: ReturnKind = ReturnKind::Sequence;

    fn parameters() -> Vec<ParameterSpec> {
        vec![]
    }

    fn execute(_args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        Ok(Value::from(GREETING_TYPES.to_vec()))
    }
}
