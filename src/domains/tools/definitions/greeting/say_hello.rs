//! Say hello tool definition.

use serde_json::Value;

use super::super::ToolDefinition;
use crate::domains::tools::error::ToolResult;
use crate::domains::tools::registry::ToolContext;
use crate::domains::tools::schema::{BoundArguments, ParamType, ParameterSpec, ReturnKind};

/// Say hello tool - greets someone by name.
pub struct SayHelloTool;

impl ToolDefinition for SayHelloTool {
    const NAME: &'static str = "say_hello";
    const DESCRIPTION: &'static str = "A simple tool that says hello to someone";
    const RETURNS: ReturnKind = ReturnKind::Scalar;

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::optional("name", ParamType::String, "World")
                .describe("The name to greet (defaults to \"World\")"),
        ]
    }

    fn execute(args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        let name = args.str("name")?;
        Ok(Value::String(format!("Hello, {}! Welcome to MCP!", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_say_hello() {
        let mut args = BoundArguments::default();
        args.push("name", "Alice".into());
        let result = SayHelloTool::execute(&args, &ToolContext::default()).unwrap();
        assert_eq!(result, "Hello, Alice! Welcome to MCP!");
    }
}
