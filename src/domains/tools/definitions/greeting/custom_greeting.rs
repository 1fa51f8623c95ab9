//! Custom greeting tool definition.

use chrono::{Local, Timelike};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::super::ToolDefinition;
use super::{DEFAULT_GREETING_TYPE, GREETING_TYPES, greeting_template};
use crate::core::time::local_timestamp;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::registry::ToolContext;
use crate::domains::tools::schema::{BoundArguments, ParamType, ParameterSpec, ReturnKind};

/// Structured output of `create_custom_greeting`.
#[derive(Debug, Clone, Serialize)]
pub struct CustomGreeting {
    pub greeting: String,
    pub recipient: String,
    /// The style as requested, even when it fell back to the default.
    #[serde(rename = "type")]
    pub greeting_type: String,
    pub timestamp: Option<String>,
}

/// Creates a custom greeting with various options.
pub struct CreateCustomGreetingTool;

impl CreateCustomGreetingTool {
    /// Build the greeting for a given local hour.
    pub fn compose(
        name: &str,
        greeting_type: &str,
        hour: Option<u32>,
        strict: bool,
    ) -> ToolResult<String> {
        let template = match greeting_template(greeting_type) {
            Some(template) => template,
            None if strict => {
                return Err(ToolError::invalid_arguments(format!(
                    "unknown greeting_type '{}' (expected one of: {})",
                    greeting_type,
                    GREETING_TYPES.join(", ")
                )));
            }
            None => {
                debug!(
                    "Unknown greeting type '{}', using '{}'",
                    greeting_type, DEFAULT_GREETING_TYPE
                );
                greeting_template(DEFAULT_GREETING_TYPE).unwrap_or("Hello, {name}!")
            }
        };

        let greeting = template.replace("{name}", name);
        Ok(match hour {
            Some(hour) => format!("{}, {}! {}", time_of_day(hour), name, greeting),
            None => greeting,
        })
    }
}

/// Salutation for a local hour in `0..24`.
pub fn time_of_day(hour: u32) -> &'static str {
    match hour {
        0..12 => "Good morning",
        12..18 => "Good afternoon",
        _ => "Good evening",
    }
}

impl ToolDefinition for CreateCustomGreetingTool {
    const NAME: &'static str = "create_custom_greeting";
    const DESCRIPTION: &'static str = "Creates a custom greeting with various options";
    const RETURNS: ReturnKind = ReturnKind::Mapping;

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("name", ParamType::String)
                .describe("The name to include in the greeting"),
            ParameterSpec::optional("greeting_type", ParamType::String, DEFAULT_GREETING_TYPE)
                .describe("Type of greeting - \"friendly\", \"formal\", or \"casual\""),
            ParameterSpec::optional("include_time", ParamType::Boolean, false)
                .describe("Whether to include the current time in the greeting"),
        ]
    }

    fn execute(args: &BoundArguments, ctx: &ToolContext) -> ToolResult<Value> {
        let name = args.str("name")?;
        let greeting_type = args.str("greeting_type")?;
        let include_time = args.bool("include_time")?;

        let hour = include_time.then(|| Local::now().hour());
        let greeting = Self::compose(name, greeting_type, hour, ctx.strict)?;

        let output = CustomGreeting {
            greeting,
            recipient: name.to_string(),
            greeting_type: greeting_type.to_string(),
            timestamp: include_time.then(local_timestamp),
        };
        serde_json::to_value(output).map_err(|e| ToolError::internal(e.to_string()))
    }
}
