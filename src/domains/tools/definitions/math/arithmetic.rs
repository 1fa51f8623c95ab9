//! Basic arithmetic tool definitions.
//!
//! Integer operations use checked arithmetic: an overflow is reported as an
//! execution error instead of wrapping.

use serde_json::Value;
use tracing::info;

use super::super::ToolDefinition;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::registry::ToolContext;
use crate::domains::tools::schema::{BoundArguments, ParamType, ParameterSpec, ReturnKind};

fn integer_operands() -> Vec<ParameterSpec> {
    vec![
        ParameterSpec::required("a", ParamType::Integer).describe("First number"),
        ParameterSpec::required("b", ParamType::Integer).describe("Second number"),
    ]
}

fn checked(
    args: &BoundArguments,
    symbol: &str,
    op: fn(i64, i64) -> Option<i64>,
) -> ToolResult<Value> {
    let a = args.i64("a")?;
    let b = args.i64("b")?;
    let result = op(a, b).ok_or_else(|| {
        ToolError::execution_failed(format!("Integer overflow computing {} {} {}", a, symbol, b))
    })?;
    info!("{} {} {} = {}", a, symbol, b, result);
    Ok(Value::from(result))
}

/// Add two numbers together.
pub struct AddTool;

impl ToolDefinition for AddTool {
    const NAME: &'static str = "add";
    const DESCRIPTION: &'static str = "Add two numbers together";
    const RETURNS: ReturnKind = ReturnKind::Scalar;

    fn parameters() -> Vec<ParameterSpec> {
        integer_operands()
    }

    fn execute(args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        checked(args, "+", i64::checked_add)
    }
}

/// Subtract second number from first number.
pub struct SubtractTool;

impl ToolDefinition for SubtractTool {
    const NAME: &'static str = "subtract";
    const DESCRIPTION: &'static str = "Subtract second number from first number";
    const RETURNS: ReturnKind = ReturnKind::Scalar;

    fn parameters() -> Vec<ParameterSpec> {
        integer_operands()
    }

    fn execute(args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        checked(args, "-", i64::checked_sub)
    }
}

/// Multiply two numbers together.
pub struct MultiplyTool;

impl ToolDefinition for MultiplyTool {
    const NAME: &'static str = "multiply";
    const DESCRIPTION: &'static str = "Multiply two numbers together";
    const RETURNS: ReturnKind = ReturnKind::Scalar;

    fn parameters() -> Vec<ParameterSpec> {
        integer_operands()
    }

    fn execute(args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        checked(args, "*", i64::checked_mul)
    }
}

/// Divide first number by second number.
pub struct DivideTool;

impl ToolDefinition for DivideTool {
    const NAME: &'static str = "divide";
    const DESCRIPTION: &'static str = "Divide first number by second number";
    const RETURNS: ReturnKind = ReturnKind::Scalar;

    fn parameters() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::required("a", ParamType::Float).describe("Dividend"),
            ParameterSpec::required("b", ParamType::Float).describe("Divisor"),
        ]
    }

    fn execute(args: &BoundArguments, _ctx: &ToolContext) -> ToolResult<Value> {
        let a = args.f64("a")?;
        let b = args.f64("b")?;
        if b == 0.0 {
            return Err(ToolError::execution_failed("Cannot divide by zero"));
        }
        let result = a / b;
        if !result.is_finite() {
            return Err(ToolError::execution_failed(format!(
                "Result of {} / {} is out of range",
                a, b
            )));
        }
        info!("Dividing {} / {} = {}", a, b, result);
        Ok(Value::from(result))
    }
}
