//! Tool definitions module.
//!
//! Each tool is a unit struct implementing [`ToolDefinition`]: its name,
//! description, parameter list, result shape and body. Catalogs in
//! `registry.rs` turn definitions into registry entries.
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in the catalog's folder (e.g. `greeting/my_tool.rs`)
//! 2. Implement `ToolDefinition`
//! 3. Export it here
//! 4. Add it to the catalog in `registry.rs`

use serde_json::Value;

use super::error::ToolResult;
use super::registry::ToolContext;
use super::schema::{BoundArguments, ParameterSpec, ReturnKind};

pub mod greeting;
pub mod math;

pub use greeting::{
    CreateCustomGreetingTool, GetGreetingInfoTool, ListAvailableGreetingsTool, SayHelloTool,
};
pub use math::{AddTool, DivideTool, MultiplyTool, SubtractTool};

/// Trait for tool definitions.
pub trait ToolDefinition {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Shape of a successful result.
    const RETURNS: ReturnKind;

    /// Declared parameters, in binding order.
    fn parameters() -> Vec<ParameterSpec>;

    /// Run the tool against already-bound arguments.
    fn execute(args: &BoundArguments, ctx: &ToolContext) -> ToolResult<Value>;
}
