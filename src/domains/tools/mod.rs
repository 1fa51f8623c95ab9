//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific actions or computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations, grouped by catalog
//! - `schema.rs` - Descriptors, parameter specs and bound values
//! - `registry.rs` - Ordered tool registry and catalog builders
//! - `binder.rs` - Argument validation, coercion and defaults
//! - `dispatcher.rs` - Call routing inside an error boundary
//! - `envelope.rs` - Wire shapes for results and introspection
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/<catalog>/` (e.g., `my_tool.rs`)
//! 2. Implement `ToolDefinition`
//! 3. Export in `definitions/mod.rs`
//! 4. Add it to the catalog in `registry.rs`
//!
//! Transports never need to change: they only talk to the `Dispatcher`.

pub mod binder;
pub mod definitions;
pub mod dispatcher;
pub mod envelope;
mod error;
pub mod registry;
pub mod schema;

pub use binder::ArgumentBinder;
pub use dispatcher::{CallRequest, CallResult, Dispatcher};
pub use envelope::{ToolEnvelope, ToolSummary, error_tool_result, success_tool_result};
pub use error::{FailureKind, RegistryError, ToolError, ToolResult};
pub use registry::{Catalog, ToolBody, ToolContext, ToolEntry, ToolRegistry};
pub use schema::{
    ArgValue, BoundArguments, OperationDescriptor, ParamType, ParameterSpec, ReturnKind,
};
