//! Tool Registry - central registration and lookup for all tools.
//!
//! This module provides:
//! - The [`ToolRegistry`], an ordered, read-only-after-startup catalog
//! - The [`Catalog`] selector and the builders for each catalog
//! - Tool metadata for listing over MCP

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rmcp::model::Tool;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::definitions::{
    AddTool, CreateCustomGreetingTool, DivideTool, GetGreetingInfoTool,
    ListAvailableGreetingsTool, MultiplyTool, SayHelloTool, SubtractTool, ToolDefinition,
};
use super::error::{RegistryError, ToolError, ToolResult};
use super::schema::{BoundArguments, OperationDescriptor};

// ============================================================================
// Entries
// ============================================================================

/// Per-call settings handed to tool bodies.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToolContext {
    /// Strict mode: tools reject values they would otherwise tolerate.
    pub strict: bool,
}

/// Executable body of a tool.
pub type ToolBody = fn(&BoundArguments, &ToolContext) -> ToolResult<Value>;

/// A registered tool: its descriptor plus the function that runs it.
#[derive(Clone)]
pub struct ToolEntry {
    pub descriptor: OperationDescriptor,
    pub body: ToolBody,
}

impl fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEntry")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl ToolEntry {
    /// Build an entry from a tool definition.
    pub fn of<T: ToolDefinition>() -> Self {
        Self {
            descriptor: OperationDescriptor {
                name: T::NAME.to_string(),
                description: T::DESCRIPTION.to_string(),
                parameters: T::parameters(),
                return_kind: T::RETURNS,
            },
            body: T::execute,
        }
    }

    /// Create a Tool model for this entry (metadata).
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.descriptor.name.clone().into(),
            description: Some(self.descriptor.description.clone().into()),
            input_schema: Arc::new(self.descriptor.input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - the ordered catalog of all available tools.
///
/// Populated once at startup and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    entries: Vec<ToolEntry>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry for a catalog.
    pub fn for_catalog(catalog: Catalog) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        let entries = match catalog {
            Catalog::Hello => vec![
                ToolEntry::of::<SayHelloTool>(),
                ToolEntry::of::<GetGreetingInfoTool>(),
                ToolEntry::of::<CreateCustomGreetingTool>(),
                ToolEntry::of::<ListAvailableGreetingsTool>(),
            ],
            Catalog::Math => vec![
                ToolEntry::of::<AddTool>(),
                ToolEntry::of::<SubtractTool>(),
                ToolEntry::of::<MultiplyTool>(),
                ToolEntry::of::<DivideTool>(),
            ],
        };
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    /// Register a tool.
    ///
    /// Fails if the name is taken or an optional parameter's default does not
    /// satisfy its declared type.
    pub fn register(&mut self, entry: ToolEntry) -> Result<(), RegistryError> {
        let descriptor = &entry.descriptor;
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name.clone()));
        }

        for param in descriptor.parameters.iter().filter(|p| !p.required) {
            let reason = match &param.default {
                None => Some("is optional but has no default".to_string()),
                Some(default) if default.param_type() != param.param_type => Some(format!(
                    "default {} is not a {}",
                    default, param.param_type
                )),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                return Err(RegistryError::InvalidDefault {
                    tool: descriptor.name.clone(),
                    parameter: param.name.clone(),
                    reason,
                });
            }
        }

        debug!("Registering tool: {}", descriptor.name);
        self.index.insert(descriptor.name.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Look up a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&ToolEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Look up a tool by name, failing with [`ToolError::NotFound`].
    pub fn get(&self, name: &str) -> ToolResult<&ToolEntry> {
        self.lookup(name).ok_or_else(|| ToolError::not_found(name))
    }

    /// All descriptors in registration order. Each call starts a fresh pass.
    pub fn list(&self) -> impl Iterator<Item = &OperationDescriptor> + '_ {
        self.entries.iter().map(|e| &e.descriptor)
    }

    /// Get all tool names in registration order.
    pub fn tool_names(&self) -> Vec<&str> {
        self.list().map(|d| d.name.as_str()).collect()
    }

    /// Get all tools as Tool models (metadata) for `tools/list`.
    pub fn tools(&self) -> Vec<Tool> {
        self.entries.iter().map(ToolEntry::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Catalog selection
// ============================================================================

/// Which set of tools, resources and prompts the server exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    /// Greeting tools, a greeting template resource and a greeting prompt.
    #[default]
    Hello,
    /// Integer/float arithmetic with health and info resources.
    Math,
}

impl Catalog {
    /// Server name reported when none is configured.
    pub fn default_server_name(self) -> &'static str {
        match self {
            Self::Hello => "hello-world-server",
            Self::Math => "basic-math-server",
        }
    }

    /// One-line description of the server.
    pub fn description(self) -> &'static str {
        match self {
            Self::Hello => "A simple MCP server that demonstrates basic functionality",
            Self::Math => "A FastMCP server providing basic mathematical operations",
        }
    }
}

impl FromStr for Catalog {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hello" | "greeting" => Ok(Self::Hello),
            "math" => Ok(Self::Math),
            other => Err(format!("unknown catalog '{}' (expected hello or math)", other)),
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hello => f.write_str("hello"),
            Self::Math => f.write_str("math"),
        }
    }
}
