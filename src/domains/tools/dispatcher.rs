//! Call dispatch.
//!
//! The dispatcher resolves a [`CallRequest`] against the registry, binds its
//! arguments and runs the tool body inside an error boundary. Whatever the
//! body does, the caller gets a [`CallResult`] back; nothing unwinds into the
//! transport layer.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use super::binder::ArgumentBinder;
use super::error::{ToolError, ToolResult};
use super::registry::{ToolContext, ToolRegistry};

/// Outcome of one call: the tool's value or a classified failure.
pub type CallResult = ToolResult<Value>;

/// A call-by-name request as decoded by a transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallRequest {
    /// The name of the tool to execute.
    pub name: String,

    /// The arguments to pass to the tool.
    #[serde(default)]
    pub arguments: Map<String, Value>,
}

impl CallRequest {
    pub fn new(name: impl Into<String>, arguments: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Build a request from a JSON value; anything but an object (or null)
    /// for `arguments` is rejected.
    pub fn from_parts(name: impl Into<String>, arguments: Option<Value>) -> ToolResult<Self> {
        let arguments = match arguments {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(_) => {
                return Err(ToolError::invalid_arguments(
                    "arguments must be a JSON object",
                ));
            }
        };
        Ok(Self::new(name, arguments))
    }
}

/// Routes calls to registered tools.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    binder: ArgumentBinder,
    context: ToolContext,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, binder: ArgumentBinder, context: ToolContext) -> Self {
        Self {
            registry,
            binder,
            context,
        }
    }

    /// Build a dispatcher whose binder and tools share one strictness setting.
    pub fn with_strictness(registry: Arc<ToolRegistry>, strict: bool) -> Self {
        Self::new(
            registry,
            ArgumentBinder::new(strict),
            ToolContext { strict },
        )
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Dispatch one call.
    #[instrument(skip_all, fields(tool = %request.name))]
    pub fn dispatch(&self, request: &CallRequest) -> CallResult {
        let result = self.run(request);
        match &result {
            Ok(_) => info!("Tool '{}' succeeded", request.name),
            Err(e) => warn!("Tool '{}' failed: {}", request.name, e),
        }
        result
    }

    fn run(&self, request: &CallRequest) -> CallResult {
        let entry = self.registry.get(&request.name)?;
        let bound = self.binder.bind(&entry.descriptor, &request.arguments)?;

        let outcome = catch_unwind(AssertUnwindSafe(|| (entry.body)(&bound, &self.context)));
        let value = match outcome {
            Ok(Ok(value)) => value,
            // A body cannot report "tool not found" about itself.
            Ok(Err(e @ ToolError::NotFound(_))) => {
                return Err(ToolError::execution_failed(e.to_string()));
            }
            Ok(Err(e)) => return Err(e),
            Err(panic) => return Err(ToolError::execution_failed(panic_message(&*panic))),
        };

        if !entry.descriptor.return_kind.matches(&value) {
            return Err(ToolError::internal(format!(
                "tool '{}' returned a value that is not a {:?}",
                entry.descriptor.name, entry.descriptor.return_kind
            )));
        }

        Ok(value)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}
