//! Tool-specific error types.

use thiserror::Error;

/// Result type returned by tool bodies and the dispatcher.
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Coarse classification of a failed call, used by transports to pick
/// their native error signal (status code, JSON-RPC code, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    InvalidArgument,
    ExecutionError,
}

/// Errors that can occur during tool operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("Tool '{0}' not found")]
    NotFound(String),

    /// Invalid arguments were provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool body failed.
    #[error("{0}")]
    ExecutionFailed(String),

    /// A tool body broke its own contract (bad parameter access, wrong
    /// result shape). Reported to callers as an execution error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound(_) => FailureKind::NotFound,
            Self::InvalidArguments(_) => FailureKind::InvalidArgument,
            Self::ExecutionFailed(_) | Self::Internal(_) => FailureKind::ExecutionError,
        }
    }
}

/// Catalog construction errors. These surface at startup, never per call.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two tools were registered under the same name.
    #[error("Tool '{0}' is already registered")]
    DuplicateName(String),

    /// An optional parameter lacks a default, or its default has the wrong type.
    #[error("Tool '{tool}': parameter '{parameter}' {reason}")]
    InvalidDefault {
        tool: String,
        parameter: String,
        reason: String,
    },
}
