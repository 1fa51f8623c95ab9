//! Resource-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource or template matches the URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The resource URI or URI template is malformed.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Two resources were registered under the same URI pattern.
    #[error("Resource '{0}' is already registered")]
    Duplicate(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<ResourceError> for McpError {
    fn from(error: ResourceError) -> Self {
        match error {
            ResourceError::NotFound(_) => McpError::resource_not_found(error.to_string(), None),
            ResourceError::InvalidUri(_) => McpError::invalid_params(error.to_string(), None),
            ResourceError::Duplicate(_) | ResourceError::Internal(_) => {
                McpError::internal_error(error.to_string(), None)
            }
        }
    }
}
