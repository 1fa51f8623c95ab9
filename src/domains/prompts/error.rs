//! Prompt-specific error types.

use rmcp::ErrorData as McpError;
use thiserror::Error;

/// Errors that can occur during prompt operations.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The requested prompt was not found.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// Required argument is missing.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Two prompts were registered under the same name.
    #[error("Prompt '{0}' is already registered")]
    Duplicate(String),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "missing argument" error.
    pub fn missing_argument(arg: impl Into<String>) -> Self {
        Self::MissingArgument(arg.into())
    }

    /// Create a new "template" error.
    pub fn template(msg: impl Into<String>) -> Self {
        Self::TemplateError(msg.into())
    }
}

impl From<PromptError> for McpError {
    fn from(error: PromptError) -> Self {
        match error {
            PromptError::NotFound(_) | PromptError::MissingArgument(_) => {
                McpError::invalid_params(error.to_string(), None)
            }
            PromptError::Duplicate(_) | PromptError::TemplateError(_) => {
                McpError::internal_error(error.to_string(), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_caller_mistakes_are_invalid_params() {
        let error: McpError = PromptError::missing_argument("context").into();
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert_eq!(error.message, "Missing required argument: context");

        let error: McpError = PromptError::template("Missing {{/if}} tag").into();
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
