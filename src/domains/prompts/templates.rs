//! Prompt templates module.
//!
//! This module contains the PromptTemplate struct and the small rendering
//! engine behind it.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::error::PromptError;

const IF_OPEN: &str = "{{#if ";
const ELSE_TAG: &str = "{{else}}";
const ENDIF_TAG: &str = "{{/if}}";

/// A prompt template that can be instantiated with arguments.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The unique name of the prompt.
    pub name: String,

    /// A description of what the prompt does.
    pub description: Option<String>,

    /// The arguments that this prompt accepts.
    pub arguments: Vec<PromptArgument>,

    /// The template string with placeholders.
    /// Uses a simple {{variable}} syntax for substitution.
    pub template: String,
}

impl PromptTemplate {
    /// Create a new prompt template.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        arguments: Vec<PromptArgument>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            arguments,
            template: template.into(),
        }
    }

    /// Render the template with the given arguments.
    ///
    /// - `{{variable}}` is replaced with the value of `variable`
    /// - `{{#if variable}}content{{/if}}` includes content only if variable is non-empty
    /// - `{{#if variable}}content{{else}}alternative{{/if}}` with else support
    ///
    /// Placeholders for arguments that were not supplied render as nothing.
    pub fn render(&self, arguments: &HashMap<String, String>) -> Result<String, PromptError> {
        let resolved = process_conditionals(&self.template, arguments)?;
        Ok(substitute_placeholders(&resolved, arguments))
    }
}

/// Resolve `{{#if}}` blocks. Blocks do not nest.
fn process_conditionals(
    template: &str,
    arguments: &HashMap<String, String>,
) -> Result<String, PromptError> {
    let mut result = template.to_string();

    while let Some(if_start) = result.find(IF_OPEN) {
        let var_end = result[if_start..]
            .find("}}")
            .map(|pos| if_start + pos)
            .ok_or_else(|| PromptError::template("Unclosed {{#if}} tag"))?;
        let var_name = result[if_start + IF_OPEN.len()..var_end].trim();

        let endif_pos = result[var_end..]
            .find(ENDIF_TAG)
            .map(|pos| var_end + pos)
            .ok_or_else(|| PromptError::template("Missing {{/if}} tag"))?;

        let block = &result[var_end + 2..endif_pos];
        let (when_set, otherwise) = match block.find(ELSE_TAG) {
            Some(else_pos) => (&block[..else_pos], &block[else_pos + ELSE_TAG.len()..]),
            None => (block, ""),
        };

        let is_set = arguments.get(var_name).is_some_and(|v| !v.is_empty());
        let replacement = if is_set { when_set } else { otherwise };

        result = format!(
            "{}{}{}",
            &result[..if_start],
            replacement,
            &result[endif_pos + ENDIF_TAG.len()..]
        );
    }

    Ok(result)
}

/// Replace every `{{variable}}` in one left-to-right pass.
///
/// Inserted values are copied verbatim and never rescanned, so argument text
/// that looks like a placeholder survives. Block tags are left alone.
fn substitute_placeholders(template: &str, arguments: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let inner = &rest[open + 2..];
        let Some(close) = inner.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let tag = &inner[..close];
        if tag.contains('#') || tag.contains('/') {
            out.push_str(&rest[open..open + close + 4]);
        } else if let Some(value) = arguments.get(tag.trim()) {
            out.push_str(value);
        }
        rest = &inner[close + 2..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, args: &[(&str, &str)]) -> Result<String, PromptError> {
        let args = args
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        PromptTemplate::new("test", None, vec![], template).render(&args)
    }

    #[test]
    fn test_simple_substitution() {
        assert_eq!(
            render("Hello, {{name}}!", &[("name", "World")]).unwrap(),
            "Hello, World!"
        );
    }

    #[test]
    fn test_conditional_with_value() {
        let result = render("Hello{{#if name}}, {{name}}{{/if}}!", &[("name", "World")]);
        assert_eq!(result.unwrap(), "Hello, World!");
    }

    #[test]
    fn test_conditional_without_value() {
        assert_eq!(
            render("Hello{{#if name}}, {{name}}{{/if}}!", &[]).unwrap(),
            "Hello!"
        );
    }

    #[test]
    fn test_empty_value_counts_as_unset() {
        let result = render("Hi{{#if context}} ({{context}}){{/if}}", &[("context", "")]);
        assert_eq!(result.unwrap(), "Hi");
    }

    #[test]
    fn test_conditional_with_else() {
        let result = render("Hello, {{#if name}}{{name}}{{else}}stranger{{/if}}!", &[]);
        assert_eq!(result.unwrap(), "Hello, stranger!");
    }

    #[test]
    fn test_unmatched_placeholder_removed() {
        assert_eq!(render("Hello, {{name}}!", &[]).unwrap(), "Hello, !");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let result = render(
            "{{greeting}}, {{name}}!",
            &[("greeting", "Hi {{name}}"), ("name", "{{greeting}}")],
        );
        assert_eq!(result.unwrap(), "Hi {{name}}, {{greeting}}!");

        let result = render(
            "Go.{{#if context}} Context: {{context}}{{/if}}",
            &[("context", "use {{name}} as a slot")],
        );
        assert_eq!(result.unwrap(), "Go. Context: use {{name}} as a slot");
    }

    #[test]
    fn test_unclosed_conditional() {
        assert!(matches!(
            render("{{#if name}}dangling", &[]),
            Err(PromptError::TemplateError(_))
        ));
    }
}
