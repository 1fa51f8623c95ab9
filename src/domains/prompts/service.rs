//! Prompt service implementation.
//!
//! The PromptService manages prompt templates and their instantiation.
//! It keeps prompts in registration order and handles argument substitution.
//!
//! Prompts are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new prompt does NOT require modifying this file.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use tracing::info;

use super::error::PromptError;
use super::registry::get_all_prompts;
use super::templates::PromptTemplate;
use crate::domains::tools::Catalog;

/// Service for managing and instantiating prompts.
pub struct PromptService {
    /// Registered prompts, in registration order.
    prompts: Vec<PromptTemplate>,
}

impl PromptService {
    /// Create a new PromptService holding the prompts of a catalog.
    pub fn new(catalog: Catalog) -> Result<Self, PromptError> {
        info!("Initializing PromptService");

        let mut service = Self {
            prompts: Vec::new(),
        };
        for template in get_all_prompts(catalog) {
            service.register_prompt(template)?;
        }

        Ok(service)
    }

    /// Register a prompt template.
    pub fn register_prompt(&mut self, template: PromptTemplate) -> Result<(), PromptError> {
        if self.find(&template.name).is_some() {
            return Err(PromptError::Duplicate(template.name));
        }
        info!("Registering prompt: {}", template.name);
        self.prompts.push(template);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    fn find(&self, name: &str) -> Option<&PromptTemplate> {
        self.prompts.iter().find(|p| p.name == name)
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|template| Prompt {
                name: template.name.clone(),
                title: None,
                description: template.description.clone(),
                arguments: Some(template.arguments.clone()),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Get a prompt with arguments substituted.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let template = self.find(name).ok_or_else(|| PromptError::not_found(name))?;

        let arguments = arguments.unwrap_or_default();

        for arg in &template.arguments {
            if arg.required.unwrap_or(false) && !arguments.contains_key(&arg.name) {
                return Err(PromptError::missing_argument(&arg.name));
            }
        }

        let content = template.render(&arguments)?;

        Ok(GetPromptResult {
            description: template.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::PromptMessageContent;

    fn text_of(result: &GetPromptResult) -> String {
        match &result.messages[0].content {
            PromptMessageContent::Text { text } => text.clone(),
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_prompt_service_creation() {
        let service = PromptService::new(Catalog::Hello).unwrap();

        let prompts = service.list_prompts().await;
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "greeting_prompt");
    }

    #[tokio::test]
    async fn test_math_has_no_prompts() {
        let service = PromptService::new(Catalog::Math).unwrap();
        assert!(service.is_empty());
        assert!(service.list_prompts().await.is_empty());
    }

    #[tokio::test]
    async fn test_get_prompt_with_context() {
        let service = PromptService::new(Catalog::Hello).unwrap();

        let mut args = HashMap::new();
        args.insert("context".to_string(), "a birthday party".to_string());

        let result = service.get_prompt("greeting_prompt", Some(args)).await.unwrap();
        assert_eq!(
            text_of(&result),
            "You are a friendly greeting assistant. Generate a warm, welcoming greeting. \
             Context: a birthday party"
        );
    }

    #[tokio::test]
    async fn test_context_is_appended_verbatim() {
        let service = PromptService::new(Catalog::Hello).unwrap();

        let mut args = HashMap::new();
        args.insert("context".to_string(), "use {{name}} as a slot".to_string());

        let result = service.get_prompt("greeting_prompt", Some(args)).await.unwrap();
        assert!(text_of(&result).ends_with(" Context: use {{name}} as a slot"));
    }

    #[tokio::test]
    async fn test_get_prompt_without_context() {
        let service = PromptService::new(Catalog::Hello).unwrap();

        let result = service.get_prompt("greeting_prompt", None).await.unwrap();
        assert_eq!(
            text_of(&result),
            "You are a friendly greeting assistant. Generate a warm, welcoming greeting."
        );
    }

    #[tokio::test]
    async fn test_get_prompt_missing_required_argument() {
        let mut service = PromptService::new(Catalog::Math).unwrap();
        let template = PromptTemplate::new(
            "needs_name",
            None,
            vec![rmcp::model::PromptArgument {
                name: "name".to_string(),
                title: None,
                description: None,
                required: Some(true),
            }],
            "Hi {{name}}",
        );
        service.register_prompt(template).unwrap();

        let result = service.get_prompt("needs_name", None).await;
        assert!(matches!(result, Err(PromptError::MissingArgument(_))));
    }

    #[tokio::test]
    async fn test_get_nonexistent_prompt() {
        let service = PromptService::new(Catalog::Hello).unwrap();

        let result = service.get_prompt("nonexistent", None).await;
        assert!(matches!(result, Err(PromptError::NotFound(_))));
    }
}
