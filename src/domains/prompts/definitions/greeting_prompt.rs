//! Greeting prompt definition.

use super::PromptDefinition;
use rmcp::model::PromptArgument;

/// Asks the model for a warm greeting, optionally steered by some context.
pub struct GreetingPrompt;

impl PromptDefinition for GreetingPrompt {
    const NAME: &'static str = "greeting_prompt";
    const DESCRIPTION: &'static str = "A prompt template for generating greetings";

    fn template() -> &'static str {
        "You are a friendly greeting assistant. Generate a warm, welcoming greeting.\
         {{#if context}} Context: {{context}}{{/if}}"
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![PromptArgument {
            name: "context".to_string(),
            title: None,
            description: Some("Additional context for the greeting".to_string()),
            required: Some(false),
        }]
    }
}
