//! Prompt Registry - per-catalog registration of prompts.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_prompts()`

use super::definitions::{GreetingPrompt, PromptDefinition};
use super::templates::PromptTemplate;
use crate::domains::tools::Catalog;

/// Build a PromptTemplate from a PromptDefinition.
fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate::new(
        P::NAME,
        Some(P::DESCRIPTION.to_string()),
        P::arguments(),
        P::template(),
    )
}

/// Get the prompts registered for a catalog, in registration order.
pub fn get_all_prompts(catalog: Catalog) -> Vec<PromptTemplate> {
    match catalog {
        Catalog::Hello => vec![build_template::<GreetingPrompt>()],
        Catalog::Math => Vec::new(),
    }
}
