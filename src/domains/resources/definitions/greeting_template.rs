//! Greeting template resource definition.

use super::{ResourceContext, ResourceDefinition, UriParams};
use crate::domains::resources::error::ResourceError;
use crate::domains::tools::definitions::greeting::greeting_template;

/// Returns the greeting pattern for a style (templated).
pub struct GreetingTemplateResource;

impl ResourceDefinition for GreetingTemplateResource {
    const URI: &'static str = "greeting://template/{greeting_type}";
    const NAME: &'static str = "Greeting Template";
    const DESCRIPTION: &'static str = "Returns a greeting template for the specified type";
    const MIME_TYPE: &'static str = "text/plain";

    fn read(params: &UriParams, _ctx: &ResourceContext) -> Result<String, ResourceError> {
        let greeting_type = params
            .get("greeting_type")
            .ok_or_else(|| ResourceError::internal("greeting_type was not captured"))?;
        let template = greeting_template(greeting_type).unwrap_or("Hello, {name}!");
        Ok(format!("Template for {}: {}", greeting_type, template))
    }
}
