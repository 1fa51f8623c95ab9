//! Resource definitions module.
//!
//! Each resource is defined in its own file with:
//! - URI (or URI template) and metadata
//! - A body producer taking the placeholder values
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

use std::collections::HashMap;

use super::error::ResourceError;

pub mod greeting_template;
pub mod health_status;
pub mod server_info;

pub use greeting_template::GreetingTemplateResource;
pub use health_status::HealthStatusResource;
pub use server_info::ServerInfoResource;

/// Facts about the running server that resource bodies may report.
#[derive(Debug, Clone, Default)]
pub struct ResourceContext {
    pub server_name: String,
    pub version: String,
    pub description: String,
    pub tool_names: Vec<String>,
    pub resource_uris: Vec<String>,
    pub prompt_count: usize,
}

/// Placeholder values extracted from a matched URI.
pub type UriParams = HashMap<String, String>;

/// Produces the body of a resource.
pub type ResourceProducer = fn(&UriParams, &ResourceContext) -> Result<String, ResourceError>;

/// Trait for resource definitions.
///
/// Each resource must implement this trait to provide its metadata and content.
pub trait ResourceDefinition {
    /// The URI of the resource; `{name}` segments make it a template.
    const URI: &'static str;

    /// The display name of the resource.
    const NAME: &'static str;

    /// A description of the resource.
    const DESCRIPTION: &'static str;

    /// The MIME type of the resource content.
    const MIME_TYPE: &'static str;

    /// Produce the content for the given placeholder values.
    fn read(params: &UriParams, ctx: &ResourceContext) -> Result<String, ResourceError>;
}
