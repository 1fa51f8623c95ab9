//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Static
//! resources are matched by exact URI first; templated ones are then tried
//! in registration order and their placeholder values handed to the body
//! producer.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use std::fmt;

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use tracing::{debug, info};

use super::definitions::{ResourceContext, ResourceProducer, UriParams};
use super::error::ResourceError;
use super::registry::get_all_resources;
use super::template::UriTemplate;
use crate::domains::tools::Catalog;

/// An entry in the resource registry.
#[derive(Clone)]
pub struct ResourceEntry {
    /// Exact URI or URI template.
    pub template: UriTemplate,

    /// The display name of the resource.
    pub name: String,

    pub description: Option<String>,

    pub mime_type: Option<String>,

    /// Produces the body from the matched placeholder values.
    pub producer: ResourceProducer,
}

impl fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("template", &self.template.as_str())
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Service for managing and accessing resources.
pub struct ResourceService {
    /// Registry of available resources, in registration order.
    entries: Vec<ResourceEntry>,

    /// Facts about the server handed to body producers.
    context: ResourceContext,
}

impl ResourceService {
    /// Create a new ResourceService for a catalog.
    ///
    /// `context.resource_uris` is filled in from the registered static resources.
    pub fn new(catalog: Catalog, context: ResourceContext) -> Result<Self, ResourceError> {
        info!("Initializing ResourceService");

        let mut service = Self {
            entries: Vec::new(),
            context,
        };
        for entry in get_all_resources(catalog)? {
            service.register_resource(entry)?;
        }
        service.context.resource_uris = service
            .static_entries()
            .map(|e| e.template.as_str().to_string())
            .collect();

        Ok(service)
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) -> Result<(), ResourceError> {
        if self.entries.iter().any(|e| e.template == entry.template) {
            return Err(ResourceError::Duplicate(entry.template.as_str().to_string()));
        }
        info!("Registering resource: {}", entry.template.as_str());
        self.entries.push(entry);
        Ok(())
    }

    fn static_entries(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.entries.iter().filter(|e| !e.template.is_templated())
    }

    fn templated_entries(&self) -> impl Iterator<Item = &ResourceEntry> {
        self.entries.iter().filter(|e| e.template.is_templated())
    }

    /// List all concrete resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.static_entries()
            .map(|entry| {
                let mut raw = RawResource::new(entry.template.as_str(), entry.name.clone());
                raw.description = entry.description.clone();
                raw.mime_type = entry.mime_type.clone();
                raw.no_annotation()
            })
            .collect()
    }

    /// List all resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templated_entries()
            .map(|entry| {
                RawResourceTemplate {
                    uri_template: entry.template.as_str().to_string(),
                    name: entry.name.clone(),
                    title: None,
                    description: entry.description.clone(),
                    mime_type: entry.mime_type.clone(),
                }
                .no_annotation()
            })
            .collect()
    }

    /// Resolve a URI to its body and MIME type.
    pub fn resolve(&self, uri: &str) -> Result<(String, Option<String>), ResourceError> {
        let (entry, params) = self.find(uri)?;
        let body = (entry.producer)(&params, &self.context)?;
        Ok((body, entry.mime_type.clone()))
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let (text, mime_type) = self.resolve(uri)?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type,
                text,
                meta: None,
            }],
        })
    }

    fn find(&self, uri: &str) -> Result<(&ResourceEntry, UriParams), ResourceError> {
        if let Some(entry) = self.static_entries().find(|e| e.template.as_str() == uri) {
            return Ok((entry, UriParams::new()));
        }
        self.templated_entries()
            .find_map(|entry| entry.template.match_uri(uri).map(|params| (entry, params)))
            .inspect(|(entry, _)| debug!("{} matched template {}", uri, entry.template.as_str()))
            .ok_or_else(|| ResourceError::not_found(uri))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ResourceContext {
        ResourceContext {
            server_name: "basic-math-server".into(),
            version: "1.0.0".into(),
            tool_names: vec!["add".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_math_lists_static_resources() {
        let service = ResourceService::new(Catalog::Math, context()).unwrap();

        let resources = service.list_resources().await;
        let uris: Vec<_> = resources.iter().map(|r| r.raw.uri.as_str()).collect();
        assert_eq!(uris, vec!["health://status", "server://info"]);
        assert!(service.list_resource_templates().await.is_empty());
    }

    #[tokio::test]
    async fn test_hello_lists_template() {
        let service = ResourceService::new(Catalog::Hello, ResourceContext::default()).unwrap();

        assert!(service.list_resources().await.is_empty());
        let templates = service.list_resource_templates().await;
        assert_eq!(
            templates[0].raw.uri_template,
            "greeting://template/{greeting_type}"
        );
    }

    #[tokio::test]
    async fn test_read_templated_resource() {
        let service = ResourceService::new(Catalog::Hello, ResourceContext::default()).unwrap();

        let (body, mime) = service.resolve("greeting://template/casual").unwrap();
        assert_eq!(body, "Template for casual: What's up, {name}!");
        assert_eq!(mime.as_deref(), Some("text/plain"));

        let result = service.read_resource("greeting://template/casual").await;
        assert_eq!(result.unwrap().contents.len(), 1);
    }

    #[tokio::test]
    async fn test_health_reports_own_resources() {
        let service = ResourceService::new(Catalog::Math, context()).unwrap();
        let (body, _) = service.resolve("health://status").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value["resources_available"],
            serde_json::json!(["health://status", "server://info"])
        );
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let service = ResourceService::new(Catalog::Math, context()).unwrap();

        let result = service.read_resource("mcp://server/nonexistent").await;
        assert!(matches!(result, Err(ResourceError::NotFound(_))));
    }

    #[test]
    fn test_duplicate_registration() {
        let mut service = ResourceService::new(Catalog::Math, context()).unwrap();
        let again = get_all_resources(Catalog::Math).unwrap().remove(0);
        assert!(service.register_resource(again).is_err());
    }
}
