//! Resource Registry - central registration of all resources.
//!
//! This module provides per-catalog resource registration without modifying
//! service.rs. When adding a new resource:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `get_all_resources()`

use super::definitions::{
    GreetingTemplateResource, HealthStatusResource, ResourceDefinition, ServerInfoResource,
};
use super::error::ResourceError;
use super::service::ResourceEntry;
use super::template::UriTemplate;
use crate::domains::tools::Catalog;

/// Build a registry entry from a definition.
fn build_entry<R: ResourceDefinition>() -> Result<ResourceEntry, ResourceError> {
    Ok(ResourceEntry {
        template: UriTemplate::parse(R::URI)?,
        name: R::NAME.to_string(),
        description: Some(R::DESCRIPTION.to_string()),
        mime_type: Some(R::MIME_TYPE.to_string()),
        producer: R::read,
    })
}

/// Get all resources (static and templated) registered for a catalog,
/// in registration order.
pub fn get_all_resources(catalog: Catalog) -> Result<Vec<ResourceEntry>, ResourceError> {
    match catalog {
        Catalog::Hello => Ok(vec![build_entry::<GreetingTemplateResource>()?]),
        Catalog::Math => Ok(vec![
            build_entry::<HealthStatusResource>()?,
            build_entry::<ServerInfoResource>()?,
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_resources() {
        let resources = get_all_resources(Catalog::Math).unwrap();
        let uris: Vec<_> = resources.iter().map(|r| r.template.as_str()).collect();
        assert_eq!(uris, vec!["health://status", "server://info"]);
        assert!(resources.iter().all(|r| !r.template.is_templated()));
    }

    #[test]
    fn test_hello_resources() {
        let resources = get_all_resources(Catalog::Hello).unwrap();
        assert_eq!(resources.len(), 1);
        assert!(resources[0].template.is_templated());
    }
}
