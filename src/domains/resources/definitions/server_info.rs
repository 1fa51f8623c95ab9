//! Server info resource definition.

use serde_json::json;

use super::{ResourceContext, ResourceDefinition, UriParams};
use crate::core::time::local_timestamp;
use crate::domains::resources::error::ResourceError;

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "server://info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Get detailed server information";
    const MIME_TYPE: &'static str = "application/json";

    fn read(_params: &UriParams, ctx: &ResourceContext) -> Result<String, ResourceError> {
        let info = json!({
            "name": ctx.server_name,
            "description": ctx.description,
            "version": ctx.version,
            "created": local_timestamp(),
            "capabilities": {
                "tools": ctx.tool_names.len(),
                "resources": ctx.resource_uris.len(),
                "prompts": ctx.prompt_count,
            },
            "endpoints": {
                "tools": ctx.tool_names,
                "resources": ctx.resource_uris,
            },
        });

        serde_json::to_string_pretty(&info).map_err(|e| ResourceError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_info_metadata() {
        assert_eq!(ServerInfoResource::URI, "server://info");
        assert_eq!(ServerInfoResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_server_info_counts() {
        let ctx = ResourceContext {
            tool_names: vec!["add".into(), "subtract".into()],
            resource_uris: vec!["health://status".into(), "server://info".into()],
            ..Default::default()
        };
        let body = ServerInfoResource::read(&UriParams::new(), &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["capabilities"]["tools"], 2);
        assert_eq!(value["capabilities"]["resources"], 2);
        assert_eq!(value["capabilities"]["prompts"], 0);
    }
}
