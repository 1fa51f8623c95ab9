//! Health status resource definition.

use serde_json::json;

use super::{ResourceContext, ResourceDefinition, UriParams};
use crate::core::time::local_timestamp;
use crate::domains::resources::error::ResourceError;

/// Current health of the server.
pub struct HealthStatusResource;

impl ResourceDefinition for HealthStatusResource {
    const URI: &'static str = "health://status";
    const NAME: &'static str = "Health Status";
    const DESCRIPTION: &'static str = "Get the current health status of the server";
    const MIME_TYPE: &'static str = "application/json";

    fn read(_params: &UriParams, ctx: &ResourceContext) -> Result<String, ResourceError> {
        let health = json!({
            "status": "healthy",
            "timestamp": local_timestamp(),
            "server_name": ctx.server_name,
            "version": ctx.version,
            "uptime": "running",
            "tools_available": ctx.tool_names,
            "resources_available": ctx.resource_uris,
        });
        serde_json::to_string_pretty(&health).map_err(|e| ResourceError::internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_body() {
        let ctx = ResourceContext {
            server_name: "basic-math-server".into(),
            version: "1.0.0".into(),
            tool_names: vec!["add".into(), "divide".into()],
            ..Default::default()
        };
        let body = HealthStatusResource::read(&UriParams::new(), &ctx).unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["status"], "healthy");
        assert_eq!(value["server_name"], "basic-math-server");
        assert_eq!(value["tools_available"], json!(["add", "divide"]));
    }
}
