//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] assembles the catalog chosen in [`Config`] (tool registry,
//! dispatcher, resources and prompts) once at startup and is then shared
//! read-only by every transport. It is cheap to clone.
//!
//! The stdio transport drives it through its rmcp [`ServerHandler`]
//! implementation. The HTTP and SSE transports go through
//! [`crate::core::protocol`], which reaches the same inherent methods.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered per catalog in `domains/tools/registry.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    prompts::{PromptError, PromptService},
    resources::{ResourceContext, ResourceError, ResourceService},
    tools::{
        CallRequest, CallResult, Catalog, Dispatcher, FailureKind, ToolRegistry, ToolSummary,
        error_tool_result, success_tool_result,
    },
};

/// The main MCP server.
///
/// Coordinates between the domain services; transports translate their wire
/// format into calls on this type and back.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Routes tool calls through the registry and binder.
    dispatcher: Arc<Dispatcher>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Service for handling prompt-related requests.
    prompt_service: Arc<PromptService>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Fails if the configured catalog cannot be assembled.
    pub fn new(config: Config) -> crate::core::Result<Self> {
        let config = Arc::new(config);
        let catalog = config.server.catalog;

        let registry = Arc::new(ToolRegistry::for_catalog(catalog)?);
        let prompt_service = PromptService::new(catalog)?;

        let context = ResourceContext {
            server_name: config.server.name.clone(),
            version: config.server.version.clone(),
            description: catalog.description().to_string(),
            tool_names: registry.tool_names().into_iter().map(String::from).collect(),
            resource_uris: Vec::new(),
            prompt_count: prompt_service.len(),
        };
        let resource_service = ResourceService::new(catalog, context)?;

        let dispatcher = Dispatcher::with_strictness(registry, config.tools.strict_arguments);
        info!(
            "Catalog '{}' ready with {} tools",
            catalog,
            dispatcher.registry().len()
        );

        Ok(Self {
            config,
            dispatcher: Arc::new(dispatcher),
            resource_service: Arc::new(resource_service),
            prompt_service: Arc::new(prompt_service),
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the tool catalog this server exposes.
    pub fn catalog(&self) -> Catalog {
        self.config.server.catalog
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Human readable instructions sent to clients on initialize.
    pub fn instructions(&self) -> String {
        format!(
            "{}. Call tools/list to see the available tools.",
            self.catalog().description()
        )
    }

    // ========================================================================
    // Tools
    // ========================================================================

    /// List all available tools as MCP tool models.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.dispatcher.registry().tools()
    }

    /// Describe all tools for the REST introspection endpoint.
    pub fn tool_summaries(&self) -> Vec<ToolSummary> {
        self.dispatcher
            .registry()
            .list()
            .map(ToolSummary::from)
            .collect()
    }

    /// Call a tool.
    pub fn call_tool(&self, request: &CallRequest) -> CallResult {
        self.dispatcher.dispatch(request)
    }

    /// Call a tool with MCP `tools/call` semantics.
    ///
    /// Unknown tools and bad arguments are protocol errors. A body that fails
    /// still produces a result, flagged with `isError`.
    pub fn call_tool_result(&self, request: &CallRequest) -> Result<CallToolResult, McpError> {
        match self.call_tool(request) {
            Ok(value) => Ok(success_tool_result(value)),
            Err(e) => match e.kind() {
                FailureKind::NotFound | FailureKind::InvalidArgument => {
                    Err(McpError::invalid_params(e.to_string(), None))
                }
                FailureKind::ExecutionError => Ok(error_tool_result(&e)),
            },
        }
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// List all concrete resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resource_service.list_resources().await
    }

    /// List all resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.resource_service.list_resource_templates().await
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        info!("Reading resource: {}", uri);
        self.resource_service.read_resource(uri).await
    }

    // ========================================================================
    // Prompts
    // ========================================================================

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.prompt_service.list_prompts().await
    }

    /// Render a prompt.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        info!("Getting prompt: {}", name);
        self.prompt_service.get_prompt(name, arguments).await
    }
}

/// Prompt arguments are strings on the wire; other scalars are accepted in
/// their JSON spelling.
pub fn prompt_arguments(arguments: Option<JsonObject>) -> Option<HashMap<String, String>> {
    arguments.map(|map| {
        map.into_iter()
            .map(|(k, v)| match v {
                serde_json::Value::String(s) => (k, s),
                other => (k, other.to_string()),
            })
            .collect()
    })
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: self.name().to_string(),
                title: None,
                version: self.version().to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(self.instructions()),
        }
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult::with_all_items(McpServer::list_tools(self)))
    }

    #[instrument(skip(self, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let call = CallRequest::new(request.name, request.arguments.unwrap_or_default());
        self.call_tool_result(&call)
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult::with_all_items(resources))
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult::with_all_items(templates))
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        McpServer::read_resource(self, &request.uri)
            .await
            .map_err(McpError::from)
    }

    #[instrument(skip(self, _request, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult::with_all_items(prompts))
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let arguments = prompt_arguments(request.arguments);
        McpServer::get_prompt(self, &request.name, arguments)
            .await
            .map_err(McpError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server(catalog: Catalog) -> McpServer {
        McpServer::new(Config::for_catalog(catalog)).unwrap()
    }

    #[test]
    fn test_identity_follows_catalog() {
        let hello = server(Catalog::Hello);
        assert_eq!(hello.name(), "hello-world-server");
        assert_eq!(hello.version(), env!("CARGO_PKG_VERSION"));

        assert_eq!(server(Catalog::Math).name(), "basic-math-server");
    }

    #[test]
    fn test_tool_listing() {
        let math = server(Catalog::Math);
        let names: Vec<_> = math.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["add", "subtract", "multiply", "divide"]);

        let summaries = math.tool_summaries();
        assert_eq!(summaries[0].parameters["a"], "integer (required)");
    }

    #[test]
    fn test_call_tool() {
        let math = server(Catalog::Math);
        let request = CallRequest::from_parts("multiply", Some(json!({"a": 6, "b": 7}))).unwrap();
        assert_eq!(math.call_tool(&request).unwrap(), json!(42));
    }

    #[test]
    fn test_strictness_reaches_dispatcher() {
        let mut config = Config::for_catalog(Catalog::Hello);
        config.tools.strict_arguments = true;
        let strict = McpServer::new(config).unwrap();

        let request =
            CallRequest::from_parts("say_hello", Some(json!({"name": "x", "mood": 1}))).unwrap();
        assert!(strict.call_tool(&request).is_err());
        assert!(server(Catalog::Hello).call_tool(&request).is_ok());
    }

    #[test]
    fn test_call_tool_result_semantics() {
        let math = server(Catalog::Math);

        let ok = CallRequest::from_parts("add", Some(json!({"a": 2, "b": 3}))).unwrap();
        let result = math.call_tool_result(&ok).unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content, Some(json!({"result": 5})));

        let failing = CallRequest::from_parts("divide", Some(json!({"a": 1, "b": 0}))).unwrap();
        let result = math.call_tool_result(&failing).unwrap();
        assert_eq!(result.is_error, Some(true));

        let unknown = CallRequest::from_parts("nonexistent_tool", None).unwrap();
        let error = math.call_tool_result(&unknown).unwrap_err();
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
    }

    #[test]
    fn test_server_info() {
        let info = server(Catalog::Hello).get_info();
        assert_eq!(info.protocol_version, ProtocolVersion::V_2024_11_05);
        assert_eq!(info.server_info.name, "hello-world-server");
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
    }

    #[test]
    fn test_prompt_arguments_stringified() {
        let mut map = JsonObject::new();
        map.insert("context".into(), json!("a wedding"));
        map.insert("guests".into(), json!(3));

        let args = prompt_arguments(Some(map)).unwrap();
        assert_eq!(args["context"], "a wedding");
        assert_eq!(args["guests"], "3");
        assert!(prompt_arguments(None).is_none());
    }

    #[tokio::test]
    async fn test_info_resource_reflects_server() {
        let math = server(Catalog::Math);
        let result = math.read_resource("server://info").await.unwrap();
        let value = serde_json::to_value(&result.contents[0]).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(value["text"].as_str().unwrap()).unwrap();

        assert_eq!(body["name"], "basic-math-server");
        assert_eq!(body["capabilities"]["tools"], 4);
        assert_eq!(body["capabilities"]["resources"], 2);
        assert_eq!(body["capabilities"]["prompts"], 0);
    }

    #[tokio::test]
    async fn test_prompts_per_catalog() {
        assert_eq!(server(Catalog::Hello).list_prompts().await.len(), 1);
        assert!(server(Catalog::Math).list_prompts().await.is_empty());
    }
}
