//! JSON-RPC 2.0 message handling for the HTTP and SSE transports.
//!
//! Those transports only move bytes. They hand each decoded message to
//! [`handle_message`] (or [`handle_request`] when they decode themselves) and
//! send back whatever response comes out. Notifications produce no response.
//! Method semantics live on [`McpServer`], so answers match the rmcp-driven
//! stdio transport.

use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{
        CallToolRequestParam, GetPromptRequestParam, ListPromptsResult,
        ListResourceTemplatesResult, ListResourcesResult, ListToolsResult,
        ReadResourceRequestParam,
    },
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use super::server::{McpServer, prompt_arguments};
use crate::domains::tools::CallRequest;

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a 2.0 request.
    pub fn new(id: impl Into<Value>, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id.into()),
            method: method.into(),
            params,
        }
    }

    /// A request without an id expects no response.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error (the message was not JSON).
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(None, PARSE_ERROR, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Option<Value>, method: &str) -> Self {
        Self::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    /// Invalid request error.
    pub fn invalid_request(id: Option<Value>) -> Self {
        Self::error(id, INVALID_REQUEST, "Invalid Request")
    }

    /// Internal error.
    pub fn internal_error(id: Option<Value>, msg: impl Into<String>) -> Self {
        Self::error(id, INTERNAL_ERROR, msg)
    }

    /// Error response carrying an rmcp error.
    pub fn from_mcp_error(id: Option<Value>, error: McpError) -> Self {
        let mut response = Self::error(id, error.code.0, error.message);
        if let Some(body) = response.error.as_mut() {
            body.data = error.data;
        }
        response
    }

    /// Success or error response for a method outcome.
    fn outcome<T: Serialize>(id: Option<Value>, result: Result<T, McpError>) -> Self {
        match result {
            Ok(result) => Self::serialized(id, &result),
            Err(e) => Self::from_mcp_error(id, e),
        }
    }

    /// Serialize `result` into a success response.
    fn serialized<T: Serialize>(id: Option<Value>, result: &T) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::internal_error(id, e.to_string()),
        }
    }
}

/// Decode one raw message and process it.
///
/// Malformed JSON yields a parse error response, well-formed JSON that is
/// not a request yields an invalid request response.
pub async fn handle_message(server: &McpServer, raw: &str) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Unparseable message: {}", e);
            return Some(JsonRpcResponse::parse_error(format!("Parse error: {}", e)));
        }
    };

    let id = value.get("id").cloned();
    match serde_json::from_value::<JsonRpcRequest>(value) {
        Ok(request) => handle_request(server, request).await,
        Err(e) => {
            warn!("Malformed request: {}", e);
            Some(JsonRpcResponse::invalid_request(id))
        }
    }
}

/// Process a JSON-RPC request and return the response, if one is due.
#[instrument(skip_all, fields(method = %request.method))]
pub async fn handle_request(server: &McpServer, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(request.id));
    }

    if request.is_notification() {
        handle_notification(&request);
        return None;
    }

    let id = request.id;
    let params = request.params.unwrap_or(Value::Null);
    let response = match request.method.as_str() {
        "initialize" => {
            info!("Processing initialize request");
            JsonRpcResponse::serialized(id, &server.get_info())
        }
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => {
            let tools = ListToolsResult::with_all_items(server.list_tools());
            JsonRpcResponse::serialized(id, &tools)
        }
        "tools/call" => match decode_params::<CallToolRequestParam>(params) {
            Ok(params) => {
                let call = CallRequest::new(params.name, params.arguments.unwrap_or_default());
                JsonRpcResponse::outcome(id, server.call_tool_result(&call))
            }
            Err(e) => JsonRpcResponse::from_mcp_error(id, e),
        },
        "resources/list" => {
            let resources = ListResourcesResult::with_all_items(server.list_resources().await);
            JsonRpcResponse::serialized(id, &resources)
        }
        "resources/templates/list" => {
            let templates = server.list_resource_templates().await;
            JsonRpcResponse::serialized(id, &ListResourceTemplatesResult::with_all_items(templates))
        }
        "resources/read" => match decode_params::<ReadResourceRequestParam>(params) {
            Ok(params) => {
                let result = server.read_resource(&params.uri).await.map_err(McpError::from);
                JsonRpcResponse::outcome(id, result)
            }
            Err(e) => JsonRpcResponse::from_mcp_error(id, e),
        },
        "prompts/list" => {
            let prompts = ListPromptsResult::with_all_items(server.list_prompts().await);
            JsonRpcResponse::serialized(id, &prompts)
        }
        "prompts/get" => match decode_params::<GetPromptRequestParam>(params) {
            Ok(params) => {
                let arguments = prompt_arguments(params.arguments);
                let result = server
                    .get_prompt(&params.name, arguments)
                    .await
                    .map_err(McpError::from);
                JsonRpcResponse::outcome(id, result)
            }
            Err(e) => JsonRpcResponse::from_mcp_error(id, e),
        },
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::method_not_found(id, method)
        }
    };

    Some(response)
}

fn handle_notification(request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => info!("Client sent initialized notification"),
        method => info!("Received notification: {}", method),
    }
}

/// Decode method params into their rmcp request type.
fn decode_params<T: DeserializeOwned>(params: Value) -> Result<T, McpError> {
    serde_json::from_value(params)
        .map_err(|e| McpError::invalid_params(format!("Invalid params: {}", e), None))
}
