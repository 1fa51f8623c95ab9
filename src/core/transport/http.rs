//! HTTP transport implementation.
//!
//! Plain request/response HTTP with two faces:
//! - a small REST API (`GET /tools`, `POST /tools/call`) for curl and scripts
//! - JSON-RPC over POST on the configured path for MCP clients

use axum::{
    Json, Router,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::protocol::handle_message;
use crate::domains::tools::{CallRequest, FailureKind, ToolEnvelope};

/// Paths served besides the JSON-RPC endpoint.
const RESERVED_PATHS: [&str; 4] = ["/", "/tools", "/tools/call", "/health"];

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
}

/// Body of `POST /tools/call`.
#[derive(Debug, Deserialize)]
struct ToolCallBody {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// The JSON-RPC path, normalised to start with `/`.
    fn rpc_path(&self) -> TransportResult<String> {
        let path = if self.config.rpc_path.starts_with('/') {
            self.config.rpc_path.clone()
        } else {
            format!("/{}", self.config.rpc_path)
        };
        if RESERVED_PATHS.contains(&path.as_str()) {
            return Err(TransportError::http(format!(
                "JSON-RPC path '{}' collides with a built-in route",
                path
            )));
        }
        Ok(path)
    }

    /// Build the router serving `server`.
    pub fn router(&self, server: McpServer) -> TransportResult<Router> {
        let rpc_path = self.rpc_path()?;
        let state = AppState {
            server,
            rpc_path: rpc_path.clone(),
        };

        let mut app = Router::new()
            .route("/", get(root_handler))
            .route("/tools", get(list_tools_handler))
            .route("/tools/call", post(call_tool_handler))
            .route(&rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        if self.config.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        Ok(app)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server)?;

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (HTTP, CORS {})", addr, cors_status);
        info!("  → Tools:    GET /tools, POST /tools/call");
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// HTTP status for a failed call.
fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::InvalidArgument => StatusCode::BAD_REQUEST,
        FailureKind::ExecutionError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "description": state.server.catalog().description(),
        "transport": "HTTP",
        "endpoints": {
            "tools": "/tools",
            "call": "/tools/call",
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Tool introspection.
async fn list_tools_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "tools": state.server.tool_summaries() }))
}

/// Call a tool by name.
#[instrument(skip_all)]
async fn call_tool_handler(State(state): State<AppState>, body: String) -> Response {
    let body: ToolCallBody = match serde_json::from_str(&body) {
        Ok(body) => body,
        Err(e) => {
            warn!("Rejected tool call body: {}", e);
            let envelope = ToolEnvelope::failure(format!("Invalid request body: {}", e));
            return (StatusCode::BAD_REQUEST, Json(envelope)).into_response();
        }
    };

    let request = match CallRequest::from_parts(body.name, body.arguments) {
        Ok(request) => request,
        Err(e) => {
            return (status_for(e.kind()), Json(ToolEnvelope::failure(e.to_string())))
                .into_response();
        }
    };

    let result = state.server.call_tool(&request);
    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => status_for(e.kind()),
    };
    (status, Json(ToolEnvelope::from_result(&request.name, &result))).into_response()
}

/// Handle JSON-RPC requests.
async fn handle_rpc(State(state): State<AppState>, body: String) -> Response {
    match handle_message(&state.server, &body).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "server": state.server.name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
