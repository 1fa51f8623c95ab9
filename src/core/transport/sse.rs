//! SSE (Server-Sent Events) transport.
//!
//! Clients open `GET /sse` and receive an `endpoint` event naming the URL to
//! POST their JSON-RPC messages to (`/messages/?session_id=<id>`). Responses
//! come back on the event stream as `message` events.
//!
//! Every stream is its own session with its own worker task, so messages of
//! one session are answered in the order they were posted while sessions
//! proceed independently of each other.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{
        IntoResponse,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::stream::Stream;
use serde::Deserialize;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{RwLock, mpsc};
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{TransportError, TransportResult, config::SseConfig};
use crate::core::McpServer;
use crate::core::protocol::{JsonRpcRequest, handle_request};

/// Path clients POST their messages to.
pub const MESSAGES_PATH: &str = "/messages/";

/// Per-session queue depth, in both directions.
const SESSION_BUFFER: usize = 64;

type SessionMap = Arc<RwLock<HashMap<String, mpsc::Sender<JsonRpcRequest>>>>;

/// SSE transport handler.
pub struct SseTransport {
    config: SseConfig,
}

/// State shared by the SSE handlers.
#[derive(Clone)]
struct SseState {
    server: McpServer,
    sessions: SessionMap,
    keep_alive: Duration,
}

#[derive(Debug, Deserialize)]
struct SessionQuery {
    session_id: String,
}

impl SseTransport {
    /// Create a new SSE transport with the given config.
    pub fn new(config: SseConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = SseState {
            server,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            keep_alive: Duration::from_secs(self.config.keep_alive_secs),
        };

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/sse", get(sse_handler))
            .route(MESSAGES_PATH, post(message_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(cors)
    }

    /// Run the SSE transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (SSE)", addr);
        info!("  → Stream:   GET /sse");
        info!("  → Messages: POST {}?session_id=<id>", MESSAGES_PATH);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Open a session and stream its responses.
async fn sse_handler(
    State(state): State<SseState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4().simple().to_string();
    info!("SSE client connected, session {}", session_id);

    let (inbox_tx, inbox_rx) = mpsc::channel(SESSION_BUFFER);
    let (event_tx, event_rx) = mpsc::channel(SESSION_BUFFER);

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?session_id={}", MESSAGES_PATH, session_id));
    // The channel is fresh, so this cannot be full.
    let _ = event_tx.try_send(Ok(endpoint));

    state
        .sessions
        .write()
        .await
        .insert(session_id.clone(), inbox_tx);

    tokio::spawn(session_worker(
        state.server.clone(),
        state.sessions.clone(),
        session_id,
        inbox_rx,
        event_tx,
    ));

    Sse::new(ReceiverStream::new(event_rx)).keep_alive(KeepAlive::new().interval(state.keep_alive))
}

/// Answer the messages of one session in order until its stream goes away.
async fn session_worker(
    server: McpServer,
    sessions: SessionMap,
    session_id: String,
    mut inbox: mpsc::Receiver<JsonRpcRequest>,
    events: mpsc::Sender<Result<Event, Infallible>>,
) {
    loop {
        let request = tokio::select! {
            request = inbox.recv() => match request {
                Some(request) => request,
                None => break,
            },
            _ = events.closed() => break,
        };

        let Some(response) = handle_request(&server, request).await else {
            continue;
        };

        let event = match Event::default().event("message").json_data(&response) {
            Ok(event) => event,
            Err(e) => {
                warn!("Could not encode response for session {}: {}", session_id, e);
                continue;
            }
        };
        if events.send(Ok(event)).await.is_err() {
            break;
        }
    }

    sessions.write().await.remove(&session_id);
    info!("SSE session {} closed", session_id);
}

/// Accept a message for a session.
#[instrument(skip_all, fields(session = %query.session_id))]
async fn message_handler(
    State(state): State<SseState>,
    Query(query): Query<SessionQuery>,
    body: String,
) -> impl IntoResponse {
    let Some(inbox) = state.sessions.read().await.get(&query.session_id).cloned() else {
        warn!("Message for unknown session");
        return (StatusCode::NOT_FOUND, "Could not find session");
    };

    let request = match serde_json::from_str::<JsonRpcRequest>(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected message: {}", e);
            return (StatusCode::BAD_REQUEST, "Could not parse message");
        }
    };

    info!("Received JSON-RPC request: {}", request.method);
    match inbox.send(request).await {
        Ok(()) => (StatusCode::ACCEPTED, "Accepted"),
        Err(_) => (StatusCode::NOT_FOUND, "Could not find session"),
    }
}

/// Health check endpoint.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "alive" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::tools::Catalog;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app(catalog: Catalog) -> Router {
        let server = McpServer::new(Config::for_catalog(catalog)).unwrap();
        SseTransport::new(SseConfig::default()).router(server)
    }

    /// Next chunk of event-stream text.
    async fn next_chunk(body: &mut Body) -> String {
        let frame = tokio::time::timeout(Duration::from_secs(5), body.frame())
            .await
            .expect("timed out waiting for event")
            .expect("stream ended")
            .unwrap();
        match frame.into_data() {
            Ok(data) => String::from_utf8(data.to_vec()).unwrap(),
            Err(_) => String::new(),
        }
    }

    /// Read stream frames until `needle` shows up, returning everything read.
    async fn read_until(body: &mut Body, needle: &str) -> String {
        let mut text = String::new();
        while !text.contains(needle) {
            text.push_str(&next_chunk(body).await);
        }
        text
    }

    /// Read until `count` complete `message` events arrived; return their data.
    async fn read_messages(body: &mut Body, count: usize) -> Vec<Value> {
        let mut text = String::new();
        loop {
            let complete = text.rfind("\n\n").map_or("", |end| &text[..end]);
            let messages: Vec<Value> = complete
                .split("\n\n")
                .filter(|event| event.lines().any(|line| line == "event: message"))
                .filter_map(|event| event.lines().find_map(|line| line.strip_prefix("data: ")))
                .map(|data| serde_json::from_str(data).unwrap())
                .collect();
            if messages.len() >= count {
                return messages;
            }
            text.push_str(&next_chunk(body).await);
        }
    }

    async fn open_session(app: &Router) -> (Body, String) {
        let response = app
            .clone()
            .oneshot(Request::get("/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let mut stream = response.into_body();
        let endpoint = endpoint_from(&read_until(&mut stream, "event: endpoint").await);
        (stream, endpoint)
    }

    fn add_call(id: u32, a: i64, b: i64) -> String {
        format!(
            r#"{{"jsonrpc":"2.0","id":{},"method":"tools/call","params":{{"name":"add","arguments":{{"a":{},"b":{}}}}}}}"#,
            id, a, b
        )
    }

    fn endpoint_from(text: &str) -> String {
        text.lines()
            .find_map(|line| line.strip_prefix("data: "))
            .unwrap()
            .to_string()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_round_trip_over_stream() {
        let app = app(Catalog::Math);

        let response = app
            .clone()
            .oneshot(Request::get("/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let mut stream = response.into_body();

        let first = read_until(&mut stream, "event: endpoint").await;
        let endpoint = endpoint_from(&first);
        assert!(endpoint.starts_with("/messages/?session_id="));

        let accepted = app
            .clone()
            .oneshot(post_json(
                &endpoint,
                r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"divide","arguments":{"a":10,"b":0}}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::ACCEPTED);

        let text = read_until(&mut stream, "event: message").await;
        let data = text
            .split("event: message")
            .nth(1)
            .and_then(|rest| rest.lines().find_map(|l| l.strip_prefix("data: ")))
            .unwrap();
        let message: Value = serde_json::from_str(data).unwrap();
        assert_eq!(message["id"], 1);
        assert_eq!(message["result"]["isError"], true);
        assert_eq!(message["result"]["content"][0]["text"], "Cannot divide by zero");
    }

    #[tokio::test]
    async fn test_sessions_are_independent_and_ordered() {
        let app = app(Catalog::Math);
        let (mut first, first_endpoint) = open_session(&app).await;
        let (mut second, second_endpoint) = open_session(&app).await;
        assert_ne!(first_endpoint, second_endpoint);

        let posts = [
            (&first_endpoint, add_call(1, 1, 0)),
            (&second_endpoint, add_call(101, 100, 1)),
            (&first_endpoint, add_call(2, 2, 0)),
            (&second_endpoint, add_call(102, 100, 2)),
            (&first_endpoint, add_call(3, 3, 0)),
        ];
        for (endpoint, body) in posts {
            let response = app.clone().oneshot(post_json(endpoint, &body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::ACCEPTED);
        }

        let ids_and_results = |messages: Vec<Value>| -> Vec<(i64, i64)> {
            messages
                .iter()
                .map(|m| {
                    (
                        m["id"].as_i64().unwrap(),
                        m["result"]["structuredContent"]["result"].as_i64().unwrap(),
                    )
                })
                .collect()
        };

        let first_messages = read_messages(&mut first, 3).await;
        assert_eq!(ids_and_results(first_messages), vec![(1, 1), (2, 2), (3, 3)]);

        let second_messages = read_messages(&mut second, 2).await;
        assert_eq!(ids_and_results(second_messages), vec![(101, 101), (102, 102)]);
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let response = app(Catalog::Hello)
            .oneshot(post_json(
                "/messages/?session_id=missing",
                r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_message() {
        let app = app(Catalog::Hello);
        let response = app
            .clone()
            .oneshot(Request::get("/sse").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let mut stream = response.into_body();
        let endpoint = endpoint_from(&read_until(&mut stream, "event: endpoint").await);

        let response = app.oneshot(post_json(&endpoint, "{broken")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let response = app(Catalog::Hello)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, serde_json::json!({"status": "alive"}));
    }
}
