//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP, served by the rmcp service loop.
//! [`LineTransport`] does the framing: one JSON-RPC message per line in, one
//! per line out. Logs go to stderr, so stdout carries protocol traffic only.
//!
//! The channel is strictly serial. The next line is read only after the
//! previous request has been answered. A line that is not a JSON-RPC message
//! (bad UTF-8, bad JSON, unknown shape) gets an error reply and is skipped;
//! it never ends the session.

use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::model::JsonRpcMessage;
use rmcp::service::{RxJsonRpcMessage, TxJsonRpcMessage};
use rmcp::transport::Transport;
use rmcp::{ErrorData as McpError, RoleServer, ServiceExt};
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::{Mutex as AsyncMutex, OwnedSemaphorePermit, Semaphore};
use tracing::{debug, error, info, warn};

use super::{TransportError, TransportResult};
use crate::core::McpServer;
use crate::core::protocol::JsonRpcResponse;

/// Request methods a client may send.
const CLIENT_METHODS: [&str; 13] = [
    "ping",
    "initialize",
    "completion/complete",
    "logging/setLevel",
    "prompts/get",
    "prompts/list",
    "resources/list",
    "resources/templates/list",
    "resources/read",
    "resources/subscribe",
    "resources/unsubscribe",
    "tools/call",
    "tools/list",
];

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin reaches end of file.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let (stdin, stdout) = rmcp::transport::stdio();
        Self::serve(server, stdin, stdout).await?;

        info!("STDIO transport finished");
        Ok(())
    }

    /// Serve one MCP session over `reader` and `writer`.
    ///
    /// Returns when the reader is exhausted.
    pub async fn serve<R, W>(server: McpServer, reader: R, writer: W) -> TransportResult<()>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let service = server
            .serve(LineTransport::new(reader, writer))
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| TransportError::ServiceError(e.to_string()))?;
        debug!("Session ended: {:?}", reason);

        Ok(())
    }
}

/// Newline-delimited JSON-RPC framing for the rmcp service loop.
///
/// Holding the turn permit means "a line may be read". It passes to the
/// pending request when one is handed out and is released once its response
/// has been written.
pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    writer: Arc<AsyncMutex<W>>,
    line: Vec<u8>,
    turn: Arc<Semaphore>,
    held: Option<OwnedSemaphorePermit>,
    pending: Arc<Mutex<Option<OwnedSemaphorePermit>>>,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer: Arc::new(AsyncMutex::new(writer)),
            line: Vec::new(),
            turn: Arc::new(Semaphore::new(1)),
            held: None,
            pending: Arc::new(Mutex::new(None)),
        }
    }

    fn pending(&self) -> MutexGuard<'_, Option<OwnedSemaphorePermit>> {
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Answer a rejected line.
    ///
    /// The reply takes the turn with it, so the next line is read only after
    /// the reply is on the wire. The read loop may be cancelled at any await
    /// point, which is why the write runs in its own task.
    fn reject(&mut self, response: JsonRpcResponse) {
        let writer = self.writer.clone();
        let turn = self.held.take();
        tokio::spawn(async move {
            if let Err(e) = write_line(&writer, &response).await {
                error!("Failed to write error reply: {}", e);
            }
            drop(turn);
        });
    }

    /// Decode one complete line. `None` means the line was consumed without
    /// producing a message.
    fn decode(&mut self, line: &[u8]) -> Option<RxJsonRpcMessage<RoleServer>> {
        let text = match std::str::from_utf8(line) {
            Ok(text) => text.trim(),
            Err(e) => {
                warn!("Rejected line that is not UTF-8: {}", e);
                self.reject(JsonRpcResponse::parse_error(format!("Parse error: {}", e)));
                return None;
            }
        };
        if text.is_empty() {
            return None;
        }
        debug!("<- {}", text);

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                self.reject(JsonRpcResponse::parse_error(format!("Parse error: {}", e)));
                return None;
            }
        };

        let id = value.get("id").cloned();
        let method = value.get("method").and_then(Value::as_str).map(String::from);
        match serde_json::from_value::<RxJsonRpcMessage<RoleServer>>(value) {
            Ok(message) => Some(message),
            Err(e) => {
                let Some(id) = id else {
                    debug!("Ignoring unrecognised notification: {}", e);
                    return None;
                };
                warn!("Malformed request: {}", e);
                let response = match method.as_deref() {
                    Some(method) if CLIENT_METHODS.contains(&method) => {
                        let error = McpError::invalid_params(format!("Invalid params: {}", e), None);
                        JsonRpcResponse::from_mcp_error(Some(id), error)
                    }
                    Some(method) => JsonRpcResponse::method_not_found(Some(id), method),
                    None => JsonRpcResponse::invalid_request(Some(id)),
                };
                self.reject(response);
                None
            }
        }
    }
}

impl<R, W> Transport<RoleServer> for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send + 'static,
{
    type Error = std::io::Error;

    fn send(
        &mut self,
        item: TxJsonRpcMessage<RoleServer>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'static {
        let writer = self.writer.clone();
        let answered = match item {
            JsonRpcMessage::Response(_) | JsonRpcMessage::Error(_) => self.pending().take(),
            _ => None,
        };
        async move {
            let result = write_line(&writer, &item).await;
            drop(answered);
            result
        }
    }

    async fn receive(&mut self) -> Option<RxJsonRpcMessage<RoleServer>> {
        loop {
            if self.held.is_none() {
                self.held = Some(self.turn.clone().acquire_owned().await.ok()?);
            }

            // Partial reads stay in `self.line`, so a cancelled call resumes
            // where it stopped.
            match self.reader.read_until(b'\n', &mut self.line).await {
                Ok(0) if self.line.is_empty() => return None,
                Ok(_) => {}
                Err(e) => {
                    error!("Error reading from stdin: {}", e);
                    return None;
                }
            }

            let line = std::mem::take(&mut self.line);
            let Some(message) = self.decode(&line) else {
                continue;
            };

            let turn = self.held.take();
            if matches!(message, JsonRpcMessage::Request(_)) {
                *self.pending() = turn;
            }
            return Some(message);
        }
    }

    async fn close(&mut self) -> Result<(), Self::Error> {
        self.writer.lock().await.shutdown().await
    }
}

async fn write_line<W, T>(writer: &AsyncMutex<W>, message: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut out = serde_json::to_vec(message)?;
    out.push(b'\n');

    let mut writer = writer.lock().await;
    writer.write_all(&out).await?;
    writer.flush().await
}
