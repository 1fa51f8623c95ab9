//! Hello MCP Server Library
//!
//! A Model Context Protocol server exposing a small catalog of tools (a
//! greeting catalog or a basic math catalog) over stdio, SSE or plain HTTP.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP handler, JSON-RPC routing,
//!   the server and its transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: registry, argument binder, dispatcher and tool definitions
//!   - **resources**: data resources that can be read by clients
//!   - **prompts**: prompt templates for consistent interactions
//!
//! # Example
//!
//! ```rust,no_run
//! use hello_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
