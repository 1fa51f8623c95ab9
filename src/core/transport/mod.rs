//! Transport layer for the MCP server.
//!
//! This module provides different transport implementations:
//! - **STDIO**: line-delimited JSON-RPC over stdin/stdout - feature: `stdio`
//! - **SSE**: event stream for responses, POST for requests - feature: `sse`
//! - **HTTP**: REST tool endpoints and JSON-RPC over POST - feature: `http`
//!
//! Each transport handles the connection lifecycle and delegates message
//! processing to [`crate::core::protocol`].
//!
//! # Feature Flags
//!
//! Transport implementations are conditionally compiled based on features:
//! - `stdio`: STDIO transport - minimal dependencies
//! - `sse`: SSE transport - adds axum, tower-http, tokio-stream, uuid
//! - `http`: HTTP transport - adds axum, tower-http

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "sse")]
pub mod sse;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "sse")]
pub use config::SseConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
