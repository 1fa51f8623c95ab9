//! Resources domain module.
//!
//! This module handles all resource-related functionality for the MCP server.
//! Resources are read-only text bodies addressed by URI. A URI may contain
//! `{placeholder}` segments, in which case it is a template and the matched
//! values are passed to the body producer.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Per-catalog resource registration
//! - `service.rs` - Resource service for listing and reading
//! - `template.rs` - URI template parsing and matching
//!
//! ## Adding a New Resource
//!
//! 1. Create a new file in `definitions/` (e.g., `my_resource.rs`)
//! 2. Implement the `ResourceDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`
//!
//! **No need to modify `service.rs`!**

pub mod definitions;
mod error;
mod registry;
mod service;
pub mod template;

pub use definitions::{ResourceContext, ResourceDefinition};
pub use error::ResourceError;
pub use registry::get_all_resources;
pub use service::{ResourceEntry, ResourceService};
pub use template::UriTemplate;
