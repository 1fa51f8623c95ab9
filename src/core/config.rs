//! Configuration management for the MCP server.
//!
//! Configuration is built from defaults, then overridden by `MCP_*`
//! environment variables (a `.env` file in the working directory is loaded
//! first when present).

use super::error::{Error, Result};
use super::transport::TransportConfig;
use crate::domains::tools::Catalog;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Which tool catalog to expose.
    pub catalog: Catalog,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Reject unknown argument keys and unknown enumerated values instead of
    /// ignoring or defaulting them.
    pub strict_arguments: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_catalog(Catalog::default())
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration for a catalog; the server name follows the catalog.
    pub fn for_catalog(catalog: Catalog) -> Self {
        Self {
            server: ServerConfig {
                name: catalog.default_server_name().to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                catalog,
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Recognised variables: `MCP_CATALOG`, `MCP_SERVER_NAME`,
    /// `MCP_STRICT_ARGUMENTS`, `MCP_LOG_LEVEL` and the transport variables
    /// read by [`TransportConfig::from_lookup`].
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration through a variable lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog = match lookup("MCP_CATALOG") {
            Some(raw) => raw.parse::<Catalog>().map_err(Error::config)?,
            None => Catalog::default(),
        };

        let mut config = Self::for_catalog(catalog);

        if let Some(name) = lookup("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = lookup("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(strict) = lookup("MCP_STRICT_ARGUMENTS") {
            config.tools.strict_arguments = parse_flag(&strict).ok_or_else(|| {
                Error::config(format!("MCP_STRICT_ARGUMENTS must be a boolean, got '{}'", strict))
            })?;
            info!("Strict argument checking: {}", config.tools.strict_arguments);
        }

        config.transport = TransportConfig::from_lookup(&lookup);

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
