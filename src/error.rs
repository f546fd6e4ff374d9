//! Error types for configuration resolution and the workflow client.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid agent name '{0}': expected a non-empty identifier of letters, digits, '_' or '-'")]
    InvalidAgentName(String),

    #[error("Config I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Invalid '{section}' section: {message}")]
    InvalidSection { section: String, message: String },

    #[error("Global config error: {0}")]
    Global(#[from] config::ConfigError),
}

/// Gateway transport and protocol errors
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    Transport(String),

    #[error("Request timeout: {0}")]
    Timeout(String),

    #[error("Gateway returned status {code}: {body}")]
    Status { code: u16, body: String },

    #[error("Failed to decode gateway response: {0}")]
    Decode(String),

    #[error("Gateway response did not include a workflow_id")]
    MissingWorkflowId,

    #[error("Invalid gateway URL {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Facade-level errors surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}
