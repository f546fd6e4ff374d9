//! Process-wide settings: gateway listener, datastore, logging and workflow polling.

use super::merge::merge_policy::{
    self, DEFAULT_CORS_ORIGIN, DEFAULT_GATEWAY_HOST, DEFAULT_LOG_FORMAT, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};
use super::sources::global_file;
use super::EnvVars;
use crate::agent::PortTable;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Root of `global.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub api_gateway: GatewaySettings,
    pub database: GlobalDatabase,
    pub logging: GlobalLogging,
    pub workflow: WorkflowSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewaySettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalDatabase {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalLogging {
    /// trace, debug, info, warn, error, off
    pub level: String,
    /// text or json
    pub format: String,
}

/// Polling knobs for the workflow client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowSettings {
    pub max_attempts: u32,
    pub interval_ms: u64,
    pub request_timeout_ms: u64,
}

impl WorkflowSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl GlobalConfig {
    /// Built-in defaults, identical to what an empty config directory resolves to.
    pub fn defaults(env: &EnvVars, ports: &PortTable) -> Self {
        Self {
            api_gateway: GatewaySettings {
                host: DEFAULT_GATEWAY_HOST.to_string(),
                port: ports.gateway(),
                cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            },
            database: GlobalDatabase {
                url: super::defaults::default_main_database_url(env),
            },
            logging: GlobalLogging {
                level: DEFAULT_LOG_LEVEL.to_string(),
                format: DEFAULT_LOG_FORMAT.to_string(),
            },
            workflow: WorkflowSettings {
                max_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
                interval_ms: DEFAULT_POLL_INTERVAL_MS,
                request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            },
        }
    }

    /// Load defaults merged with `<config_dir>/global.yaml`.
    pub fn try_load(config_dir: &Path, env: &EnvVars, ports: &PortTable) -> Result<Self, ConfigError> {
        let builder = merge_policy::builder_with_defaults(env, ports)?;
        let builder = global_file::add_to_builder(builder, config_dir)?;
        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
