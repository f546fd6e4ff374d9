//! Merge rules for the global document: defaults first, file values on top.

use crate::agent::PortTable;
use crate::config::EnvVars;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

pub const DEFAULT_GATEWAY_HOST: &str = "0.0.0.0";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAIN_DATABASE_URL: &str = "sqlite:///data/main.db";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_FORMAT: &str = "text";
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 10;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// `DATABASE_URL` when set, otherwise the given fallback.
pub fn database_url(env: &EnvVars, fallback: impl Into<String>) -> String {
    env.get("DATABASE_URL").unwrap_or_else(|| fallback.into())
}

/// Create a Config builder with the global defaults applied.
///
/// Environment variables only feed defaults here; anything in `global.yaml` wins over them.
pub fn builder_with_defaults(
    env: &EnvVars,
    ports: &PortTable,
) -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api_gateway.host", DEFAULT_GATEWAY_HOST)?
        .set_default("api_gateway.port", i64::from(ports.gateway()))?
        .set_default("api_gateway.cors_origins", vec![DEFAULT_CORS_ORIGIN.to_string()])?
        .set_default(
            "database.url",
            database_url(env, DEFAULT_MAIN_DATABASE_URL),
        )?
        .set_default("logging.level", DEFAULT_LOG_LEVEL)?
        .set_default("logging.format", DEFAULT_LOG_FORMAT)?
        .set_default(
            "workflow.max_attempts",
            i64::from(DEFAULT_MAX_POLL_ATTEMPTS),
        )?
        .set_default("workflow.interval_ms", DEFAULT_POLL_INTERVAL_MS as i64)?
        .set_default(
            "workflow.request_timeout_ms",
            DEFAULT_REQUEST_TIMEOUT_MS as i64,
        )
}
