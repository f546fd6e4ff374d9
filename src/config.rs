//! Configuration System
//!
//! Resolves per-agent configuration from built-in defaults plus optional override documents in
//! a config directory, and process-wide settings from `global.yaml`. Overrides are deep-merged
//! onto defaults, so every agent always has a complete configuration even with zero setup.

mod cache;
mod defaults;
mod env;
mod global;
pub mod merge;
mod resolver;
mod sections;
pub mod sources;
pub mod substitute;
pub mod summary;

pub use cache::ConfigCache;
pub use defaults::{default_config, title_case, GENERIC_AGENT_PORT};
pub use env::EnvVars;
pub use global::{GatewaySettings, GlobalConfig, GlobalDatabase, GlobalLogging, WorkflowSettings};
pub use merge::{deep_merge, merge_maps};
pub use resolver::{ConfigResolver, DEFAULT_CONFIG_DIR};
pub use sections::{
    AgentConfig, AgentSection, ConfigSections, DatabaseSection, LoggingSection, ToolSettings,
    ToolsSection, TypedAgentConfig,
};
pub use summary::{summarize, ConfigSummary, ToolCredentialSummary};
