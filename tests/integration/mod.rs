//! Integration tests for agent configuration and the workflow client

mod cli_binary;
mod config_resolver;
mod global_config;
mod workflow_client;
