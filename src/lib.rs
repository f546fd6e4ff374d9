//! Lifecoord: Agent Configuration and Workflow Coordination
//!
//! Client-side core of a multi-agent personal assistant. Resolves per-agent configuration from
//! built-in defaults plus optional overrides, and submits workflows to the gateway, polling
//! each one until it reaches a terminal outcome.

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod workflow;
