//! CLI presentation: text and json formatters per command family.

mod agent;
mod config;
mod shared;
mod workflow;

pub use agent::format_roster;
pub use config::{format_agent_config, format_config_summaries, format_global_config};
pub use shared::OutputFormat;
pub use workflow::{
    format_outcome_text, format_outcomes, format_routes, format_status, format_submitted,
};
