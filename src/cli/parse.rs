//! CLI parse: clap types for Lifecoord. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lifecoord CLI - agent configuration and workflow coordination
#[derive(Parser, Debug)]
#[command(name = "lifecoord")]
#[command(about = "Resolve agent configuration and run workflows through the gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding <agent>.yaml overrides and global.yaml
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Gateway base URL (overrides API_GATEWAY_URL and the port table)
    #[arg(long)]
    pub gateway_url: Option<String>,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Agent configuration (show, save, set, global, summary)
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// List known agents with their ports and URLs
    Agents {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Submit and track workflows
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration for an agent
    Show {
        /// Agent name
        agent: String,
        /// Output format (text, json or yaml)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Save a configuration document as the agent's override
    Save {
        /// Agent name
        agent: String,
        /// YAML or JSON document to persist
        #[arg(long)]
        from: PathBuf,
    },
    /// Set one value in the agent's configuration and save it
    Set {
        /// Agent name
        agent: String,
        /// Dotted key, e.g. tools.recipe_engine.enabled
        key: String,
        /// Value, parsed as YAML (so `false`, `8010` and `[a, b]` keep their types)
        value: String,
    },
    /// Show the resolved global configuration
    Global {
        /// Output format (text, json or yaml)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Report which tool credentials are configured
    Summary {
        /// Agents to summarize (default: all known agents)
        agents: Vec<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum WorkflowCommands {
    /// Submit a workflow and wait for its outcome
    Submit {
        /// Workflow type, e.g. meal_planning
        #[arg(long = "type")]
        workflow_type: String,
        /// User identifier
        #[arg(long)]
        user: String,
        /// Free-text query
        #[arg(long)]
        query: Option<String>,
        /// Extra parameters as key=value (value parsed as YAML)
        #[arg(long = "param")]
        params: Vec<String>,
        /// Priority (low, normal, high, urgent)
        #[arg(long, default_value = "normal")]
        priority: String,
        /// Return after submission without polling
        #[arg(long)]
        no_wait: bool,
        /// Override the poll budget
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Override the delay between polls
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Poll a workflow once
    Status {
        workflow_id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Wait for one or more workflows, polling each independently
    Wait {
        #[arg(required = true)]
        workflow_ids: Vec<String>,
        /// Override the poll budget
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Override the delay between polls
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List workflow types and the agents each involves
    Types {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
