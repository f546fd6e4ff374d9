//! CLI command-name contract, used to tag log spans.

use crate::cli::parse::{Commands, ConfigCommands, WorkflowCommands};

/// Command name string (e.g. "config.show", "workflow.submit").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Config { command } => format!("config.{}", config_command_name(command)),
        Commands::Agents { .. } => "agents".to_string(),
        Commands::Workflow { command } => format!("workflow.{}", workflow_command_name(command)),
    }
}

pub fn config_command_name(command: &ConfigCommands) -> &'static str {
    match command {
        ConfigCommands::Show { .. } => "show",
        ConfigCommands::Save { .. } => "save",
        ConfigCommands::Set { .. } => "set",
        ConfigCommands::Global { .. } => "global",
        ConfigCommands::Summary { .. } => "summary",
    }
}

pub fn workflow_command_name(command: &WorkflowCommands) -> &'static str {
    match command {
        WorkflowCommands::Submit { .. } => "submit",
        WorkflowCommands::Status { .. } => "status",
        WorkflowCommands::Wait { .. } => "wait",
        WorkflowCommands::Types { .. } => "types",
    }
}
