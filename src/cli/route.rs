//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::agent::{AgentName, KnownAgent, Roster, ServiceEndpoints};
use crate::cli::command_name;
use crate::cli::parse::{Commands, ConfigCommands, WorkflowCommands};
use crate::cli::presentation::{
    format_agent_config, format_config_summaries, format_global_config, format_outcomes,
    format_roster, format_routes, format_status, format_submitted, OutputFormat,
};
use crate::config::sources::override_file;
use crate::config::{summarize, AgentConfig, ConfigResolver, GlobalConfig};
use crate::error::ApiError;
use crate::workflow::{
    known_workflow_types, agents_for, Priority, RetryPolicy, WorkflowClient, WorkflowHandle,
    WorkflowRequest,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, info_span};

/// Runtime context for CLI execution: resolver, resolved global settings and endpoints.
pub struct RunContext {
    resolver: ConfigResolver,
    global: GlobalConfig,
    endpoints: ServiceEndpoints,
}

impl RunContext {
    /// Build from the config directory and an optional gateway URL override.
    pub fn new(config_dir: PathBuf, gateway_url: Option<String>) -> Result<Self, ApiError> {
        let resolver = ConfigResolver::new(config_dir);
        let global = resolver.load_global();
        let mut endpoints = ServiceEndpoints::from_env(resolver.ports(), resolver.env());
        if let Some(url) = gateway_url {
            endpoints = endpoints.with_gateway(url);
        }
        debug!(
            config_dir = %resolver.config_dir().display(),
            gateway = %endpoints.gateway(),
            "Run context ready"
        );
        Ok(Self {
            resolver,
            global,
            endpoints,
        })
    }

    /// Build around an existing resolver (tests inject isolated environments this way).
    pub fn with_resolver(resolver: ConfigResolver, endpoints: ServiceEndpoints) -> Self {
        let global = resolver.load_global();
        Self {
            resolver,
            global,
            endpoints,
        }
    }

    pub fn resolver(&self) -> &ConfigResolver {
        &self.resolver
    }

    pub fn global(&self) -> &GlobalConfig {
        &self.global
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let name = command_name(command);
        let span = info_span!("command", name = %name);
        let _guard = span.enter();

        let started = Instant::now();
        let result = match command {
            Commands::Config { command } => self.handle_config_command(command),
            Commands::Agents { format } => self.handle_agents(format),
            Commands::Workflow { command } => self.handle_workflow_command(command),
        };
        info!(
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_config_command(&self, command: &ConfigCommands) -> Result<String, ApiError> {
        match command {
            ConfigCommands::Show { agent, format } => {
                let format = OutputFormat::parse(format, true)?;
                let config = self.resolver.load(&AgentName::new(agent.as_str())?);
                format_agent_config(&config, format)
            }
            ConfigCommands::Save { agent, from } => self.handle_config_save(agent, from),
            ConfigCommands::Set { agent, key, value } => self.handle_config_set(agent, key, value),
            ConfigCommands::Global { format } => {
                format_global_config(&self.global, OutputFormat::parse(format, true)?)
            }
            ConfigCommands::Summary { agents, format } => {
                let format = OutputFormat::parse(format, false)?;
                let names: Vec<AgentName> = if agents.is_empty() {
                    KnownAgent::ALL.into_iter().map(AgentName::from).collect()
                } else {
                    agents
                        .iter()
                        .map(|a| AgentName::new(a.as_str()))
                        .collect::<Result<_, _>>()?
                };
                let summaries: Vec<_> = names
                    .iter()
                    .map(|name| summarize(&self.resolver.load(name)))
                    .collect();
                format_config_summaries(&summaries, format)
            }
        }
    }

    fn handle_config_save(&self, agent: &str, from: &Path) -> Result<String, ApiError> {
        let agent = AgentName::new(agent)?;
        let sections = override_file::read_override(from)?;
        self.resolver.save(&agent, sections)?;
        Ok(format!(
            "Saved config for {} to {}",
            agent,
            override_file::save_path(self.resolver.config_dir(), &agent).display()
        ))
    }

    fn handle_config_set(&self, agent: &str, key: &str, raw: &str) -> Result<String, ApiError> {
        let agent = AgentName::new(agent)?;
        let value = parse_cli_value(raw);
        let mut document = AgentConfig::new(agent.clone(), self.resolver.load_override(&agent)?);
        document.set_path(key, value.clone())?;
        self.resolver.save(&agent, document.sections)?;
        self.resolver.reload(&agent);
        Ok(format!("Set {}.{} = {}", agent, key, value))
    }

    fn handle_agents(&self, format: &str) -> Result<String, ApiError> {
        let roster = Roster::build(self.resolver.ports(), &self.endpoints);
        format_roster(&roster, OutputFormat::parse(format, false)?)
    }

    fn handle_workflow_command(&self, command: &WorkflowCommands) -> Result<String, ApiError> {
        match command {
            WorkflowCommands::Submit {
                workflow_type,
                user,
                query,
                params,
                priority,
                no_wait,
                max_attempts,
                interval_ms,
                format,
            } => {
                let format = OutputFormat::parse(format, false)?;
                let priority: Priority = priority.parse().map_err(ApiError::InvalidArgument)?;
                let mut request =
                    WorkflowRequest::new(workflow_type.as_str(), user.as_str()).with_priority(priority);
                if let Some(query) = query {
                    request = request.with_query(query.as_str());
                }
                for param in params {
                    let (key, value) = parse_param(param)?;
                    request = request.with_parameter(key, value);
                }

                let client = self.workflow_client(*max_attempts, *interval_ms)?;
                let runtime = new_runtime()?;
                if *no_wait {
                    let handle = runtime.block_on(client.submit(&request))?;
                    format_submitted(&handle, format)
                } else {
                    let outcome = runtime.block_on(client.run(&request));
                    format_outcomes(&[outcome], format)
                }
            }
            WorkflowCommands::Status {
                workflow_id,
                format,
            } => {
                let format = OutputFormat::parse(format, false)?;
                let client = self.workflow_client(None, None)?;
                let mut handle = WorkflowHandle::new(workflow_id.as_str(), "");
                new_runtime()?.block_on(client.poll(&mut handle))?;
                format_status(&handle, format)
            }
            WorkflowCommands::Wait {
                workflow_ids,
                max_attempts,
                interval_ms,
                format,
            } => {
                let format = OutputFormat::parse(format, false)?;
                let client = self.workflow_client(*max_attempts, *interval_ms)?;
                let mut handles: Vec<WorkflowHandle> = workflow_ids
                    .iter()
                    .map(|id| WorkflowHandle::new(id.as_str(), ""))
                    .collect();
                let outcomes = new_runtime()?.block_on(client.wait_all(&mut handles));
                format_outcomes(&outcomes, format)
            }
            WorkflowCommands::Types { format } => format_routes(
                known_workflow_types().map(|name| (name, agents_for(name))),
                OutputFormat::parse(format, false)?,
            ),
        }
    }

    fn workflow_client(
        &self,
        max_attempts: Option<u32>,
        interval_ms: Option<u64>,
    ) -> Result<WorkflowClient, ApiError> {
        let client = WorkflowClient::from_config(&self.global, &self.endpoints)?;
        let base = *client.policy();
        let policy = RetryPolicy::fixed(
            max_attempts.unwrap_or(base.max_attempts),
            interval_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| self.global.workflow.interval()),
        );
        Ok(client.with_policy(policy))
    }
}

fn new_runtime() -> Result<tokio::runtime::Runtime, ApiError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| ApiError::Runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Parse a CLI value as YAML so numbers, booleans and lists keep their type; fall back to a string.
fn parse_cli_value(raw: &str) -> Value {
    match serde_yaml::from_str::<Value>(raw) {
        Ok(Value::Null) if !raw.trim().is_empty() && raw.trim() != "null" && raw.trim() != "~" => {
            Value::String(raw.to_string())
        }
        Ok(value) => value,
        Err(_) => Value::String(raw.to_string()),
    }
}

fn parse_param(param: &str) -> Result<(String, Value), ApiError> {
    match param.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), parse_cli_value(value)))
        }
        _ => Err(ApiError::InvalidArgument(format!(
            "Invalid parameter '{}': expected key=value",
            param
        ))),
    }
}
