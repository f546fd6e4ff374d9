//! Built-in default bundles.
//!
//! Every agent resolves to a complete document even with an empty config directory. Known
//! agents get their own description and tool set; any other name gets a generic bundle on
//! the gateway's baseline port with a title-cased description.

use super::merge::merge_policy::{database_url, DEFAULT_MAIN_DATABASE_URL};
use super::sections::{AgentConfig, ConfigSections};
use super::EnvVars;
use crate::agent::{AgentName, KnownAgent, PortTable};
use serde_json::{json, Map, Value};

/// Port given to agents that are not in the known roster.
pub const GENERIC_AGENT_PORT: u16 = 8000;

/// Default bundle for `agent`.
pub fn default_config(agent: &AgentName, ports: &PortTable, env: &EnvVars) -> AgentConfig {
    let sections = match agent.known() {
        Some(known) => known_bundle(known, ports, env),
        None => generic_bundle(agent, env),
    };
    AgentConfig::new(agent.clone(), sections)
}

fn known_bundle(agent: KnownAgent, ports: &PortTable, env: &EnvVars) -> ConfigSections {
    let tools: Map<String, Value> = agent
        .default_tools()
        .iter()
        .map(|tool| (tool.to_string(), json!({ "enabled": true })))
        .collect();

    bundle(
        agent.name(),
        ports.agent(agent),
        agent.description().to_string(),
        database_url(env, format!("sqlite:///data/{}.db", agent.name())),
        tools,
    )
}

fn generic_bundle(agent: &AgentName, env: &EnvVars) -> ConfigSections {
    bundle(
        agent.as_str(),
        GENERIC_AGENT_PORT,
        format!("{} Agent", title_case(agent.as_str())),
        database_url(env, format!("sqlite:///data/{}.db", agent)),
        Map::new(),
    )
}

fn bundle(
    name: &str,
    port: u16,
    description: String,
    database_url: String,
    tools: Map<String, Value>,
) -> ConfigSections {
    let document = json!({
        "agent": {
            "name": name,
            "port": port,
            "description": description,
        },
        "database": {
            "url": database_url,
        },
        "tools": tools,
        "logging": {
            "level": "INFO",
            "format": "text",
        },
    });
    match document {
        Value::Object(sections) => sections,
        _ => Map::new(),
    }
}

/// Default global database URL, kept next to the agent bundles for reference.
pub fn default_main_database_url(env: &EnvVars) -> String {
    database_url(env, DEFAULT_MAIN_DATABASE_URL)
}

/// Uppercase the first letter of every word and lowercase the rest, where a word starts
/// after any character that is not a letter (`meal_bot2go` → `Meal_Bot2Go`).
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut previous_is_letter = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
