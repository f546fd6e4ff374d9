//! Credential summary for an agent's tool settings.
//!
//! Reports which credential-looking keys (`*api_key*`, `*client_id*`, `*secret*`) hold real
//! values and which are still empty or placeholders.

use super::sections::{AgentConfig, TOOLS_SECTION};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

const CREDENTIAL_MARKERS: [&str; 3] = ["api_key", "client_id", "secret"];
const PLACEHOLDER_MARKERS: [&str; 4] = ["YOUR_", "MISSING_", "your_", "DEMO_KEY"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ToolCredentialSummary {
    pub total_keys: usize,
    pub configured_keys: usize,
    pub missing_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub agent_name: String,
    pub tools: BTreeMap<String, ToolCredentialSummary>,
    pub total_configs: usize,
    pub configured_count: usize,
    pub missing_count: usize,
}

impl ConfigSummary {
    pub fn fully_configured(&self) -> bool {
        self.missing_count == 0
    }
}

pub fn is_credential_key(key: &str) -> bool {
    let lowered = key.to_ascii_lowercase();
    CREDENTIAL_MARKERS.iter().any(|m| lowered.contains(m))
}

pub fn is_placeholder(value: &str) -> bool {
    value.trim().is_empty() || PLACEHOLDER_MARKERS.iter().any(|m| value.contains(m))
}

pub fn summarize(config: &AgentConfig) -> ConfigSummary {
    let mut summary = ConfigSummary {
        agent_name: config.agent_name.to_string(),
        tools: BTreeMap::new(),
        total_configs: 0,
        configured_count: 0,
        missing_count: 0,
    };

    let Some(Value::Object(tools)) = config.section(TOOLS_SECTION) else {
        return summary;
    };

    for (tool_name, tool_settings) in tools {
        let Value::Object(settings) = tool_settings else {
            continue;
        };

        let mut tool = ToolCredentialSummary::default();
        for (key, value) in settings {
            let Value::String(value) = value else {
                continue;
            };
            if !is_credential_key(key) {
                continue;
            }
            tool.total_keys += 1;
            if is_placeholder(value) {
                tool.missing_keys.push(key.clone());
            } else {
                tool.configured_keys += 1;
            }
        }

        summary.total_configs += tool.total_keys;
        summary.configured_count += tool.configured_keys;
        summary.missing_count += tool.missing_keys.len();
        summary.tools.insert(tool_name.clone(), tool);
    }

    summary
}
