//! Agent configuration documents and their typed section shapes.
//!
//! The merged document stays an open mapping so agent-specific extension sections survive a
//! round trip; `typed()` projects the well-known sections onto structs.

use crate::agent::AgentName;
use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub const AGENT_SECTION: &str = "agent";
pub const DATABASE_SECTION: &str = "database";
pub const TOOLS_SECTION: &str = "tools";
pub const LOGGING_SECTION: &str = "logging";

/// Top-level section name → section body.
pub type ConfigSections = Map<String, Value>;

/// A resolved configuration for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub agent_name: AgentName,
    pub sections: ConfigSections,
}

impl AgentConfig {
    pub fn new(agent_name: AgentName, sections: ConfigSections) -> Self {
        Self {
            agent_name,
            sections,
        }
    }

    pub fn section(&self, name: &str) -> Option<&Value> {
        self.sections.get(name)
    }

    /// Look up a dotted path such as `agent.port` or `tools.deal_finder.enabled`.
    pub fn get_path(&self, dotted: &str) -> Option<&Value> {
        let mut parts = dotted.split('.');
        let first = parts.next()?;
        let mut current = self.sections.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Set a dotted path, creating intermediate mappings and replacing non-mapping values
    /// that stand in the way.
    pub fn set_path(&mut self, dotted: &str, value: Value) -> Result<(), ConfigError> {
        let parts: Vec<&str> = dotted.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(ConfigError::InvalidSection {
                section: dotted.to_string(),
                message: "dotted key must not contain empty segments".to_string(),
            });
        }

        let Some((last, parents)) = parts.split_last() else {
            return Ok(());
        };
        let mut current = &mut self.sections;
        for part in parents {
            let entry = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            current = match entry {
                Value::Object(map) => map,
                _ => unreachable!("entry was just made a mapping"),
            };
        }
        current.insert(last.to_string(), value);
        Ok(())
    }

    /// Project onto the typed shape.
    pub fn typed(&self) -> Result<TypedAgentConfig, ConfigError> {
        let mut extensions = BTreeMap::new();
        for (name, body) in &self.sections {
            if ![AGENT_SECTION, DATABASE_SECTION, TOOLS_SECTION, LOGGING_SECTION]
                .contains(&name.as_str())
            {
                extensions.insert(name.clone(), body.clone());
            }
        }

        Ok(TypedAgentConfig {
            agent: self.required_section(AGENT_SECTION)?,
            database: self.required_section(DATABASE_SECTION)?,
            tools: self.optional_section(TOOLS_SECTION)?.unwrap_or_default(),
            logging: self.optional_section(LOGGING_SECTION)?.unwrap_or_default(),
            extensions,
        })
    }

    fn required_section<T: DeserializeOwned>(&self, name: &str) -> Result<T, ConfigError> {
        self.optional_section(name)?
            .ok_or_else(|| ConfigError::InvalidSection {
                section: name.to_string(),
                message: "section is missing".to_string(),
            })
    }

    fn optional_section<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ConfigError> {
        match self.sections.get(name) {
            None => Ok(None),
            Some(body) => serde_json::from_value(body.clone())
                .map(Some)
                .map_err(|e| ConfigError::InvalidSection {
                    section: name.to_string(),
                    message: e.to_string(),
                }),
        }
    }
}

/// The well-known sections as structs, plus anything agent-specific.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedAgentConfig {
    pub agent: AgentSection,
    pub database: DatabaseSection,
    pub tools: ToolsSection,
    pub logging: LoggingSection,
    /// Top-level sections with no known shape
    pub extensions: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSection {
    pub name: String,
    pub port: u16,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSection {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Tool name → tool settings.
pub type ToolsSection = BTreeMap<String, ToolSettings>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_level() -> String {
    "INFO".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
            extra: Map::new(),
        }
    }
}
