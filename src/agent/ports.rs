//! Default network ports for the gateway and the known agents.
//!
//! Deployments disagree on whether luna or milo owns 8003, so both layouts are available and
//! the active one is picked at deploy time. `PortTable` is the only place ports come from.

use super::identity::KnownAgent;
use crate::config::EnvVars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const GATEWAY_DEFAULT_PORT: u16 = 8000;

/// Environment variable selecting the port layout.
pub const PORT_MAPPING_ENV: &str = "AGENT_PORT_MAPPING";
/// Environment variable overriding the gateway port.
pub const GATEWAY_PORT_ENV: &str = "API_GATEWAY_PORT";

/// Which of the two published port layouts is in effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortMapping {
    /// nani 8001, bucky 8002, luna 8003, milo 8004
    #[default]
    Standard,
    /// nani 8001, bucky 8002, milo 8003, luna 8004
    Swapped,
}

impl PortMapping {
    pub fn port(self, agent: KnownAgent) -> u16 {
        match (self, agent) {
            (_, KnownAgent::Nani) => 8001,
            (_, KnownAgent::Bucky) => 8002,
            (PortMapping::Standard, KnownAgent::Luna) => 8003,
            (PortMapping::Standard, KnownAgent::Milo) => 8004,
            (PortMapping::Swapped, KnownAgent::Milo) => 8003,
            (PortMapping::Swapped, KnownAgent::Luna) => 8004,
        }
    }
}

impl FromStr for PortMapping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(PortMapping::Standard),
            "swapped" => Ok(PortMapping::Swapped),
            other => Err(format!(
                "unknown port mapping '{}' (expected 'standard' or 'swapped')",
                other
            )),
        }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortMapping::Standard => f.write_str("standard"),
            PortMapping::Swapped => f.write_str("swapped"),
        }
    }
}

/// Resolved ports: a mapping plus any per-service environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortTable {
    mapping: PortMapping,
    gateway: u16,
    agents: BTreeMap<KnownAgent, u16>,
}

impl PortTable {
    pub fn new(mapping: PortMapping) -> Self {
        Self {
            mapping,
            gateway: GATEWAY_DEFAULT_PORT,
            agents: KnownAgent::ALL
                .into_iter()
                .map(|agent| (agent, mapping.port(agent)))
                .collect(),
        }
    }

    /// Build from `AGENT_PORT_MAPPING`, `API_GATEWAY_PORT` and `<AGENT>_PORT`.
    pub fn from_env(env: &EnvVars) -> Self {
        let mapping = env
            .get(PORT_MAPPING_ENV)
            .and_then(|raw| match raw.parse::<PortMapping>() {
                Ok(mapping) => Some(mapping),
                Err(e) => {
                    tracing::warn!(error = %e, "Falling back to standard port mapping");
                    None
                }
            })
            .unwrap_or_default();

        let mut table = Self::new(mapping);
        if let Some(port) = env.parse::<u16>(GATEWAY_PORT_ENV) {
            table.gateway = port;
        }
        for agent in KnownAgent::ALL {
            let key = format!("{}_PORT", agent.env_prefix());
            if let Some(port) = env.parse::<u16>(&key) {
                table.agents.insert(agent, port);
            }
        }
        table
    }

    pub fn mapping(&self) -> PortMapping {
        self.mapping
    }

    pub fn gateway(&self) -> u16 {
        self.gateway
    }

    pub fn agent(&self, agent: KnownAgent) -> u16 {
        self.agents
            .get(&agent)
            .copied()
            .unwrap_or_else(|| self.mapping.port(agent))
    }
}

impl Default for PortTable {
    fn default() -> Self {
        Self::new(PortMapping::default())
    }
}
