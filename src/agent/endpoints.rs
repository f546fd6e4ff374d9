//! Base URLs for the gateway and each known agent.

use super::identity::KnownAgent;
use super::ports::PortTable;
use crate::config::EnvVars;
use std::collections::BTreeMap;

pub const GATEWAY_URL_ENV: &str = "API_GATEWAY_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    gateway: String,
    agents: BTreeMap<KnownAgent, String>,
}

impl ServiceEndpoints {
    /// Localhost URLs derived from a port table.
    pub fn from_ports(ports: &PortTable) -> Self {
        Self {
            gateway: localhost(ports.gateway()),
            agents: KnownAgent::ALL
                .into_iter()
                .map(|agent| (agent, localhost(ports.agent(agent))))
                .collect(),
        }
    }

    /// Port-derived URLs with `API_GATEWAY_URL` / `<AGENT>_URL` overrides applied.
    pub fn from_env(ports: &PortTable, env: &EnvVars) -> Self {
        let mut endpoints = Self::from_ports(ports);
        if let Some(url) = env.get(GATEWAY_URL_ENV) {
            endpoints.gateway = trim_url(url);
        }
        for agent in KnownAgent::ALL {
            if let Some(url) = env.get(&format!("{}_URL", agent.env_prefix())) {
                endpoints.agents.insert(agent, trim_url(url));
            }
        }
        endpoints
    }

    pub fn gateway(&self) -> &str {
        &self.gateway
    }

    pub fn agent(&self, agent: KnownAgent) -> &str {
        self.agents
            .get(&agent)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Replace the gateway URL (e.g. from a CLI flag).
    pub fn with_gateway(mut self, url: impl Into<String>) -> Self {
        self.gateway = trim_url(url.into());
        self
    }
}

fn localhost(port: u16) -> String {
    format!("http://localhost:{}", port)
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
