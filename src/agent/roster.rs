//! Roster of known agents as deployed: port, base URL and description.

use super::endpoints::ServiceEndpoints;
use super::identity::KnownAgent;
use super::ports::PortTable;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub name: &'static str,
    pub port: u16,
    pub url: String,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roster {
    pub mapping: String,
    pub gateway_port: u16,
    pub gateway_url: String,
    pub agents: Vec<RosterEntry>,
}

impl Roster {
    pub fn build(ports: &PortTable, endpoints: &ServiceEndpoints) -> Self {
        let mut agents: Vec<RosterEntry> = KnownAgent::ALL
            .into_iter()
            .map(|agent| RosterEntry {
                name: agent.name(),
                port: ports.agent(agent),
                url: endpoints.agent(agent).to_string(),
                description: agent.description(),
            })
            .collect();
        agents.sort_by_key(|entry| entry.port);

        Self {
            mapping: ports.mapping().to_string(),
            gateway_port: ports.gateway(),
            gateway_url: endpoints.gateway().to_string(),
            agents,
        }
    }
}
