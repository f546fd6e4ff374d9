//! Shared cache of resolved agent configurations.
//!
//! Injected into `ConfigResolver` so independent resolvers (tests, parallel callers) never
//! see each other's entries unless they are handed the same cache.

use super::sections::AgentConfig;
use crate::agent::AgentName;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct ConfigCache {
    entries: RwLock<HashMap<AgentName, AgentConfig>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, agent: &AgentName) -> Option<AgentConfig> {
        self.entries.read().get(agent).cloned()
    }

    /// Insert only if no entry exists yet; returns the entry that ended up cached.
    ///
    /// Racing first loads compute the same merged value, so whichever lands first wins.
    pub fn insert_if_absent(&self, config: AgentConfig) -> AgentConfig {
        let mut entries = self.entries.write();
        entries
            .entry(config.agent_name.clone())
            .or_insert(config)
            .clone()
    }

    /// Insert or replace.
    pub fn put(&self, config: AgentConfig) {
        self.entries
            .write()
            .insert(config.agent_name.clone(), config);
    }

    pub fn invalidate(&self, agent: &AgentName) -> bool {
        self.entries.write().remove(agent).is_some()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
