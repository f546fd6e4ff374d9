//! Agent configuration resolution: built-in default, deep-merged with an optional override.

use super::cache::ConfigCache;
use super::defaults::default_config;
use super::global::GlobalConfig;
use super::merge::merge_maps;
use super::sections::{AgentConfig, ConfigSections};
use super::sources::override_file;
use super::substitute::substitute_value;
use super::EnvVars;
use crate::agent::{AgentName, PortTable};
use crate::error::ConfigError;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default location of override documents, relative to the working directory.
pub const DEFAULT_CONFIG_DIR: &str = "config";

/// Resolves agent and global configuration from a config directory.
///
/// `load` and `load_global` never fail: a missing override means "use the default", and a
/// malformed one is logged and ignored. Resolved agent configs are memoised in the injected
/// [`ConfigCache`]; a successful `save` replaces the cached entry with the saved value.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    config_dir: PathBuf,
    cache: Arc<ConfigCache>,
    ports: PortTable,
    env: EnvVars,
}

impl ConfigResolver {
    /// Resolver over `config_dir` reading the process environment, with a private cache.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        let env = EnvVars::Process;
        Self {
            config_dir: config_dir.into(),
            cache: Arc::new(ConfigCache::new()),
            ports: PortTable::from_env(&env),
            env,
        }
    }

    /// Share a cache with other resolvers.
    pub fn with_cache(mut self, cache: Arc<ConfigCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the environment source; the port table is re-derived from it.
    pub fn with_env(mut self, env: EnvVars) -> Self {
        self.ports = PortTable::from_env(&env);
        self.env = env;
        self
    }

    pub fn with_ports(mut self, ports: PortTable) -> Self {
        self.ports = ports;
        self
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn cache(&self) -> &Arc<ConfigCache> {
        &self.cache
    }

    pub fn ports(&self) -> &PortTable {
        &self.ports
    }

    pub fn env(&self) -> &EnvVars {
        &self.env
    }

    /// The built-in bundle for `agent`, ignoring overrides and the cache.
    pub fn default_for(&self, agent: &AgentName) -> AgentConfig {
        default_config(agent, &self.ports, &self.env)
    }

    /// Resolve the configuration for `agent`.
    pub fn load(&self, agent: &AgentName) -> AgentConfig {
        if let Some(cached) = self.cache.get(agent) {
            debug!(agent = %agent, "Config cache hit");
            return cached;
        }

        let defaults = self.default_for(agent);
        let Some(path) = override_file::find_override(&self.config_dir, agent) else {
            debug!(agent = %agent, config_dir = %self.config_dir.display(), "No override; using defaults");
            return self.cache.insert_if_absent(defaults);
        };

        match override_file::read_override(&path) {
            Ok(overrides) => {
                let overrides = match substitute_value(&Value::Object(overrides), &self.env) {
                    Value::Object(map) => map,
                    _ => ConfigSections::new(),
                };
                let merged = merge_maps(&defaults.sections, &overrides);
                debug!(
                    agent = %agent,
                    config_path = %path.display(),
                    overridden_sections = overrides.len(),
                    "Merged override onto defaults"
                );
                self.cache
                    .insert_if_absent(AgentConfig::new(agent.clone(), merged))
            }
            Err(e) => {
                warn!(
                    agent = %agent,
                    config_path = %path.display(),
                    error = %e,
                    "Ignoring unreadable config override; using defaults"
                );
                defaults
            }
        }
    }

    /// The agent's override document as written, before substitution or merging.
    ///
    /// No document means an empty one. Unlike [`load`](Self::load), a malformed document is an
    /// error here.
    pub fn load_override(&self, agent: &AgentName) -> Result<ConfigSections, ConfigError> {
        match override_file::find_override(&self.config_dir, agent) {
            Some(path) => override_file::read_override(&path),
            None => Ok(ConfigSections::new()),
        }
    }

    /// Drop any cached entry and resolve again from disk.
    pub fn reload(&self, agent: &AgentName) -> AgentConfig {
        self.cache.invalidate(agent);
        self.load(agent)
    }

    /// Persist `sections` verbatim as the agent's override document.
    ///
    /// On success the cache holds exactly `sections` (no re-merge). On failure neither the
    /// cache nor the file on disk changes.
    pub fn save(&self, agent: &AgentName, sections: ConfigSections) -> Result<(), ConfigError> {
        let path = override_file::save_path(&self.config_dir, agent);
        if let Err(e) = override_file::write_override(&path, &sections) {
            warn!(agent = %agent, config_path = %path.display(), error = %e, "Failed to save config");
            return Err(e);
        }

        info!(agent = %agent, config_path = %path.display(), "Saved config override");
        self.cache.put(AgentConfig::new(agent.clone(), sections));
        Ok(())
    }

    /// Resolve process-wide settings from `global.yaml` over the defaults.
    pub fn load_global(&self) -> GlobalConfig {
        match GlobalConfig::try_load(&self.config_dir, &self.env, &self.ports) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    config_dir = %self.config_dir.display(),
                    error = %e,
                    "Ignoring unreadable global config; using defaults"
                );
                GlobalConfig::defaults(&self.env, &self.ports)
            }
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}
