//! Agent identity: validated names and the roster of known agents.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated agent identifier.
///
/// Names are non-empty and restricted to ASCII letters, digits, `_` and `-`, which also keeps
/// them safe to use as override file stems.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AgentName(String);

impl AgentName {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if valid {
            Ok(Self(name))
        } else {
            Err(ConfigError::InvalidAgentName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The known agent this name refers to, if any.
    pub fn known(&self) -> Option<KnownAgent> {
        KnownAgent::from_name(&self.0)
    }
}

impl fmt::Display for AgentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AgentName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AgentName {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AgentName> for String {
    fn from(name: AgentName) -> Self {
        name.0
    }
}

impl From<KnownAgent> for AgentName {
    fn from(agent: KnownAgent) -> Self {
        Self(agent.name().to_string())
    }
}

/// The four agents shipped with the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownAgent {
    /// Scheduling and calendar management
    Nani,
    /// Shopping and inventory management
    Bucky,
    /// Health and fitness tracking
    Luna,
    /// Meal planning and nutrition
    Milo,
}

impl KnownAgent {
    pub const ALL: [KnownAgent; 4] = [
        KnownAgent::Nani,
        KnownAgent::Bucky,
        KnownAgent::Luna,
        KnownAgent::Milo,
    ];

    pub fn name(self) -> &'static str {
        match self {
            KnownAgent::Nani => "nani",
            KnownAgent::Bucky => "bucky",
            KnownAgent::Luna => "luna",
            KnownAgent::Milo => "milo",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|agent| agent.name() == name)
    }

    pub fn description(self) -> &'static str {
        match self {
            KnownAgent::Nani => "Scheduling & Calendar Management Agent",
            KnownAgent::Bucky => "Shopping & Inventory Management Agent",
            KnownAgent::Luna => "Health & Fitness Tracking Agent",
            KnownAgent::Milo => "Meal Planning & Nutrition Agent",
        }
    }

    /// Tools enabled in the built-in default bundle.
    pub fn default_tools(self) -> &'static [&'static str] {
        match self {
            KnownAgent::Nani => &[
                "calendar_manager",
                "scheduling_optimizer",
                "timezone_handler",
                "focus_blocker",
            ],
            KnownAgent::Bucky => &[
                "pantry_tracker",
                "price_comparator",
                "shopping_optimizer",
                "deal_finder",
            ],
            KnownAgent::Luna => &[
                "fitness_tracker",
                "health_analyzer",
                "workout_planner",
                "recovery_monitor",
            ],
            KnownAgent::Milo => &["recipe_engine", "nutrition_analyzer", "meal_planner"],
        }
    }

    /// Prefix for per-agent environment variables (`NANI_PORT`, `NANI_URL`, ...).
    pub fn env_prefix(self) -> String {
        self.name().to_ascii_uppercase()
    }
}

impl fmt::Display for KnownAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
