//! Environment variable source.
//!
//! Production code reads the process environment; tests inject a fixed map so they never
//! have to mutate global process state.

use std::collections::HashMap;
use std::sync::Arc;

/// Where environment lookups are served from.
#[derive(Debug, Clone, Default)]
pub enum EnvVars {
    /// Read `std::env` at lookup time
    #[default]
    Process,
    /// Serve lookups from a fixed snapshot
    Fixed(Arc<HashMap<String, String>>),
}

impl EnvVars {
    /// Fixed source with no variables set.
    pub fn empty() -> Self {
        EnvVars::Fixed(Arc::new(HashMap::new()))
    }

    /// Fixed source built from key/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        EnvVars::Fixed(Arc::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Look up a variable. Empty values count as unset.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match self {
            EnvVars::Process => std::env::var(key).ok(),
            EnvVars::Fixed(vars) => vars.get(key).cloned(),
        };
        value.filter(|v| !v.is_empty())
    }

    /// Look up and parse a variable; unparsable values are logged and ignored.
    pub fn parse<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match raw.trim().parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(variable = key, value = %raw, "Ignoring unparsable environment value");
                None
            }
        }
    }
}
