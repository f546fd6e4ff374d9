//! Per-agent override documents: <config_dir>/<agent>.yaml (also .yml / .json).
//!
//! Writes go through a temporary sibling file that is fsynced and then renamed over the
//! target, so readers only ever see the previous document or the complete new one.

use crate::agent::AgentName;
use crate::error::ConfigError;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

const OVERRIDE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Path `save` writes to.
pub fn save_path(config_dir: &Path, agent: &AgentName) -> PathBuf {
    config_dir.join(format!("{}.yaml", agent))
}

/// First existing override document for the agent, in extension precedence order.
pub fn find_override(config_dir: &Path, agent: &AgentName) -> Option<PathBuf> {
    OVERRIDE_EXTENSIONS
        .iter()
        .map(|ext| config_dir.join(format!("{}.{}", agent, ext)))
        .find(|path| path.is_file())
}

/// Read and parse an override document.
///
/// An empty document means "no overrides". Anything other than a mapping at the top level
/// is a parse error. The YAML parser accepts JSON documents as well.
pub fn read_override(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(path, &content)
}

pub(crate) fn parse_document(path: &Path, content: &str) -> Result<Map<String, Value>, ConfigError> {
    if content.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(ConfigError::Parse {
            path: path.to_path_buf(),
            message: format!(
                "top-level document must be a mapping, found {}",
                value_kind(&other)
            ),
        }),
    }
}

/// Serialize and atomically write an override document, creating the directory if needed.
pub fn write_override(path: &Path, sections: &Map<String, Value>) -> Result<(), ConfigError> {
    let yaml = serde_yaml::to_string(sections).map_err(|e| ConfigError::Serialize(e.to_string()))?;
    atomic_write(path, yaml.as_bytes())
}

fn atomic_write(path: &Path, content: &[u8]) -> Result<(), ConfigError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| ConfigError::Io { path, source }
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
    }

    let temp_path = temp_path_for(path)?;
    if let Err(e) = write_and_sync(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_err(&temp_path)(e));
    }
    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(io_err(path)(e));
    }
    Ok(())
}

fn temp_path_for(target: &Path) -> Result<PathBuf, ConfigError> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| ConfigError::Io {
            path: target.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "invalid file path"),
        })?;
    let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    Ok(parent.join(format!(".{}.{}.{}.tmp", filename, std::process::id(), seq)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
