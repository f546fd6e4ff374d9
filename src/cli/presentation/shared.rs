//! Helpers shared by presentation modules.

use crate::error::ApiError;
use owo_colors::OwoColorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse a `--format` value; `yaml` only where `allow_yaml` is set.
    pub fn parse(value: &str, allow_yaml: bool) -> Result<Self, ApiError> {
        match value {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" if allow_yaml => Ok(OutputFormat::Yaml),
            _ => Err(ApiError::InvalidArgument(format!(
                "Invalid format: {}. Must be {}",
                value,
                if allow_yaml {
                    "'text', 'json' or 'yaml'"
                } else {
                    "'text' or 'json'"
                }
            ))),
        }
    }
}

pub fn section_title(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidArgument(format!("Failed to render JSON: {}", e)))
}

pub fn to_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .map_err(|e| ApiError::InvalidArgument(format!("Failed to render YAML: {}", e)))
}
