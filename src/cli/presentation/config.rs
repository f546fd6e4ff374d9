//! Config command presentation: resolved agent config, global config, credential summary.

use super::shared::{section_title, to_json, to_yaml, OutputFormat};
use crate::config::{AgentConfig, ConfigSummary, GlobalConfig};
use crate::error::ApiError;
use comfy_table::Table;
use owo_colors::OwoColorize;

pub fn format_agent_config(config: &AgentConfig, format: OutputFormat) -> Result<String, ApiError> {
    match format {
        OutputFormat::Json => to_json(&config.sections),
        OutputFormat::Yaml => to_yaml(&config.sections),
        OutputFormat::Text => Ok(format!(
            "{}\n\n{}",
            section_title(&format!("Agent config: {}", config.agent_name)),
            to_yaml(&config.sections)?
        )),
    }
}

pub fn format_global_config(config: &GlobalConfig, format: OutputFormat) -> Result<String, ApiError> {
    match format {
        OutputFormat::Json => to_json(config),
        OutputFormat::Yaml => to_yaml(config),
        OutputFormat::Text => {
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["api_gateway.host".to_string(), config.api_gateway.host.clone()]);
            table.add_row(vec!["api_gateway.port".to_string(), config.api_gateway.port.to_string()]);
            table.add_row(vec![
                "api_gateway.cors_origins".to_string(),
                config.api_gateway.cors_origins.join(", "),
            ]);
            table.add_row(vec!["database.url".to_string(), config.database.url.clone()]);
            table.add_row(vec!["logging.level".to_string(), config.logging.level.clone()]);
            table.add_row(vec!["logging.format".to_string(), config.logging.format.clone()]);
            table.add_row(vec![
                "workflow.max_attempts".to_string(),
                config.workflow.max_attempts.to_string(),
            ]);
            table.add_row(vec![
                "workflow.interval_ms".to_string(),
                config.workflow.interval_ms.to_string(),
            ]);
            table.add_row(vec![
                "workflow.request_timeout_ms".to_string(),
                config.workflow.request_timeout_ms.to_string(),
            ]);
            Ok(format!("{}\n{}", section_title("Global config"), table))
        }
    }
}

pub fn format_config_summaries(
    summaries: &[ConfigSummary],
    format: OutputFormat,
) -> Result<String, ApiError> {
    if format == OutputFormat::Json {
        return to_json(summaries);
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Agent", "Tool", "Credentials", "Missing"]);
    for summary in summaries {
        if summary.tools.is_empty() {
            table.add_row(vec![summary.agent_name.clone(), "-".to_string(), "-".to_string(), "-".to_string()]);
        }
        for (tool, creds) in &summary.tools {
            let missing = if creds.missing_keys.is_empty() {
                "-".to_string()
            } else {
                creds.missing_keys.join(", ")
            };
            table.add_row(vec![
                summary.agent_name.clone(),
                tool.clone(),
                format!("{}/{}", creds.configured_keys, creds.total_keys),
                missing,
            ]);
        }
    }

    let mut output = format!("{}\n{}\n", section_title("Credential summary"), table);
    for summary in summaries {
        let status = if summary.fully_configured() {
            format!("{}", "fully configured".green())
        } else {
            format!("{}", format!("{} missing", summary.missing_count).yellow())
        };
        output.push_str(&format!(
            "\n  {:<10} {}/{} configured, {}",
            summary.agent_name, summary.configured_count, summary.total_configs, status
        ));
    }
    Ok(output)
}
