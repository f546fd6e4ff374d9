//! Agent roster presentation: text table and json.

use super::shared::{section_title, to_json, OutputFormat};
use crate::agent::Roster;
use crate::error::ApiError;
use comfy_table::Table;

pub fn format_roster(roster: &Roster, format: OutputFormat) -> Result<String, ApiError> {
    if format == OutputFormat::Json {
        return to_json(roster);
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Agent", "Port", "URL", "Description"]);
    table.add_row(vec![
        "gateway".to_string(),
        roster.gateway_port.to_string(),
        roster.gateway_url.clone(),
        "API Gateway".to_string(),
    ]);
    for entry in &roster.agents {
        table.add_row(vec![
            entry.name.to_string(),
            entry.port.to_string(),
            entry.url.clone(),
            entry.description.to_string(),
        ]);
    }

    Ok(format!(
        "{}\n{}\n\nPort mapping: {}",
        section_title("Agents"),
        table,
        roster.mapping
    ))
}
