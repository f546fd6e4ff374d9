//! Workflow presentation: outcomes, single-poll status and the routing table.

use super::shared::{section_title, to_json, OutputFormat};
use crate::agent::KnownAgent;
use crate::error::ApiError;
use crate::workflow::{WorkflowHandle, WorkflowOutcome};
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn colored_tag(outcome: &WorkflowOutcome) -> String {
    let tag = outcome.status_tag();
    match outcome {
        WorkflowOutcome::Completed { .. } => format!("{}", tag.green()),
        WorkflowOutcome::TimedOut { .. } => format!("{}", tag.yellow()),
        _ => format!("{}", tag.red()),
    }
}

pub fn format_outcome_text(outcome: &WorkflowOutcome) -> String {
    let mut output = match outcome.workflow_id() {
        Some(id) => format!("Workflow {}: {}\n", id, colored_tag(outcome)),
        None => format!("Workflow {}\n", colored_tag(outcome)),
    };
    if let WorkflowOutcome::Completed {
        primary_agent: Some(agent),
        ..
    } = outcome
    {
        output.push_str(&format!("Answered by: {}\n", agent));
    }
    match outcome {
        WorkflowOutcome::PollError { error, .. } | WorkflowOutcome::SubmissionFailed { error } => {
            output.push_str(&format!("Detail: {}\n", error));
        }
        _ => {}
    }
    if outcome.workflow_id().is_some() {
        output.push_str(&format!("Polls: {}\n", outcome.attempts()));
    }
    output.push('\n');
    output.push_str(&outcome.user_message());
    output
}

pub fn format_outcomes(outcomes: &[WorkflowOutcome], format: OutputFormat) -> Result<String, ApiError> {
    match (format, outcomes) {
        (OutputFormat::Json, [single]) => to_json(single),
        (OutputFormat::Json, many) => to_json(many),
        (_, many) => Ok(many
            .iter()
            .map(format_outcome_text)
            .collect::<Vec<_>>()
            .join("\n\n")),
    }
}

pub fn format_submitted(handle: &WorkflowHandle, format: OutputFormat) -> Result<String, ApiError> {
    if format == OutputFormat::Json {
        return to_json(handle);
    }
    Ok(format!(
        "Submitted workflow {} ({})\nAgents: {}\n\nTrack it with: lifecoord workflow wait {}",
        handle.workflow_id,
        handle.workflow_type,
        handle.agents_involved.join(", "),
        handle.workflow_id
    ))
}

pub fn format_status(handle: &WorkflowHandle, format: OutputFormat) -> Result<String, ApiError> {
    if format == OutputFormat::Json {
        return to_json(handle);
    }
    let status = serde_json::to_value(handle.status)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();
    let mut output = format!("Workflow {}: {}\n", handle.workflow_id, status);
    if let Some(agent) = &handle.primary_agent {
        output.push_str(&format!("Primary agent: {}\n", agent));
    }
    if let Some(error) = &handle.error {
        output.push_str(&format!("Error: {}\n", error));
    }
    if let Some(result) = &handle.result {
        match result {
            serde_json::Value::String(text) => output.push_str(&format!("\n{}\n", text)),
            other => output.push_str(&format!("\n{}\n", other)),
        }
    }
    Ok(output.trim_end().to_string())
}

pub fn format_routes<'a>(
    routes: impl IntoIterator<Item = (&'a str, Vec<KnownAgent>)>,
    format: OutputFormat,
) -> Result<String, ApiError> {
    let routes: Vec<(&str, Vec<KnownAgent>)> = routes.into_iter().collect();
    if format == OutputFormat::Json {
        let out: Vec<_> = routes
            .iter()
            .map(|(name, agents)| json!({ "type": name, "agents": agents }))
            .collect();
        return to_json(&out);
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.set_header(vec!["Workflow type", "Agents"]);
    for (name, agents) in &routes {
        let agents: Vec<&str> = agents.iter().map(|a| a.name()).collect();
        table.add_row(vec![name.to_string(), agents.join(", ")]);
    }
    Ok(format!(
        "{}\n{}\n\nOther types are routed to nani.",
        section_title("Workflow types"),
        table
    ))
}
