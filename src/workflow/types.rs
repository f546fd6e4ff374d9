//! Workflow requests, gateway payloads and the caller-side handle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

/// Body of `POST /workflow`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRequest {
    #[serde(rename = "type", alias = "workflow_type")]
    pub workflow_type: String,
    pub user_id: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
    #[serde(default)]
    pub priority: Priority,
    pub submitted_at: DateTime<Utc>,
}

impl WorkflowRequest {
    pub fn new(workflow_type: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            workflow_type: workflow_type.into(),
            user_id: user_id.into(),
            parameters: Map::new(),
            priority: Priority::default(),
            submitted_at: Utc::now(),
        }
    }

    /// Free-text query, carried as the `query` parameter.
    pub fn with_query(self, query: impl Into<String>) -> Self {
        self.with_parameter("query", Value::String(query.into()))
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

/// Response of `POST /workflow`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub agents_involved: Option<Vec<String>>,
    #[serde(default)]
    pub estimated_duration: Option<u64>,
}

/// Response of `GET /workflows/{id}`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub primary_agent: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn remote_status(&self) -> RemoteStatus {
        RemoteStatus::parse(&self.status)
    }
}

/// Status string reported by the gateway, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Other(String),
}

impl RemoteStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "queued" => RemoteStatus::Pending,
            "running" | "started" | "in_progress" => RemoteStatus::Running,
            "completed" | "complete" | "succeeded" => RemoteStatus::Completed,
            "failed" | "error" => RemoteStatus::Failed,
            _ => RemoteStatus::Other(raw.to_string()),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteStatus::Completed | RemoteStatus::Failed)
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteStatus::Pending => f.write_str("pending"),
            RemoteStatus::Running => f.write_str("running"),
            RemoteStatus::Completed => f.write_str("completed"),
            RemoteStatus::Failed => f.write_str("failed"),
            RemoteStatus::Other(raw) => write!(f, "{}", raw),
        }
    }
}

/// Caller-side view of a workflow's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Unknown,
    TimedOut,
}

impl WorkflowStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            WorkflowStatus::Completed | WorkflowStatus::Failed | WorkflowStatus::TimedOut
        )
    }
}

impl From<&RemoteStatus> for WorkflowStatus {
    fn from(status: &RemoteStatus) -> Self {
        match status {
            RemoteStatus::Pending => WorkflowStatus::Pending,
            RemoteStatus::Running => WorkflowStatus::Running,
            RemoteStatus::Completed => WorkflowStatus::Completed,
            RemoteStatus::Failed => WorkflowStatus::Failed,
            RemoteStatus::Other(_) => WorkflowStatus::Unknown,
        }
    }
}

/// A submitted workflow, updated as poll responses arrive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowHandle {
    pub workflow_id: String,
    pub workflow_type: String,
    pub status: WorkflowStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub agents_involved: Vec<String>,
    /// Poll responses applied so far
    pub polls: u32,
}

impl WorkflowHandle {
    pub fn new(workflow_id: impl Into<String>, workflow_type: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            workflow_type: workflow_type.into(),
            status: WorkflowStatus::Pending,
            result: None,
            primary_agent: None,
            error: None,
            agents_involved: Vec::new(),
            polls: 0,
        }
    }

    /// Apply one poll response. `result` is only retained on completion.
    pub fn apply(&mut self, response: &StatusResponse) {
        self.polls += 1;
        self.status = WorkflowStatus::from(&response.remote_status());
        self.result = match self.status {
            WorkflowStatus::Completed => response.result.clone(),
            _ => None,
        };
        if response.primary_agent.is_some() {
            self.primary_agent = response.primary_agent.clone();
        }
        self.error = response.error.clone();
    }
}
