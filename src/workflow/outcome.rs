//! Terminal outcome of a submitted workflow, one variant per way it can end.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WorkflowOutcome {
    /// The gateway reported success
    Completed {
        workflow_id: String,
        #[serde(default)]
        result: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        primary_agent: Option<String>,
        attempts: u32,
    },
    /// The gateway reported failure
    Failed {
        workflow_id: String,
        reason: String,
        attempts: u32,
    },
    /// Budget spent while the workflow was still in flight
    TimedOut { workflow_id: String, attempts: u32 },
    /// A poll could not reach the gateway
    PollError {
        workflow_id: String,
        error: String,
        attempts: u32,
    },
    /// Submission failed; no workflow exists
    SubmissionFailed { error: String },
}

impl WorkflowOutcome {
    pub fn workflow_id(&self) -> Option<&str> {
        match self {
            WorkflowOutcome::Completed { workflow_id, .. }
            | WorkflowOutcome::Failed { workflow_id, .. }
            | WorkflowOutcome::TimedOut { workflow_id, .. }
            | WorkflowOutcome::PollError { workflow_id, .. } => Some(workflow_id),
            WorkflowOutcome::SubmissionFailed { .. } => None,
        }
    }

    /// Number of status polls issued.
    pub fn attempts(&self) -> u32 {
        match self {
            WorkflowOutcome::Completed { attempts, .. }
            | WorkflowOutcome::Failed { attempts, .. }
            | WorkflowOutcome::TimedOut { attempts, .. }
            | WorkflowOutcome::PollError { attempts, .. } => *attempts,
            WorkflowOutcome::SubmissionFailed { .. } => 0,
        }
    }

    /// Tag as it appears on the wire.
    pub fn status_tag(&self) -> &'static str {
        match self {
            WorkflowOutcome::Completed { .. } => "completed",
            WorkflowOutcome::Failed { .. } => "failed",
            WorkflowOutcome::TimedOut { .. } => "timed_out",
            WorkflowOutcome::PollError { .. } => "poll_error",
            WorkflowOutcome::SubmissionFailed { .. } => "submission_failed",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowOutcome::Completed { .. })
    }

    /// Text to show an end user. Timeouts are phrased as "still working", not as failure.
    pub fn user_message(&self) -> String {
        match self {
            WorkflowOutcome::Completed { result, .. } => match result {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Null) | None => "Your request completed.".to_string(),
                Some(other) => other.to_string(),
            },
            WorkflowOutcome::Failed { reason, .. } => {
                format!("The agents could not complete this request: {}", reason)
            }
            WorkflowOutcome::TimedOut { .. } => {
                "Your request is still being processed. Please check back in a moment.".to_string()
            }
            WorkflowOutcome::PollError { .. } => {
                "We lost the connection while checking on your request. Please try again."
                    .to_string()
            }
            WorkflowOutcome::SubmissionFailed { .. } => {
                "Your request could not be sent. Please try again.".to_string()
            }
        }
    }
}
