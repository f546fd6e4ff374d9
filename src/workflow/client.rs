//! Workflow client: submit once, then poll on a retry policy until the workflow ends.

use super::gateway::{HttpGateway, WorkflowGateway};
use super::outcome::WorkflowOutcome;
use super::poll::{poll_until, PollOutcome};
use super::retry::RetryPolicy;
use super::routing::agents_for;
use super::types::{RemoteStatus, StatusResponse, WorkflowHandle, WorkflowRequest, WorkflowStatus};
use crate::agent::ServiceEndpoints;
use crate::config::GlobalConfig;
use crate::error::GatewayError;
use futures::future::join_all;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

const DEFAULT_FAILURE_REASON: &str = "Workflow failed";

/// Progress notifications, in the order they happen for a single workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    Submitted {
        workflow_id: String,
        workflow_type: String,
        agents_involved: Vec<String>,
    },
    Polled {
        workflow_id: String,
        attempt: u32,
        status: WorkflowStatus,
    },
    Finished(WorkflowOutcome),
}

#[derive(Clone)]
pub struct WorkflowClient {
    gateway: Arc<dyn WorkflowGateway>,
    policy: RetryPolicy,
    events: Option<UnboundedSender<WorkflowEvent>>,
}

impl std::fmt::Debug for WorkflowClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowClient")
            .field("policy", &self.policy)
            .field("events", &self.events.is_some())
            .finish()
    }
}

impl WorkflowClient {
    pub fn new(gateway: Arc<dyn WorkflowGateway>) -> Self {
        Self {
            gateway,
            policy: RetryPolicy::default(),
            events: None,
        }
    }

    /// HTTP client against the configured gateway, polling per the `workflow` settings.
    pub fn from_config(global: &GlobalConfig, endpoints: &ServiceEndpoints) -> Result<Self, GatewayError> {
        let gateway = HttpGateway::new(endpoints.gateway(), global.workflow.request_timeout())?;
        Ok(Self::new(Arc::new(gateway)).with_policy(RetryPolicy::from_settings(&global.workflow)))
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_events(mut self, events: UnboundedSender<WorkflowEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Submit `request`. A response without a non-empty `workflow_id` is an error.
    pub async fn submit(&self, request: &WorkflowRequest) -> Result<WorkflowHandle, GatewayError> {
        let response = self.gateway.submit(request).await?;
        let workflow_id = response
            .workflow_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(GatewayError::MissingWorkflowId)?;

        let mut handle = WorkflowHandle::new(workflow_id, request.workflow_type.clone());
        handle.agents_involved = response.agents_involved.unwrap_or_else(|| {
            agents_for(&request.workflow_type)
                .into_iter()
                .map(|agent| agent.name().to_string())
                .collect()
        });

        info!(
            workflow_id = %handle.workflow_id,
            workflow_type = %handle.workflow_type,
            agents = ?handle.agents_involved,
            "Workflow submitted"
        );
        self.emit(WorkflowEvent::Submitted {
            workflow_id: handle.workflow_id.clone(),
            workflow_type: handle.workflow_type.clone(),
            agents_involved: handle.agents_involved.clone(),
        });
        Ok(handle)
    }

    /// One status poll, applied to `handle`.
    pub async fn poll(&self, handle: &mut WorkflowHandle) -> Result<WorkflowStatus, GatewayError> {
        let response = self.gateway.get_status(&handle.workflow_id).await?;
        handle.apply(&response);
        self.emit(WorkflowEvent::Polled {
            workflow_id: handle.workflow_id.clone(),
            attempt: handle.polls,
            status: handle.status,
        });
        Ok(handle.status)
    }

    /// Poll until the workflow reaches a terminal status, the budget runs out, or a poll fails.
    ///
    /// Each response is applied to `handle` as it arrives, so an abandoned wait leaves the
    /// handle at the last observed status.
    pub async fn wait(&self, handle: &mut WorkflowHandle) -> WorkflowOutcome {
        let gateway = &self.gateway;
        let events = self.events.as_ref();
        let workflow_id = handle.workflow_id.clone();
        let workflow_id = workflow_id.as_str();
        let progress = Mutex::new(handle);
        let shared = &progress;

        let polled = poll_until(
            &self.policy,
            |attempt| async move {
                let response = gateway.get_status(workflow_id).await?;
                let status = {
                    let mut handle = shared.lock();
                    handle.apply(&response);
                    handle.status
                };
                debug!(workflow_id, attempt, status = %response.status, "Polled workflow");
                emit(
                    events,
                    WorkflowEvent::Polled {
                        workflow_id: workflow_id.to_string(),
                        attempt,
                        status,
                    },
                );
                Ok::<StatusResponse, GatewayError>(response)
            },
            |response: &StatusResponse| response.remote_status().is_terminal(),
        )
        .await;

        let outcome = self.settle(progress.into_inner(), polled);
        self.emit(WorkflowEvent::Finished(outcome.clone()));
        outcome
    }

    /// [`wait`](Self::wait), unless `abandon` resolves first. Abandonment is local only.
    pub async fn wait_or_abandon<S>(&self, handle: &mut WorkflowHandle, abandon: S) -> Option<WorkflowOutcome>
    where
        S: Future<Output = ()>,
    {
        let workflow_id = handle.workflow_id.clone();
        tokio::select! {
            outcome = self.wait(handle) => Some(outcome),
            _ = abandon => {
                info!(workflow_id = %workflow_id, "Stopped polling abandoned workflow");
                None
            }
        }
    }

    /// Wait on several workflows at once; each keeps its own poll sequence.
    pub async fn wait_all(&self, handles: &mut [WorkflowHandle]) -> Vec<WorkflowOutcome> {
        join_all(handles.iter_mut().map(|handle| self.wait(handle))).await
    }

    /// Submit and wait. Submission failures become [`WorkflowOutcome::SubmissionFailed`].
    pub async fn run(&self, request: &WorkflowRequest) -> WorkflowOutcome {
        match self.submit(request).await {
            Ok(mut handle) => self.wait(&mut handle).await,
            Err(e) => {
                warn!(workflow_type = %request.workflow_type, error = %e, "Workflow submission failed");
                let outcome = WorkflowOutcome::SubmissionFailed {
                    error: e.to_string(),
                };
                self.emit(WorkflowEvent::Finished(outcome.clone()));
                outcome
            }
        }
    }

    fn settle(
        &self,
        handle: &mut WorkflowHandle,
        polled: PollOutcome<StatusResponse, GatewayError>,
    ) -> WorkflowOutcome {
        let workflow_id = handle.workflow_id.clone();
        match polled {
            PollOutcome::Terminal { value, attempts } => {
                if value.remote_status() == RemoteStatus::Completed {
                    info!(workflow_id = %workflow_id, attempts, "Workflow completed");
                    WorkflowOutcome::Completed {
                        workflow_id,
                        result: value.result,
                        primary_agent: value.primary_agent,
                        attempts,
                    }
                } else {
                    let reason = value
                        .error
                        .filter(|e| !e.trim().is_empty())
                        .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string());
                    info!(workflow_id = %workflow_id, attempts, reason = %reason, "Workflow failed");
                    WorkflowOutcome::Failed {
                        workflow_id,
                        reason,
                        attempts,
                    }
                }
            }
            PollOutcome::Exhausted { attempts, .. } => {
                handle.status = WorkflowStatus::TimedOut;
                info!(workflow_id = %workflow_id, attempts, "Workflow still running after poll budget");
                WorkflowOutcome::TimedOut {
                    workflow_id,
                    attempts,
                }
            }
            PollOutcome::Failed { error, attempts } => {
                handle.error = Some(error.to_string());
                warn!(workflow_id = %workflow_id, attempts, error = %error, "Workflow poll failed");
                WorkflowOutcome::PollError {
                    workflow_id,
                    error: error.to_string(),
                    attempts,
                }
            }
        }
    }

    fn emit(&self, event: WorkflowEvent) {
        emit(self.events.as_ref(), event);
    }
}

fn emit(events: Option<&UnboundedSender<WorkflowEvent>>, event: WorkflowEvent) {
    if let Some(events) = events {
        // A dropped receiver just means nobody is listening.
        let _ = events.send(event);
    }
}
