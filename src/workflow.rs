//! Workflow Client
//!
//! Submits work to the gateway and tracks each submission by polling its status on a retry
//! policy. Every way a workflow can end (success, remote failure, budget exhausted, poll error,
//! submission error) is reported as one [`WorkflowOutcome`] variant.

pub mod client;
pub mod gateway;
pub mod outcome;
pub mod poll;
pub mod retry;
pub mod routing;
pub mod types;

pub use client::{WorkflowClient, WorkflowEvent};
pub use gateway::{HttpGateway, WorkflowGateway};
pub use outcome::WorkflowOutcome;
pub use poll::{poll_until, PollOutcome};
pub use retry::{Delay, RetryPolicy};
pub use routing::{agents_for, known_workflow_types};
pub use types::{
    Priority, RemoteStatus, StatusResponse, SubmitResponse, WorkflowHandle, WorkflowRequest,
    WorkflowStatus,
};
