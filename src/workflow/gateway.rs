//! Gateway client: the two HTTP calls the workflow client depends on.

use super::types::{StatusResponse, SubmitResponse, WorkflowRequest};
use crate::error::GatewayError;
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::debug;

/// Remote coordinator that accepts workflows and reports their status.
#[async_trait]
pub trait WorkflowGateway: Send + Sync {
    /// `POST /workflow`. Returns the raw response; a missing `workflow_id` is the caller's
    /// concern.
    async fn submit(&self, request: &WorkflowRequest) -> Result<SubmitResponse, GatewayError>;

    /// `GET /workflows/{workflow_id}`. Read-only.
    async fn get_status(&self, workflow_id: &str) -> Result<StatusResponse, GatewayError>;
}

const GATEWAY_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn map_http_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout(error.to_string())
    } else if error.is_decode() {
        GatewayError::Decode(error.to_string())
    } else if let Some(status) = error.status() {
        GatewayError::Status {
            code: status.as_u16(),
            body: error.to_string(),
        }
    } else {
        GatewayError::Transport(error.to_string())
    }
}

/// [`WorkflowGateway`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, GatewayError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/')).map_err(|e| GatewayError::InvalidUrl {
            url: raw.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl {
                url: raw,
                message: "not a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .connect_timeout(GATEWAY_HTTP_CONNECT_TIMEOUT.min(request_timeout))
            .timeout(request_timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// `base_url` plus `segments`, each percent-encoded as a single path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(GatewayError::Status {
            code: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl WorkflowGateway for HttpGateway {
    async fn submit(&self, request: &WorkflowRequest) -> Result<SubmitResponse, GatewayError> {
        let url = self.endpoint(&["workflow"]);
        debug!(url = %url, workflow_type = %request.workflow_type, "Submitting workflow");

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn get_status(&self, workflow_id: &str) -> Result<StatusResponse, GatewayError> {
        let url = self.endpoint(&["workflows", workflow_id]);
        let response = self.client.get(url).send().await.map_err(map_http_error)?;
        let response = Self::check_status(response).await?;

        response.json().await.map_err(|e| GatewayError::Decode(e.to_string()))
    }
}
