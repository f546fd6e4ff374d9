//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, GatewayError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::Gateway(GatewayError::Transport(_)) | ApiError::Gateway(GatewayError::Timeout(_)) => {
            format!("{}\nIs the gateway running? Set --gateway-url or API_GATEWAY_URL.", e)
        }
        _ => e.to_string(),
    }
}
