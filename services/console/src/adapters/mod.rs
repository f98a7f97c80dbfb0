//! services/console/src/adapters/mod.rs
//!
//! HTTP adapters for the gateway ports, plus the response handling they share.

pub mod assistant_http;
pub mod classifier_http;

pub use assistant_http::HttpAssistantGateway;
pub use classifier_http::HttpClassifierGateway;

use assistant_core::ports::{GatewayError, GatewayResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::warn;

/// Builds the HTTP client both adapters use.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder().timeout(timeout).build()
}

pub(crate) fn transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Transport(format!("request timed out: {}", error))
    } else {
        GatewayError::Transport(error.to_string())
    }
}

/// Checks the status, then decodes a success body into `T`.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let body = read_success_body(response).await?;
    serde_json::from_str(&body).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

/// Returns the body of a 2xx response, or the server's rejection.
pub(crate) async fn read_success_body(response: Response) -> GatewayResult<String> {
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        let detail = detail_from_body(&body);
        warn!(status = status.as_u16(), detail = ?detail, "Gateway returned an error status.");
        return Err(GatewayError::Rejected {
            status: status.as_u16(),
            detail,
        });
    }
    Ok(body)
}

/// Extracts the `detail` field of an error body.
///
/// Validation failures carry a list of objects with a `msg` each; those are
/// joined into one line.
pub(crate) fn detail_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}
