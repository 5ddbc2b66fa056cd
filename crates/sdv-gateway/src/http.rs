//! Shared HTTP response helpers for the API clients.
//!
//! Centralizes status-code checks (non-success → [`GatewayError::Api`] with
//! the server's `error` message) and body decoding (→ [`GatewayError::Parse`])
//! so the client modules stay focused on request construction and mapping.

use serde::de::DeserializeOwned;

use crate::error::GatewayError;

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

/// Check an HTTP response for a non-success status.
///
/// Returns the response unchanged on success. Otherwise the body's `error`
/// field becomes the message, falling back to the raw body text.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(GatewayError::Api {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Check the status, then decode the JSON body into `T`.
pub async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GatewayError> {
    let resp = check_response(resp).await?;
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.trim().to_string(), |b| b.error)
}
