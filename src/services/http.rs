// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared plumbing for the outbound HTTP clients.

use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connect timeout for every outbound client. Request time is otherwise
/// left to the transport defaults.
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Build the `reqwest` client shared by a service.
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default HTTP client");
            reqwest::Client::new()
        })
}

/// Check response status and parse the JSON body.
pub async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Parse(e.to_string()))
}

/// Errors from outbound API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Service not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Parse(String),
}
