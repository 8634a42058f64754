//! Shared reqwest plumbing for the HTTP adapters.

use crate::domain::DomainError;
use std::time::Duration;
use tracing::warn;

/// Build a client whose requests give up after `timeout`.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, DomainError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DomainError::Transport(format!("build HTTP client: {}", e)))
}

/// Send a request and reject non-2xx answers.
pub async fn send_checked(
    request: reqwest::RequestBuilder,
    what: &str,
) -> Result<reqwest::Response, DomainError> {
    let response = request
        .send()
        .await
        .map_err(|e| DomainError::Transport(format!("{} request failed: {}", what, e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %text.chars().take(200).collect::<String>(), what, "HTTP error status");
        return Err(DomainError::Transport(format!(
            "{} returned {}: {}",
            what,
            status,
            text.chars().take(200).collect::<String>()
        )));
    }

    Ok(response)
}

/// Send a request, reject non-2xx answers and decode the body as JSON.
///
/// A body that is not JSON counts as a transport failure.
pub async fn send_json(
    request: reqwest::RequestBuilder,
    what: &str,
) -> Result<serde_json::Value, DomainError> {
    send_checked(request, what)
        .await?
        .json()
        .await
        .map_err(|e| DomainError::Transport(format!("{} returned malformed JSON: {}", what, e)))
}
