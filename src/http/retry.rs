//! Classification of registry error responses.

use reqwest::{Response, StatusCode};
use serde::Deserialize;

/// Maximum number of attempts for a retryable request.
pub const MAX_RETRIES: usize = 3;

/// Delay between retry attempts in milliseconds.
pub const RETRY_DELAY_MS: u64 = 1000;

/// A non-success response from the registry API.
///
/// `Display` renders only the registry's own message, so callers can compare
/// it against known API messages.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    /// Build from a response whose status is not a success.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::from_body(status, &body)
    }

    /// Prefer the JSON `message` field; fall back to the status reason.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
            });
        Self { status, message }
    }

    /// Server errors may succeed on another attempt; client errors will not.
    pub fn is_retryable(&self) -> bool {
        self.status.is_server_error()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Whether a failed request is worth another attempt.
///
/// Registry responses are retried only on 5xx; transport and decoding
/// failures are always retried.
pub fn is_retryable_error(e: &anyhow::Error) -> bool {
    match e.downcast_ref::<ApiError>() {
        Some(api) => api.is_retryable(),
        None => true,
    }
}
