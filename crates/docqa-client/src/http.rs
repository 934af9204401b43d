//! Shared HTTP response helpers.
//!
//! The service reports failures as `{"error": "..."}` with a 500 status, and
//! its framework reports request validation failures as `{"detail": ...}`.
//! Both are surfaced as [`ServiceError::Api`] with the most useful message.

use crate::error::ServiceError;

/// Return the response unchanged on success, otherwise
/// [`ServiceError::Api`] with the status code and extracted message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ServiceError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(ServiceError::Api {
        status,
        message: error_message(&body),
    })
}

/// Pull a message out of an error body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };
    for key in ["error", "detail"] {
        match value.get(key) {
            Some(serde_json::Value::String(message)) => return message.clone(),
            Some(other) if !other.is_null() => return other.to_string(),
            _ => {}
        }
    }
    body.trim().to_string()
}
