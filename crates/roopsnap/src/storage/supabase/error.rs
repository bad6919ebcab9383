//! Supabase error mapping.
//!
//! Maps `reqwest` failures and non-success responses to `RepositoryError`.

use reqwest::StatusCode;
use roopsnap_core::storage::RepositoryError;

/// Map a transport error from sending a request.
pub fn map_request_error(err: reqwest::Error) -> RepositoryError {
    if err.is_connect() || err.is_timeout() {
        RepositoryError::ConnectionFailed(format!("Supabase unreachable: {err}"))
    } else {
        RepositoryError::QueryFailed(format!("Supabase request failed: {err}"))
    }
}

/// Map an error from decoding a response body.
pub fn map_decode_error(err: reqwest::Error) -> RepositoryError {
    RepositoryError::Serialization(format!("Invalid Supabase response: {err}"))
}

/// Map a non-success response.
pub fn map_status_error(status: StatusCode, body: &str) -> RepositoryError {
    RepositoryError::QueryFailed(format!(
        "Supabase returned {}: {}",
        status.as_u16(),
        error_message(body)
    ))
}

/// Pulls the human readable message out of an error body.
///
/// PostgREST and the Storage API both send `{"message": ...}`; Storage
/// sometimes only sends `{"error": ...}`. Anything else is returned as is.
pub fn error_message(body: &str) -> String {
    let parsed: Option<serde_json::Value> = serde_json::from_str(body).ok();
    parsed
        .as_ref()
        .and_then(|value| value.get("message").or_else(|| value.get("error")))
        .and_then(|message| message.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                "empty response".to_string()
            } else {
                body.trim().to_string()
            }
        })
}
