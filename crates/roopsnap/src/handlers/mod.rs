pub mod contact;
pub mod error;
pub mod health;
pub mod pages;
pub mod photos;
pub mod profile;

pub use error::ApiError;

use axum::body::Bytes;
use axum::http::{header::CONTENT_TYPE, HeaderMap};
use serde::de::DeserializeOwned;

use roopsnap_core::studio::ValidationError;

/// Parses a JSON body whatever content type the client declared.
///
/// An empty body reads as `{}` so missing fields are reported by validation
/// rather than as a syntax error.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"{}"
    } else {
        body
    };

    serde_json::from_slice(body)
        .map_err(|e| ApiError::from(ValidationError::InvalidBody(e.to_string())))
}

/// Returns the `Content-Type` header, lowercased, or an empty string.
fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase()
}
