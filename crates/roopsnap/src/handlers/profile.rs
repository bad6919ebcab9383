//! Studio profile handlers.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use chrono::Utc;
use serde_json::{json, Value};

use roopsnap_core::studio::{Profile, UpdateProfileRequest, ValidationError};

use super::{content_type, parse_json, ApiError};
use crate::state::AppState;

/// Get the profile (GET /api/profile).
///
/// Never fails: an unset profile or an unreachable store reads as the
/// default profile.
pub async fn get_profile(State(state): State<AppState>) -> Json<Profile> {
    let Some(store) = state.profile.as_ref() else {
        return Json(Profile::default());
    };

    let profile = match store.load_profile().await {
        Ok(Some(stored)) => stored.into_profile(),
        Ok(None) => Profile::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load profile, serving defaults");
            Profile::default()
        }
    };

    Json(profile)
}

/// Update the profile (POST /api/profile).
///
/// Only JSON bodies are accepted, and only the supplied fields are written.
pub async fn update_profile(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    if !content_type(&headers).contains("application/json") {
        return Err(ValidationError::InvalidContentType.into());
    }

    let request: UpdateProfileRequest = parse_json(&body)?;
    let store = state.profile.as_ref().ok_or(ApiError::NotConfigured)?;

    store.save_profile(&request.into_update(Utc::now())).await?;

    tracing::info!("Profile updated");

    Ok(Json(json!({
        "success": true,
        "message": "Profile updated successfully",
    })))
}
