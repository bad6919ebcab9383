//! Contact message handlers.

use axum::{body::Bytes, extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use roopsnap_core::studio::{ContactMessage, CreateContactRequest, DeleteRequest};

use super::{parse_json, ApiError};
use crate::state::AppState;

/// List all messages, newest first (GET /api/contact).
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    let messages = state.messages.list_messages().await?;
    Ok(Json(messages))
}

/// Submit the contact form (POST /api/contact).
pub async fn create_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: CreateContactRequest = parse_json(&body)?;
    let message = request.into_new_message(Utc::now())?;

    let stored = state.messages.create_message(&message).await?;

    tracing::info!(message_id = %stored.id, email = %stored.email, "Received contact message");

    Ok(Json(json!({ "success": true, "data": stored })))
}

/// Delete a message by id (DELETE /api/contact with `{"id": ...}`).
pub async fn delete_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: DeleteRequest = parse_json(&body)?;
    let id = request.into_id()?;

    state.messages.delete_message(&id).await?;

    Ok(Json(json!({ "success": true })))
}
