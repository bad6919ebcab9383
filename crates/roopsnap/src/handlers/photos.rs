//! Gallery photo handlers.
//!
//! Photos arrive either as a multipart upload carrying the image itself or
//! as JSON carrying a URL (or a `data:` URI built by the admin page). Both
//! end up as the same stored record.

use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use roopsnap_core::storage::UploadedFile;
use roopsnap_core::studio::{
    normalize_category, CreatePhotoRequest, DeleteRequest, NewPhoto, Photo, ValidationError,
};

use super::{content_type, parse_json, ApiError};
use crate::state::AppState;

/// List all photos, newest first (GET /api/photos).
pub async fn list_photos(State(state): State<AppState>) -> Result<Json<Vec<Photo>>, ApiError> {
    let photos = state.photos.list_photos().await?;
    Ok(Json(photos))
}

/// Add a photo (POST /api/photos).
pub async fn create_photo(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<Value>, ApiError> {
    let content_type = content_type(request.headers());

    let photo = if content_type.starts_with("multipart/form-data") {
        let multipart = Multipart::from_request(request, &state).await?;
        photo_from_multipart(&state, multipart).await?
    } else if content_type.contains("application/json") {
        let body = Bytes::from_request(request, &state).await?;
        let request: CreatePhotoRequest = parse_json(&body)?;
        request.into_new_photo(Utc::now())?
    } else {
        return Err(ValidationError::InvalidContentType.into());
    };

    let stored = state.photos.create_photo(&photo).await?;

    tracing::info!(photo_id = %stored.id, category = %stored.category, "Added photo");

    Ok(Json(json!({ "success": true, "data": stored })))
}

/// Reads the `file` and optional `category` fields, then stores the file.
async fn photo_from_multipart(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<NewPhoto, ApiError> {
    let mut file = None;
    let mut category = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some(UploadedFile::new(file_name, content_type, bytes.to_vec()));
            }
            Some("category") => category = Some(field.text().await?),
            _ => {}
        }
    }

    let file = file
        .filter(|file| !file.is_empty())
        .ok_or(ValidationError::MissingFile)?;

    let url = state.uploads.store_upload(&file).await?;

    Ok(NewPhoto {
        url,
        category: normalize_category(category),
        created_at: Utc::now(),
    })
}

/// Delete a photo by id (DELETE /api/photos with `{"id": ...}`).
pub async fn delete_photo(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: DeleteRequest = parse_json(&body)?;
    let id = request.into_id()?;

    state.photos.delete_photo(&id).await?;

    Ok(Json(json!({ "success": true })))
}
