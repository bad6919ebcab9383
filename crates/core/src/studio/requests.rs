//! API request types for studio operations.
//!
//! Following the Functional Core pattern, these are pure data types. The
//! caller passes in "now" so validation stays deterministic.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::serde::{
    deserialize_optional_string, deserialize_optional_text, deserialize_optional_timestamp,
    deserialize_present,
};

use super::error::ValidationError;
use super::operations::normalize_category;
use super::types::{NewContactMessage, NewPhoto, ProfileUpdate, RecordId};

/// Request payload for submitting the contact form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateContactRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub message: Option<String>,
}

impl CreateContactRequest {
    /// Validates required fields and stamps the creation time.
    pub fn into_new_message(
        self,
        now: DateTime<Utc>,
    ) -> Result<NewContactMessage, ValidationError> {
        let name = self.name.ok_or(ValidationError::MissingField("name"))?;
        let email = self.email.ok_or(ValidationError::MissingField("email"))?;
        let message = self
            .message
            .ok_or(ValidationError::MissingField("message"))?;

        Ok(NewContactMessage {
            name,
            email,
            phone: self.phone.unwrap_or_default(),
            message,
            created_at: now,
        })
    }
}

/// Request payload for adding a photo by URL (JSON body).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePhotoRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl CreatePhotoRequest {
    /// Validates the URL and fills in category and timestamp defaults.
    pub fn into_new_photo(self, now: DateTime<Utc>) -> Result<NewPhoto, ValidationError> {
        let url = self.url.ok_or(ValidationError::MissingUrl)?;

        Ok(NewPhoto {
            url,
            category: normalize_category(self.category),
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

/// Request payload for deleting a record by id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteRequest {
    #[serde(default)]
    pub id: Option<RecordId>,
}

impl DeleteRequest {
    /// Returns the id, rejecting missing or blank ones.
    pub fn into_id(self) -> Result<RecordId, ValidationError> {
        self.id
            .filter(|id| !id.is_blank())
            .ok_or(ValidationError::MissingId)
    }
}

/// Request payload for updating the studio profile.
///
/// Every field is optional; only supplied fields are written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "deserialize_present")]
    pub profile_image: Option<Option<String>>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    pub fn into_update(self, now: DateTime<Utc>) -> ProfileUpdate {
        ProfileUpdate {
            profile_image: self.profile_image,
            name: self.name,
            title: self.title,
            bio: self.bio,
            updated_at: now,
        }
    }
}
