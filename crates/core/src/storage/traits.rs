use async_trait::async_trait;

use crate::studio::{
    ContactMessage, NewContactMessage, NewPhoto, Photo, ProfileUpdate, RecordId, StoredProfile,
};

use super::{Result, UploadedFile};

/// Repository for contact form messages.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Lists every stored message. Ordering is up to the backend.
    async fn list_messages(&self) -> Result<Vec<ContactMessage>>;

    /// Persists a new message and returns it with the id the backend assigned.
    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage>;

    /// Deletes a message by its ID.
    ///
    /// Returns `RepositoryError::NotFound` when nothing matched.
    async fn delete_message(&self, id: &RecordId) -> Result<()>;
}

/// Repository for gallery photos.
#[async_trait]
pub trait PhotoRepository: Send + Sync {
    /// Lists every stored photo. Ordering is up to the backend.
    async fn list_photos(&self) -> Result<Vec<Photo>>;

    /// Persists a new photo and returns it with the id the backend assigned.
    async fn create_photo(&self, photo: &NewPhoto) -> Result<Photo>;

    /// Deletes a photo by its ID.
    ///
    /// Returns `RepositoryError::NotFound` when nothing matched.
    async fn delete_photo(&self, id: &RecordId) -> Result<()>;
}

/// Store for the singleton studio profile.
///
/// There is exactly one profile, so there are no keys: `load_profile` reads
/// whatever is stored and `save_profile` creates it or merges into it.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Reads the stored profile, `None` if it was never written.
    async fn load_profile(&self) -> Result<Option<StoredProfile>>;

    /// Creates the profile if absent, otherwise updates the supplied fields.
    async fn save_profile(&self, update: &ProfileUpdate) -> Result<()>;
}

/// Destination for binary photo uploads.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Stores the file and returns the URL it can be displayed from.
    async fn store_upload(&self, file: &UploadedFile) -> Result<String>;
}
