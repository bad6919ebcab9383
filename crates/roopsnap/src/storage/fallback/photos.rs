//! Fallback chain for gallery photos.

use std::sync::Arc;

use async_trait::async_trait;

use roopsnap_core::storage::{PhotoRepository, Result};
use roopsnap_core::studio::{sort_newest_first, NewPhoto, Photo, RecordId};

use super::{delete_outcome, no_backend};

/// Tries each photo store in order.
#[derive(Default)]
pub struct FallbackPhotoRepository {
    backends: Vec<(&'static str, Arc<dyn PhotoRepository>)>,
}

impl FallbackPhotoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a store to the end of the chain.
    pub fn with_backend(
        mut self,
        name: &'static str,
        repository: Arc<dyn PhotoRepository>,
    ) -> Self {
        self.backends.push((name, repository));
        self
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|(name, _)| *name).collect()
    }
}

#[async_trait]
impl PhotoRepository for FallbackPhotoRepository {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.list_photos().await {
                Ok(mut photos) => {
                    tracing::debug!(backend = name, count = photos.len(), "Listed photos");
                    sort_newest_first(&mut photos);
                    return Ok(photos);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to list photos");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| no_backend("photo")))
    }

    async fn create_photo(&self, photo: &NewPhoto) -> Result<Photo> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.create_photo(photo).await {
                Ok(stored) => {
                    tracing::info!(backend = name, photo_id = %stored.id, "Stored photo");
                    return Ok(stored);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to store photo");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| no_backend("photo")))
    }

    async fn delete_photo(&self, id: &RecordId) -> Result<()> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.delete_photo(id).await {
                Ok(()) => {
                    tracing::info!(backend = name, photo_id = %id, "Deleted photo");
                    return Ok(());
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!(backend = name, photo_id = %id, "Photo not in store");
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to delete photo");
                    last_error = Some(e);
                }
            }
        }

        Err(delete_outcome(last_error, "Photo", id.as_str()))
    }
}
