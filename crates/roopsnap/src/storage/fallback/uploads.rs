//! Fallback chain for binary uploads.

use std::sync::Arc;

use async_trait::async_trait;

use roopsnap_core::storage::{Result, UploadStore, UploadedFile};

use super::no_backend;

/// Tries each upload destination in order.
///
/// The chain normally ends with the inline store, which cannot fail.
#[derive(Default)]
pub struct FallbackUploadStore {
    backends: Vec<(&'static str, Arc<dyn UploadStore>)>,
}

impl FallbackUploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, name: &'static str, store: Arc<dyn UploadStore>) -> Self {
        self.backends.push((name, store));
        self
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|(name, _)| *name).collect()
    }
}

#[async_trait]
impl UploadStore for FallbackUploadStore {
    async fn store_upload(&self, file: &UploadedFile) -> Result<String> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.store_upload(file).await {
                Ok(url) => {
                    tracing::debug!(backend = name, file_name = %file.file_name, "Stored upload");
                    return Ok(url);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to store upload");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| no_backend("upload")))
    }
}
