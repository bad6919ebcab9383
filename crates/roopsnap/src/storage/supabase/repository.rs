//! Supabase repository implementations.

use async_trait::async_trait;
use chrono::Utc;

use roopsnap_core::storage::{
    PhotoRepository, RepositoryError, Result, UploadStore, UploadedFile,
};
use roopsnap_core::studio::{upload_object_key, NewPhoto, Photo, RecordId};

use super::client::SupabaseClient;
use super::conversions::{photo_to_insert, row_to_photo, rows_to_photos, PhotoRow};

/// Photo repository backed by a Supabase table.
pub struct SupabasePhotoRepository {
    client: SupabaseClient,
    table: String,
}

impl SupabasePhotoRepository {
    pub fn new(client: SupabaseClient, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

#[async_trait]
impl PhotoRepository for SupabasePhotoRepository {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        let rows: Vec<serde_json::Value> = self.client.select_all(&self.table).await?;
        Ok(rows_to_photos(rows))
    }

    async fn create_photo(&self, photo: &NewPhoto) -> Result<Photo> {
        let rows: Vec<PhotoRow> = self
            .client
            .insert(&self.table, &photo_to_insert(photo))
            .await?;

        rows.into_iter().next().map(row_to_photo).ok_or_else(|| {
            RepositoryError::InvalidData("insert returned no rows".to_string())
        })
    }

    async fn delete_photo(&self, id: &RecordId) -> Result<()> {
        let deleted: Vec<serde_json::Value> =
            self.client.delete_by_id(&self.table, id).await?;

        if deleted.is_empty() {
            return Err(RepositoryError::NotFound {
                entity_type: "Photo",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

/// Upload store backed by a Supabase Storage bucket.
pub struct SupabaseUploadStore {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseUploadStore {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl UploadStore for SupabaseUploadStore {
    async fn store_upload(&self, file: &UploadedFile) -> Result<String> {
        let key = upload_object_key(&file.file_name, Utc::now());

        self.client
            .upload(&self.bucket, &key, &file.content_type, file.bytes.clone())
            .await?;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            size = file.bytes.len(),
            "Uploaded photo"
        );
        Ok(self.client.public_object_url(&self.bucket, &key))
    }
}
