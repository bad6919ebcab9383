//! MongoDB repository implementation.
//!
//! Implements the repository traits from `roopsnap_core::storage` using the
//! official driver.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use tokio::sync::OnceCell;

use roopsnap_core::storage::{
    MessageRepository, PhotoRepository, ProfileStore, RepositoryError, Result,
};
use roopsnap_core::studio::{
    ContactMessage, NewContactMessage, NewPhoto, Photo, ProfileUpdate, RecordId, StoredProfile,
};

use super::conversions::{
    bson_to_record_id, document_to_message, document_to_photo, document_to_profile, id_filters,
    message_to_document, photo_to_document, profile_update_document,
};
use super::error::{map_connect_error, map_query_error};

const MESSAGES_COLLECTION: &str = "contact_messages";
const PHOTOS_COLLECTION: &str = "photos";
const PROFILE_COLLECTION: &str = "profile";

/// MongoDB-based repository.
///
/// The client is created on first use and shared for the life of the
/// process. A failed connection attempt is not cached, so the next request
/// tries again.
pub struct MongoRepository {
    uri: String,
    db_name: String,
    db: OnceCell<Database>,
}

impl MongoRepository {
    /// Creates a repository for the given connection string and database name.
    pub fn new(uri: impl Into<String>, db_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            db_name: db_name.into(),
            db: OnceCell::new(),
        }
    }

    async fn database(&self) -> Result<&Database> {
        self.db
            .get_or_try_init(|| async {
                let client = Client::with_uri_str(&self.uri)
                    .await
                    .map_err(map_connect_error)?;
                tracing::info!(db = %self.db_name, "Connected to MongoDB");
                Ok::<_, RepositoryError>(client.database(&self.db_name))
            })
            .await
    }

    async fn collection(&self, name: &str) -> Result<Collection<Document>> {
        Ok(self.database().await?.collection(name))
    }

    async fn insert(&self, name: &str, document: Document) -> Result<RecordId> {
        let result = self
            .collection(name)
            .await?
            .insert_one(document)
            .await
            .map_err(map_query_error)?;
        bson_to_record_id(&result.inserted_id)
    }

    /// Reads a whole collection, newest first. Documents that do not convert
    /// are skipped with a warning.
    async fn find_all<T>(
        &self,
        name: &str,
        convert: fn(&Document) -> Result<T>,
    ) -> Result<Vec<T>> {
        let documents: Vec<Document> = self
            .collection(name)
            .await?
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(map_query_error)?
            .try_collect()
            .await
            .map_err(map_query_error)?;

        Ok(documents
            .iter()
            .filter_map(|document| match convert(document) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(collection = name, error = %e, "Skipping malformed document");
                    None
                }
            })
            .collect())
    }

    /// Deletes one document, trying the id as an ObjectId and then as a
    /// plain string.
    async fn delete_by_id(
        &self,
        name: &str,
        id: &RecordId,
        entity_type: &'static str,
    ) -> Result<()> {
        let collection = self.collection(name).await?;

        for filter in id_filters(id) {
            let result = collection
                .delete_one(filter)
                .await
                .map_err(map_query_error)?;
            if result.deleted_count > 0 {
                return Ok(());
            }
        }

        Err(RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        })
    }
}

// ============================================================================
// MessageRepository implementation
// ============================================================================

#[async_trait]
impl MessageRepository for MongoRepository {
    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        self.find_all(MESSAGES_COLLECTION, document_to_message).await
    }

    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        let id = self
            .insert(MESSAGES_COLLECTION, message_to_document(message))
            .await?;
        Ok(message.to_message(id))
    }

    async fn delete_message(&self, id: &RecordId) -> Result<()> {
        self.delete_by_id(MESSAGES_COLLECTION, id, "Message").await
    }
}

// ============================================================================
// PhotoRepository implementation
// ============================================================================

#[async_trait]
impl PhotoRepository for MongoRepository {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        self.find_all(PHOTOS_COLLECTION, document_to_photo).await
    }

    async fn create_photo(&self, photo: &NewPhoto) -> Result<Photo> {
        let id = self
            .insert(PHOTOS_COLLECTION, photo_to_document(photo))
            .await?;
        Ok(photo.to_photo(id))
    }

    async fn delete_photo(&self, id: &RecordId) -> Result<()> {
        self.delete_by_id(PHOTOS_COLLECTION, id, "Photo").await
    }
}

// ============================================================================
// ProfileStore implementation
// ============================================================================

#[async_trait]
impl ProfileStore for MongoRepository {
    async fn load_profile(&self) -> Result<Option<StoredProfile>> {
        let document = self
            .collection(PROFILE_COLLECTION)
            .await?
            .find_one(doc! {})
            .await
            .map_err(map_query_error)?;

        Ok(document.as_ref().map(document_to_profile))
    }

    async fn save_profile(&self, update: &ProfileUpdate) -> Result<()> {
        self.collection(PROFILE_COLLECTION)
            .await?
            .update_one(doc! {}, profile_update_document(update))
            .upsert(true)
            .await
            .map_err(map_query_error)?;
        Ok(())
    }
}
