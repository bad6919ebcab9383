use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use roopsnap_core::storage::{MessageRepository, PhotoRepository, RepositoryError, Result};
use roopsnap_core::studio::{
    next_local_id, ContactMessage, NewContactMessage, NewPhoto, Photo, RecordId,
};

use super::JsonFile;

const MESSAGES_FILE: &str = "messages.json";
const PHOTOS_FILE: &str = "photos.json";

/// Repository backed by JSON files in a data directory.
///
/// New records are prepended, so the files read newest first as long as
/// nobody supplies an older `created_at`. Writes keep every entry already on
/// disk, including ones that no longer decode.
#[derive(Debug, Clone)]
pub struct LocalRepository {
    messages: JsonFile<ContactMessage>,
    photos: JsonFile<Photo>,
}

impl LocalRepository {
    /// Creates a repository storing `messages.json` and `photos.json` in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            messages: JsonFile::new(data_dir.join(MESSAGES_FILE)),
            photos: JsonFile::new(data_dir.join(PHOTOS_FILE)),
        }
    }
}

fn write_failed(path: &Path) -> RepositoryError {
    RepositoryError::QueryFailed(format!("Failed to write {}", path.display()))
}

/// The id of a raw entry, if it has one this version understands.
fn entry_id(entry: &Value) -> Option<RecordId> {
    entry.get("id").and_then(|id| RecordId::deserialize(id).ok())
}

/// Prepends a record built around a fresh local id.
async fn prepend<T>(file: &JsonFile<T>, build: impl FnOnce(RecordId) -> T) -> Result<T>
where
    T: Serialize + DeserializeOwned,
{
    let mut entries = file.load_entries().await?;
    let taken: Vec<RecordId> = entries.iter().filter_map(entry_id).collect();
    let stored = build(next_local_id(&taken, Utc::now()));

    let entry =
        serde_json::to_value(&stored).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    entries.insert(0, entry);

    if !file.save(&entries).await {
        return Err(write_failed(file.path()));
    }
    Ok(stored)
}

/// Removes every entry carrying `id`.
async fn remove<T>(file: &JsonFile<T>, id: &RecordId, entity_type: &'static str) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let mut entries = file.load_entries().await?;
    let before = entries.len();
    entries.retain(|entry| entry_id(entry).as_ref() != Some(id));

    if entries.len() == before {
        return Err(RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        });
    }

    if !file.save(&entries).await {
        return Err(write_failed(file.path()));
    }
    Ok(())
}

#[async_trait]
impl MessageRepository for LocalRepository {
    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.messages.load().await)
    }

    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        let stored = prepend(&self.messages, |id| message.to_message(id)).await?;
        tracing::debug!(message_id = %stored.id, "Stored message locally");
        Ok(stored)
    }

    async fn delete_message(&self, id: &RecordId) -> Result<()> {
        remove(&self.messages, id, "Message").await
    }
}

#[async_trait]
impl PhotoRepository for LocalRepository {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        Ok(self.photos.load().await)
    }

    async fn create_photo(&self, photo: &NewPhoto) -> Result<Photo> {
        let stored = prepend(&self.photos, |id| photo.to_photo(id)).await?;
        tracing::debug!(photo_id = %stored.id, "Stored photo locally");
        Ok(stored)
    }

    async fn delete_photo(&self, id: &RecordId) -> Result<()> {
        remove(&self.photos, id, "Photo").await
    }
}
