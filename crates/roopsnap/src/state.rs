//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. Every resource is served through a fallback chain whose
//! members are decided once from [`Config`] at start-up.

use std::sync::Arc;

use serde::Serialize;

use roopsnap_core::storage::{MessageRepository, PhotoRepository, ProfileStore, UploadStore};

use crate::config::Config;
use crate::storage::{
    FallbackMessageRepository, FallbackPhotoRepository, FallbackUploadStore, InlineUploadStore,
    LocalRepository,
};

/// Which stores back each resource, in the order they are tried.
#[derive(Debug, Clone, Serialize)]
pub struct StorageSummary {
    pub messages: Vec<&'static str>,
    pub photos: Vec<&'static str>,
    pub uploads: Vec<&'static str>,
    pub profile: bool,
}

/// Shared application state.
///
/// This is cloned for each request handler and holds the store chains as
/// trait objects.
#[derive(Clone)]
pub struct AppState {
    /// Contact message chain (document store, then local files).
    pub messages: Arc<dyn MessageRepository>,
    /// Photo chain (table service, then document store, then local files).
    pub photos: Arc<dyn PhotoRepository>,
    /// Upload destinations (object storage, then inline data URIs).
    pub uploads: Arc<dyn UploadStore>,
    /// Profile store. `None` when no database is configured.
    pub profile: Option<Arc<dyn ProfileStore>>,
    /// Chain layout reported by the health endpoint.
    pub storage: Arc<StorageSummary>,
    /// Request body limit in bytes.
    pub max_upload_bytes: usize,
}

/// Remote stores collected before the chains are assembled.
#[derive(Default)]
struct RemoteStores {
    messages: Vec<(&'static str, Arc<dyn MessageRepository>)>,
    photos: Vec<(&'static str, Arc<dyn PhotoRepository>)>,
    uploads: Vec<(&'static str, Arc<dyn UploadStore>)>,
    profile: Option<Arc<dyn ProfileStore>>,
}

impl AppState {
    /// Builds the store chains for the given configuration.
    ///
    /// Remote stores are only added when their configuration is present;
    /// the local JSON files and inline uploads always close the chains.
    pub fn new(config: &Config) -> Self {
        let mut remotes = RemoteStores::default();
        // Table service goes ahead of the document store for photos.
        add_supabase(config, &mut remotes);
        add_mongodb(config, &mut remotes);

        let local = Arc::new(LocalRepository::new(&config.data_dir));

        let messages = remotes
            .messages
            .into_iter()
            .fold(FallbackMessageRepository::new(), |chain, (name, repo)| {
                chain.with_backend(name, repo)
            })
            .with_backend("local", local.clone());

        let photos = remotes
            .photos
            .into_iter()
            .fold(FallbackPhotoRepository::new(), |chain, (name, repo)| {
                chain.with_backend(name, repo)
            })
            .with_backend("local", local);

        let uploads = remotes
            .uploads
            .into_iter()
            .fold(FallbackUploadStore::new(), |chain, (name, store)| {
                chain.with_backend(name, store)
            })
            .with_backend("inline", Arc::new(InlineUploadStore));

        let storage = StorageSummary {
            messages: messages.backend_names(),
            photos: photos.backend_names(),
            uploads: uploads.backend_names(),
            profile: remotes.profile.is_some(),
        };

        tracing::info!(
            messages = ?storage.messages,
            photos = ?storage.photos,
            uploads = ?storage.uploads,
            profile = storage.profile,
            data_dir = %config.data_dir.display(),
            "Storage configured"
        );

        Self {
            messages: Arc::new(messages),
            photos: Arc::new(photos),
            uploads: Arc::new(uploads),
            profile: remotes.profile,
            storage: Arc::new(storage),
            max_upload_bytes: config.max_upload_bytes,
        }
    }

    /// Replaces the profile store.
    #[cfg(test)]
    pub fn with_profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.profile = Some(store);
        Arc::make_mut(&mut self.storage).profile = true;
        self
    }
}

// ============================================================================
// Remote backends
// ============================================================================

#[cfg(feature = "mongodb")]
fn add_mongodb(config: &Config, remotes: &mut RemoteStores) {
    use crate::storage::MongoRepository;

    let Some(uri) = config.mongodb_uri.as_deref() else {
        return;
    };

    let mongo = Arc::new(MongoRepository::new(uri, &config.mongodb_db_name));
    let messages: Arc<dyn MessageRepository> = mongo.clone();
    let photos: Arc<dyn PhotoRepository> = mongo.clone();

    remotes.messages.push(("mongodb", messages));
    remotes.photos.push(("mongodb", photos));
    remotes.profile = Some(mongo);
}

#[cfg(not(feature = "mongodb"))]
fn add_mongodb(config: &Config, _remotes: &mut RemoteStores) {
    if config.mongodb_uri.is_some() {
        tracing::warn!("MONGODB_URI is set but the mongodb feature is disabled");
    }
}

#[cfg(feature = "supabase")]
fn add_supabase(config: &Config, remotes: &mut RemoteStores) {
    use crate::storage::{SupabaseClient, SupabasePhotoRepository, SupabaseUploadStore};

    let (Some(url), Some(read_key)) = (config.supabase_url.as_deref(), config.supabase_read_key())
    else {
        return;
    };

    let write_key = config.supabase_write_key().map(str::to_string);
    let client = SupabaseClient::new(url, read_key, write_key.clone());

    let photos: Arc<dyn PhotoRepository> = Arc::new(SupabasePhotoRepository::new(
        client.clone(),
        &config.supabase_photos_table,
    ));
    remotes.photos.push(("supabase", photos));

    // Uploads need the service role key.
    if write_key.is_some() {
        let uploads: Arc<dyn UploadStore> =
            Arc::new(SupabaseUploadStore::new(client, &config.supabase_bucket));
        remotes.uploads.push(("supabase", uploads));
    }
}

#[cfg(not(feature = "supabase"))]
fn add_supabase(config: &Config, _remotes: &mut RemoteStores) {
    if config.supabase_url.is_some() {
        tracing::warn!("SUPABASE_URL is set but the supabase feature is disabled");
    }
}
