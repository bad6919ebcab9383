//! Fake stores for exercising the chains.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use roopsnap_core::storage::{
    MessageRepository, PhotoRepository, RepositoryError, Result, UploadStore, UploadedFile,
};
use roopsnap_core::studio::{ContactMessage, NewContactMessage, NewPhoto, Photo, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Lists two records (oldest first), stores everything, deletes anything.
    Healthy,
    /// Lists nothing and finds nothing to delete.
    Missing,
    /// Fails every call.
    Failing,
}

pub struct FakeStore {
    pub name: &'static str,
    mode: Mode,
    calls: AtomicUsize,
}

impl FakeStore {
    pub fn new(name: &'static str, mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            name,
            mode,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record_call(&self) -> Mode {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.mode
    }

    fn listing_failure(&self) -> RepositoryError {
        RepositoryError::ConnectionFailed(format!("{} is down", self.name))
    }

    fn write_failure(&self) -> RepositoryError {
        RepositoryError::QueryFailed(format!("{} is read-only", self.name))
    }

    fn not_found(&self, entity_type: &'static str, id: &RecordId) -> RepositoryError {
        RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    fn id(&self, suffix: &str) -> RecordId {
        RecordId::new(format!("{}-{}", self.name, suffix))
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

pub fn new_message() -> NewContactMessage {
    NewContactMessage {
        name: "A".to_string(),
        email: "a@x.com".to_string(),
        phone: "555".to_string(),
        message: "hi".to_string(),
        created_at: base_time(),
    }
}

pub fn new_photo() -> NewPhoto {
    NewPhoto {
        url: "https://cdn/a.jpg".to_string(),
        category: "Portrait".to_string(),
        created_at: base_time(),
    }
}

#[async_trait]
impl MessageRepository for FakeStore {
    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        match self.record_call() {
            Mode::Healthy => {
                let mut newer = new_message();
                newer.created_at = base_time() + Duration::hours(1);
                Ok(vec![
                    new_message().to_message(self.id("old")),
                    newer.to_message(self.id("new")),
                ])
            }
            Mode::Missing => Ok(Vec::new()),
            Mode::Failing => Err(self.listing_failure()),
        }
    }

    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        match self.record_call() {
            Mode::Failing => Err(self.write_failure()),
            _ => Ok(message.to_message(RecordId::new(self.name))),
        }
    }

    async fn delete_message(&self, id: &RecordId) -> Result<()> {
        match self.record_call() {
            Mode::Healthy => Ok(()),
            Mode::Missing => Err(self.not_found("Message", id)),
            Mode::Failing => Err(self.write_failure()),
        }
    }
}

#[async_trait]
impl PhotoRepository for FakeStore {
    async fn list_photos(&self) -> Result<Vec<Photo>> {
        match self.record_call() {
            Mode::Healthy => {
                let mut newer = new_photo();
                newer.created_at = base_time() + Duration::hours(1);
                Ok(vec![
                    new_photo().to_photo(self.id("old")),
                    newer.to_photo(self.id("new")),
                ])
            }
            Mode::Missing => Ok(Vec::new()),
            Mode::Failing => Err(self.listing_failure()),
        }
    }

    async fn create_photo(&self, photo: &NewPhoto) -> Result<Photo> {
        match self.record_call() {
            Mode::Failing => Err(self.write_failure()),
            _ => Ok(photo.to_photo(RecordId::new(self.name))),
        }
    }

    async fn delete_photo(&self, id: &RecordId) -> Result<()> {
        match self.record_call() {
            Mode::Healthy => Ok(()),
            Mode::Missing => Err(self.not_found("Photo", id)),
            Mode::Failing => Err(self.write_failure()),
        }
    }
}

#[async_trait]
impl UploadStore for FakeStore {
    async fn store_upload(&self, file: &UploadedFile) -> Result<String> {
        match self.record_call() {
            Mode::Failing => Err(self.write_failure()),
            _ => Ok(format!("https://{}/{}", self.name, file.file_name)),
        }
    }
}
