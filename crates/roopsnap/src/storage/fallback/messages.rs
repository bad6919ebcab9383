//! Fallback chain for contact messages.

use std::sync::Arc;

use async_trait::async_trait;

use roopsnap_core::storage::{MessageRepository, Result};
use roopsnap_core::studio::{sort_newest_first, ContactMessage, NewContactMessage, RecordId};

use super::{delete_outcome, no_backend};

/// Tries each message store in order.
#[derive(Default)]
pub struct FallbackMessageRepository {
    backends: Vec<(&'static str, Arc<dyn MessageRepository>)>,
}

impl FallbackMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a store to the end of the chain.
    pub fn with_backend(
        mut self,
        name: &'static str,
        repository: Arc<dyn MessageRepository>,
    ) -> Self {
        self.backends.push((name, repository));
        self
    }

    /// Store names in the order they are tried.
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.backends.iter().map(|(name, _)| *name).collect()
    }
}

#[async_trait]
impl MessageRepository for FallbackMessageRepository {
    async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.list_messages().await {
                Ok(mut messages) => {
                    tracing::debug!(backend = name, count = messages.len(), "Listed messages");
                    sort_newest_first(&mut messages);
                    return Ok(messages);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to list messages");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| no_backend("message")))
    }

    async fn create_message(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.create_message(message).await {
                Ok(stored) => {
                    tracing::info!(backend = name, message_id = %stored.id, "Stored message");
                    return Ok(stored);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to store message");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| no_backend("message")))
    }

    async fn delete_message(&self, id: &RecordId) -> Result<()> {
        let mut last_error = None;

        for (name, backend) in &self.backends {
            match backend.delete_message(id).await {
                Ok(()) => {
                    tracing::info!(backend = name, message_id = %id, "Deleted message");
                    return Ok(());
                }
                Err(e) if e.is_not_found() => {
                    tracing::debug!(backend = name, message_id = %id, "Message not in store");
                    last_error = Some(e);
                }
                Err(e) => {
                    tracing::warn!(backend = name, error = %e, "Failed to delete message");
                    last_error = Some(e);
                }
            }
        }

        Err(delete_outcome(last_error, "Message", id.as_str()))
    }
}
