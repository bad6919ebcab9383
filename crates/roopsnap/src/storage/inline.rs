//! Upload store that embeds the file in the record itself.

use async_trait::async_trait;

use roopsnap_core::storage::{Result, UploadStore, UploadedFile};
use roopsnap_core::studio::data_uri;

/// Turns uploads into `data:` URIs. Never fails, so it ends every upload chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineUploadStore;

#[async_trait]
impl UploadStore for InlineUploadStore {
    async fn store_upload(&self, file: &UploadedFile) -> Result<String> {
        Ok(data_uri(&file.content_type, &file.bytes))
    }
}
