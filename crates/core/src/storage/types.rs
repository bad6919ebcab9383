/// A binary file received from a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name, `upload` when the client sent none.
    pub file_name: String,
    /// MIME type, `application/octet-stream` when the client sent none.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Creates an upload, filling in defaults for missing metadata.
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "upload".to_string()),
            content_type: content_type
                .filter(|ct| !ct.trim().is_empty())
                .unwrap_or_else(|| "application/octet-stream".to_string()),
            bytes,
        }
    }

    /// Returns true if the upload carries no data.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
