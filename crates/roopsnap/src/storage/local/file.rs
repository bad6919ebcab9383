use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use roopsnap_core::storage::{RepositoryError, Result};

/// A JSON array of records persisted to a single file.
///
/// Reads go through [`JsonFile::load`], which decodes record by record.
/// Writes go through [`JsonFile::load_entries`] and [`JsonFile::save`] on the
/// raw entries, so records this version cannot decode are written back
/// untouched.
#[derive(Debug, Clone)]
pub struct JsonFile<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every record in on-disk order.
    ///
    /// A missing or malformed file reads as an empty list. Entries that do
    /// not decode are skipped with a warning.
    pub async fn load(&self) -> Vec<T> {
        let entries = match self.load_entries().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Local store is unreadable, treating as empty");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "Skipping malformed record");
                    None
                }
            })
            .collect()
    }

    /// Reads the raw entries of the array.
    ///
    /// A missing or blank file is an empty array. A file that cannot be read
    /// or does not hold a JSON array is an error, so callers never overwrite
    /// data they could not see.
    pub async fn load_entries(&self) -> Result<Vec<Value>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(RepositoryError::QueryFailed(format!(
                    "Failed to read {}: {err}",
                    self.path.display()
                )))
            }
        };

        if contents.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice(&contents) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => Err(RepositoryError::QueryFailed(format!(
                "{} does not hold a JSON array",
                self.path.display()
            ))),
            Err(err) => Err(RepositoryError::QueryFailed(format!(
                "{} is not valid JSON: {err}",
                self.path.display()
            ))),
        }
    }

    /// Overwrites the file with `entries`.
    ///
    /// Returns false instead of failing so callers on read-only file systems
    /// can decide what to do.
    pub async fn save<S: Serialize>(&self, entries: &[S]) -> bool {
        let json = match serde_json::to_vec_pretty(entries) {
            Ok(json) => json,
            Err(err) => {
                tracing::error!(path = %self.path.display(), error = %err, "Failed to serialize local store");
                return false;
            }
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if let Err(err) = tokio::fs::create_dir_all(parent).await {
                tracing::error!(path = %parent.display(), error = %err, "Failed to create data directory");
                return false;
            }
        }

        match tokio::fs::write(&self.path, json).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(path = %self.path.display(), error = %err, "Failed to write local store");
                false
            }
        }
    }
}
