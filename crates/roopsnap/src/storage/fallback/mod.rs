//! Fallback chain decorators.
//!
//! Each decorator holds an ordered list of named stores and implements the
//! same trait as its members, so handlers never know how many stores sit
//! behind it:
//!
//! - **Reads**: the first store that answers wins, then the result is sorted
//!   newest first
//! - **Creates**: the first store that persists the record wins
//! - **Deletes**: "not found" moves on to the next store; the first
//!   successful delete wins
//!
//! Failures of any store but the last are logged and swallowed.
//!
//! # Example
//!
//! ```ignore
//! let messages = FallbackMessageRepository::new()
//!     .with_backend("mongodb", mongo.clone())
//!     .with_backend("local", local.clone());
//! ```

mod messages;
mod photos;
mod uploads;

#[cfg(test)]
mod testing;

pub use messages::FallbackMessageRepository;
pub use photos::FallbackPhotoRepository;
pub use uploads::FallbackUploadStore;

use roopsnap_core::storage::RepositoryError;

/// Error returned by a chain with no stores at all.
fn no_backend(resource: &str) -> RepositoryError {
    RepositoryError::QueryFailed(format!("No {resource} store configured"))
}

/// Outcome of a delete after every store was tried.
///
/// "Not found" everywhere stays "not found"; a backend failure in the last
/// store is surfaced instead.
fn delete_outcome(
    last_error: Option<RepositoryError>,
    entity_type: &'static str,
    id: &str,
) -> RepositoryError {
    match last_error {
        Some(err) if !err.is_not_found() => err,
        _ => RepositoryError::NotFound {
            entity_type,
            id: id.to_string(),
        },
    }
}
