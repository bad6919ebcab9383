//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! A repository error only reaches a handler once every store in a chain has
//! been tried, so anything other than "not found" is a backend failure.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use roopsnap_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::NotFound {
///     entity_type: "Photo",
///     id: "abc-123".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::ConnectionFailed(_) => 500,
        RepositoryError::QueryFailed(_) => 500,
        RepositoryError::Serialization(_) => 500,
        RepositoryError::InvalidData(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::NotFound {
            entity_type: "Message",
            id: "1700000000000".to_string(),
        };
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_connection_failed_maps_to_500() {
        let error = RepositoryError::ConnectionFailed("database connection timeout".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = RepositoryError::QueryFailed("bucket does not exist".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_serialization_maps_to_500() {
        let error = RepositoryError::Serialization("failed to deserialize JSON".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_invalid_data_maps_to_500() {
        let error = RepositoryError::InvalidData("document has no _id".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }
}
