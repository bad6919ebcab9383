use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Returns true if this error means the record simply was not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Message",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Message not found: abc-123");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("server selection timeout".to_string());
        assert_eq!(
            error.to_string(),
            "Connection failed: server selection timeout"
        );
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("photos.json is read-only".to_string());
        assert_eq!(error.to_string(), "Query failed: photos.json is read-only");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("missing field `url`".to_string());
        assert_eq!(error.to_string(), "Serialization error: missing field `url`");
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("created_at is not a timestamp".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: created_at is not a timestamp"
        );
    }
}
