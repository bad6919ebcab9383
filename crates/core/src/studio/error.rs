use thiserror::Error;

/// Errors raised while validating an incoming request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("No ID provided")]
    MissingId,
    #[error("No file uploaded")]
    MissingFile,
    #[error("No URL provided")]
    MissingUrl,
    #[error("Invalid content type")]
    InvalidContentType,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MissingField("email").to_string(),
            "Missing required field: email"
        );
        assert_eq!(ValidationError::MissingId.to_string(), "No ID provided");
        assert_eq!(ValidationError::MissingFile.to_string(), "No file uploaded");
        assert_eq!(ValidationError::MissingUrl.to_string(), "No URL provided");
        assert_eq!(
            ValidationError::InvalidContentType.to_string(),
            "Invalid content type"
        );
    }
}
