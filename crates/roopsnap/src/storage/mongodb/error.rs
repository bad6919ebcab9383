//! MongoDB error mapping.
//!
//! Maps driver errors to `RepositoryError` from `roopsnap_core::storage`.

use mongodb::error::{Error, ErrorKind};
use roopsnap_core::storage::RepositoryError;

/// Map an error raised while creating the client.
pub fn map_connect_error(err: Error) -> RepositoryError {
    RepositoryError::ConnectionFailed(format!("Failed to connect to MongoDB: {err}"))
}

/// Map an error raised by a collection operation.
///
/// Errors that mean the server was never reached are reported as connection
/// failures; everything else is a failed query.
pub fn map_query_error(err: Error) -> RepositoryError {
    match *err.kind {
        ErrorKind::ServerSelection { .. }
        | ErrorKind::DnsResolve { .. }
        | ErrorKind::Io(_)
        | ErrorKind::ConnectionPoolCleared { .. } => {
            RepositoryError::ConnectionFailed(err.to_string())
        }
        ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
            RepositoryError::Serialization(err.to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}
