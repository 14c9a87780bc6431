//! Game store error type.
//!
//! Shared by the SQLite repository and the in-memory store, so HTTP handlers
//! and transports see one error whatever backs the store.

use derive_more::{Display, Error};
use tracing::instrument;

/// Store failure, tagged with the source location that raised it.
///
/// Raised for connection and query failures, failed migrations, stored
/// documents that no longer parse as a game, and a poisoned memory-store
/// lock. Game-level no-ops are never errors.
#[derive(Debug, Clone, Display, Error)]
#[display("Database error: {} at {}:{}", message, file, line)]
pub struct DbError {
    /// What went wrong.
    pub message: String,
    /// Line that raised the error.
    pub line: u32,
    /// File that raised the error.
    pub file: &'static str,
}

impl DbError {
    /// Creates an error located at the caller.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<diesel::result::Error> for DbError {
    #[track_caller]
    fn from(err: diesel::result::Error) -> Self {
        Self::new(format!("Query failed: {}", err))
    }
}

impl From<diesel::ConnectionError> for DbError {
    #[track_caller]
    fn from(err: diesel::ConnectionError) -> Self {
        Self::new(format!("Connection error: {}", err))
    }
}

// Stored documents are opaque JSON; a parse failure means the row was
// written by something other than this crate.
impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Game state JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_caller_location() {
        let err = DbError::new("Memory store lock poisoned");
        assert_eq!(err.file, file!());
        assert!(err.to_string().starts_with("Database error: Memory store lock poisoned at "));
    }

    #[test]
    fn test_corrupt_document_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = DbError::from(parse);
        assert!(err.message.starts_with("Game state JSON error"));
    }
}
