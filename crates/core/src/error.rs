//! Storage error model.

use thiserror::Error;

/// Result type used by storage writes.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while writing to client storage.
///
/// Reads never fail: a missing or unreadable entry is reported as absent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Keys must be non-empty.
    #[error("invalid storage key")]
    InvalidKey,
}
