//! Error types for WatchVault
//!
//! This module defines all error types used below the executor.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for WatchVault operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the storage, engine, and record layers
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (config files)
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// Aggregate root key has never been created
    #[error("Document not found: {root}")]
    RootNotFound {
        /// Root key that was looked up
        root: String,
    },

    /// Child record missing from an existing aggregate
    #[error("Record not found: {key} in {root}")]
    ChildNotFound {
        /// Root key of the aggregate
        root: String,
        /// Child key that was looked up
        key: String,
    },

    /// Watch missing from a parent's nested sequence
    #[error("Watch not found: {watch_id} in {parent}")]
    NestedNotFound {
        /// Child key of the parent record
        parent: String,
        /// Watch identifier that was looked up
        watch_id: u64,
    },

    /// Flat key not present in the backend
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// Backend compare-and-set saw a different version than expected
    #[error("Version mismatch on {key}: expected {expected}, got {actual:?}")]
    VersionMismatch {
        /// Key being written
        key: String,
        /// Version the writer read
        expected: u64,
        /// Version currently stored, `None` if the key vanished
        actual: Option<u64>,
    },

    /// Optimistic write kept losing to concurrent writers
    #[error("Conflict: {root} changed concurrently, gave up after {attempts} attempts")]
    Conflict {
        /// Root key of the contended aggregate
        root: String,
        /// Number of load/mutate/write cycles attempted
        attempts: usize,
    },

    /// The key-value backend call itself failed
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// A stored value could not be decoded
    #[error("Corrupt value under {key}: {reason}")]
    Corrupt {
        /// Key holding the undecodable value
        key: String,
        /// Decoder message
        reason: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Caller supplied an unusable key or payload
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns `true` for any of the not-found variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::RootNotFound { .. }
                | Error::ChildNotFound { .. }
                | Error::NestedNotFound { .. }
                | Error::KeyNotFound(_)
        )
    }

    /// Build a `Corrupt` error from a decoder failure.
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        Error::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
