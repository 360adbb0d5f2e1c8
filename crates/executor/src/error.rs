//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Coded**: [`Error::code`] gives a stable machine-readable name

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Code |
/// |----------|----------|------|
/// | Not Found | `RootNotFound`, `RecordNotFound`, `WatchNotFound`, `KeyNotFound` | `NotFound` |
/// | Validation | `InvalidKey`, `InvalidInput` | `InvalidInput` |
/// | Concurrency | `Conflict` | `Conflict` |
/// | Backend | `BackendUnavailable` | `BackendUnavailable` |
/// | Data | `Corrupt` | `Corrupt` |
/// | System | `Io`, `Serialization`, `Internal` | `Internal` |
///
/// Rejected patch fields are not errors; they are reported in the
/// `PatchReport` of a successful `Output::Patched`.
///
/// # Example
///
/// ```ignore
/// match executor.execute(cmd) {
///     Ok(output) => { /* handle success */ }
///     Err(e) if e.code() == "NotFound" => { /* 404 */ }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Not Found ====================
    /// Domain root document has not been created
    #[error("root not found: {root}")]
    RootNotFound { root: String },

    /// Child key not present in its root
    #[error("record not found: {key} in {root}")]
    RecordNotFound { root: String, key: String },

    /// Watch id not present under its parent
    #[error("watch not found: {watch_id} in {parent}")]
    WatchNotFound { parent: String, watch_id: u64 },

    /// Flat key not present
    #[error("key not found: {key}")]
    KeyNotFound { key: String },

    // ==================== Validation Errors ====================
    /// Invalid key format
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    /// Invalid input
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    // ==================== Concurrency Errors ====================
    /// Optimistic write kept losing to concurrent writers
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    // ==================== Backend Errors ====================
    /// The key-value backend could not be reached or refused the call
    #[error("backend unavailable")]
    BackendUnavailable { reason: String },

    /// A stored value could not be decoded
    #[error("corrupt value under {key}: {reason}")]
    Corrupt { key: String, reason: String },

    // ==================== System Errors ====================
    /// I/O error
    #[error("I/O error: {reason}")]
    Io { reason: String },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// Internal error (bug or invariant violation)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::RootNotFound { .. }
            | Error::RecordNotFound { .. }
            | Error::WatchNotFound { .. }
            | Error::KeyNotFound { .. } => "NotFound",
            Error::InvalidKey { .. } | Error::InvalidInput { .. } => "InvalidInput",
            Error::Conflict { .. } => "Conflict",
            Error::BackendUnavailable { .. } => "BackendUnavailable",
            Error::Corrupt { .. } => "Corrupt",
            Error::Io { .. } | Error::Serialization { .. } | Error::Internal { .. } => "Internal",
        }
    }

    /// Returns true for any not-found variant.
    pub fn is_not_found(&self) -> bool {
        self.code() == "NotFound"
    }
}
