//! Error conversion from internal error types.
//!
//! This module provides conversions from `watchvault_core::Error` to the
//! executor's [`Error`] type.

use tracing::error;
use watchvault_core::Error as CoreError;

use crate::Error;

/// Convert a core error to an executor Error.
///
/// Backend failures are logged here, once, at the boundary; the caller only
/// sees a generic `BackendUnavailable`.
impl From<CoreError> for Error {
    fn from(err: CoreError) -> Self {
        match err {
            // Not Found errors
            CoreError::RootNotFound { root } => Error::RootNotFound { root },
            CoreError::ChildNotFound { root, key } => Error::RecordNotFound { root, key },
            CoreError::NestedNotFound { parent, watch_id } => {
                Error::WatchNotFound { parent, watch_id }
            }
            CoreError::KeyNotFound(key) => Error::KeyNotFound { key },

            // Conflict errors
            CoreError::Conflict { root, attempts } => Error::Conflict {
                reason: format!(
                    "{} was modified concurrently; gave up after {} attempts",
                    root, attempts
                ),
            },
            CoreError::VersionMismatch {
                key,
                expected,
                actual,
            } => Error::Conflict {
                reason: format!(
                    "write to {} expected version {}, found {:?}",
                    key, expected, actual
                ),
            },

            // Backend errors
            CoreError::BackendUnavailable(reason) => {
                error!(target: "watchvault::executor", %reason, "backend call failed");
                Error::BackendUnavailable { reason }
            }
            CoreError::Corrupt { key, reason } => Error::Corrupt { key, reason },

            // Validation errors
            CoreError::InvalidInput(reason) => Error::InvalidInput { reason },

            // System errors
            CoreError::IoError(e) => Error::Io {
                reason: e.to_string(),
            },
            CoreError::SerializationError(reason) => Error::Serialization { reason },
        }
    }
}

/// Convert a core result to an executor Result.
pub fn convert_result<T>(result: watchvault_core::Result<T>) -> crate::Result<T> {
    result.map_err(Error::from)
}
