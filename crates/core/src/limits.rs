//! Key limits
//!
//! Keys reach the backend verbatim, so every entry point validates them the
//! same way before issuing a call.

use crate::error::{Error, Result};

/// Maximum key length in bytes
pub const MAX_KEY_BYTES: usize = 1024;

/// Validate a backend key.
///
/// Rejects empty keys, keys longer than [`MAX_KEY_BYTES`], and keys containing
/// NUL bytes.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(Error::InvalidInput("Key must not be empty".to_string()));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(Error::InvalidInput(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_BYTES
        )));
    }
    if key.contains('\0') {
        return Err(Error::InvalidInput(
            "Key must not contain NUL bytes".to_string(),
        ));
    }
    Ok(())
}
