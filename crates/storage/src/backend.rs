//! Key-value backend abstraction
//!
//! The engine talks to storage only through this trait. It mirrors the small
//! GET/SET/INCR/KEYS surface of a Redis-style server, plus the two
//! conditional writes the engine needs for idempotent root creation and
//! optimistic document updates.
//!
//! Thread safety: all methods must be safe to call concurrently from
//! multiple threads (requires Send + Sync). A single handle is shared by
//! every request.

use watchvault_core::{Result, Versioned};

/// Flat string key-value store with per-key versions.
///
/// Every successful write assigns the key a fresh version that is strictly
/// greater than any version previously handed out by the backend.
pub trait KvBackend: Send + Sync {
    /// Get the current value and version of `key`.
    ///
    /// Returns `None` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Versioned<String>>>;

    /// Unconditionally write `value` under `key`.
    ///
    /// Returns the version assigned to this write.
    fn set(&self, key: &str, value: String) -> Result<u64>;

    /// Write `value` only if `key` is absent (SETNX).
    ///
    /// Returns `true` if this call created the key.
    fn set_if_absent(&self, key: &str, value: String) -> Result<bool>;

    /// Write `value` only if `key` is still at `expected_version`.
    ///
    /// Returns the new version on success.
    ///
    /// # Errors
    ///
    /// Returns `Error::VersionMismatch` if the key was written since
    /// `expected_version` was read, or no longer exists.
    fn compare_and_set(&self, key: &str, expected_version: u64, value: String) -> Result<u64>;

    /// Atomically increment the integer stored at `key` and return the result.
    ///
    /// An absent key counts as `0`, so the first call returns `1`. The
    /// read-default-increment sequence is a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the stored value is not an integer or
    /// is already `u64::MAX`. The stored value is left unchanged.
    fn incr(&self, key: &str) -> Result<u64>;

    /// Every key currently stored.
    fn keys(&self) -> Result<Vec<String>>;
}

impl<B: KvBackend + ?Sized> KvBackend for std::sync::Arc<B> {
    fn get(&self, key: &str) -> Result<Option<Versioned<String>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<u64> {
        (**self).set(key, value)
    }

    fn set_if_absent(&self, key: &str, value: String) -> Result<bool> {
        (**self).set_if_absent(key, value)
    }

    fn compare_and_set(&self, key: &str, expected_version: u64, value: String) -> Result<u64> {
        (**self).compare_and_set(key, expected_version, value)
    }

    fn incr(&self, key: &str) -> Result<u64> {
        (**self).incr(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        (**self).keys()
    }
}
