//! FlatStore: plain JSON values under caller-chosen keys
//!
//! Values are stored as JSON text. Flat keys share the backend's key space
//! with the aggregate roots and id counters: `keys` lists every key, and
//! `get` can read any of them, but `put` refuses the reserved names so that
//! a root always decodes and a counter only moves forward.

use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use watchvault_core::{is_reserved_key, validate_key, Error, Result};
use watchvault_storage::KvBackend;

/// Get/put access to individual backend keys.
#[derive(Clone)]
pub struct FlatStore {
    backend: Arc<dyn KvBackend>,
}

impl FlatStore {
    /// Create new FlatStore instance
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Store `value` under `key`, replacing whatever was there.
    ///
    /// Returns the version the backend assigned to the write.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for an invalid key or for a reserved
    /// root or counter key.
    pub fn put(&self, key: &str, value: &Value) -> Result<u64> {
        validate_key(key)?;
        if is_reserved_key(key) {
            return Err(Error::InvalidInput(format!(
                "Key '{}' is managed by the vault and cannot be written directly",
                key
            )));
        }
        let version = self.backend.set(key, serde_json::to_string(value)?)?;
        debug!(target: "watchvault::flat", key, version, "put");
        Ok(version)
    }

    /// Read the JSON value under `key`.
    pub fn get(&self, key: &str) -> Result<Value> {
        validate_key(key)?;
        let stored = self
            .backend
            .get(key)?
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;
        serde_json::from_str(&stored.value).map_err(|e| Error::corrupt(key, e))
    }

    /// Every key in the backend, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let mut keys = self.backend.keys()?;
        keys.sort();
        Ok(keys)
    }
}
