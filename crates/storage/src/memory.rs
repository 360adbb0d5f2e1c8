//! In-memory backend
//!
//! DashMap keyed by the raw string key, one `Versioned<String>` per entry.
//! Conditional writes and increments hold the key's shard lock for the whole
//! read-check-write, which makes them atomic per key without a global lock.
//!
//! # Version Handling
//!
//! Versions come from one `AtomicU64` shared by all keys, so they are unique
//! across the store and strictly increasing in write order. A compare-and-set
//! against a stale version can never succeed by accident, even if the value
//! was rewritten to identical bytes in between.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;
use watchvault_core::{Error, Result, Versioned};

use crate::backend::KvBackend;

/// Process-local key-value backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    data: DashMap<String, Versioned<String>>,
    version: AtomicU64,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Highest version assigned so far (0 before the first write)
    pub fn current_version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    #[inline]
    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }
}

impl KvBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Versioned<String>>> {
        Ok(self.data.get(key).map(|e| e.value().clone()))
    }

    fn set(&self, key: &str, value: String) -> Result<u64> {
        let version = self.next_version();
        self.data
            .insert(key.to_string(), Versioned::new(value, version));
        trace!(target: "watchvault::storage", key, version, "set");
        Ok(version)
    }

    fn set_if_absent(&self, key: &str, value: String) -> Result<bool> {
        match self.data.entry(key.to_string()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                let version = self.next_version();
                slot.insert(Versioned::new(value, version));
                trace!(target: "watchvault::storage", key, version, "set_if_absent created");
                Ok(true)
            }
        }
    }

    fn compare_and_set(&self, key: &str, expected_version: u64, value: String) -> Result<u64> {
        let mut entry = self
            .data
            .get_mut(key)
            .ok_or_else(|| Error::VersionMismatch {
                key: key.to_string(),
                expected: expected_version,
                actual: None,
            })?;
        if entry.version != expected_version {
            return Err(Error::VersionMismatch {
                key: key.to_string(),
                expected: expected_version,
                actual: Some(entry.version),
            });
        }
        let version = self.next_version();
        *entry = Versioned::new(value, version);
        trace!(target: "watchvault::storage", key, version, "compare_and_set");
        Ok(version)
    }

    fn incr(&self, key: &str) -> Result<u64> {
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Versioned::new("0".to_string(), 0));
        let current: u64 = entry.value.parse().map_err(|_| {
            Error::InvalidInput(format!(
                "Cannot increment non-integer value for key '{}'",
                key
            ))
        })?;
        let next = current.checked_add(1).ok_or_else(|| {
            Error::InvalidInput(format!("Increment would overflow counter '{}'", key))
        })?;
        *entry = Versioned::new(next.to_string(), self.next_version());
        Ok(next)
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.data.iter().map(|e| e.key().clone()).collect())
    }
}
