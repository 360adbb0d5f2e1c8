//! CounterAllocator: identifiers for new records
//!
//! ## Design
//!
//! Each named counter is one integer key in the backend. `next_id` is a single
//! backend increment that treats an absent counter as zero, so there is no
//! separate initialize step and no window in which two first-time callers
//! could both start from zero.
//!
//! Counters are domain-wide and only move forward. Deleting a record never
//! returns its id to the pool.

use std::sync::Arc;
use tracing::debug;
use watchvault_core::{Error, Result};
use watchvault_storage::KvBackend;

/// Monotonic id source backed by the store's atomic increment.
#[derive(Clone)]
pub struct CounterAllocator {
    backend: Arc<dyn KvBackend>,
}

impl CounterAllocator {
    /// Create new CounterAllocator instance
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self { backend }
    }

    /// Allocate the next id from `counter`.
    ///
    /// The first id from a fresh counter is `1`.
    pub fn next_id(&self, counter: &str) -> Result<u64> {
        let id = self.backend.incr(counter)?;
        debug!(target: "watchvault::counter", counter, id, "allocated id");
        Ok(id)
    }

    /// Last id handed out by `counter`, or `0` if it has never been used.
    pub fn current(&self, counter: &str) -> Result<u64> {
        match self.backend.get(counter)? {
            Some(stored) => stored
                .value
                .parse()
                .map_err(|e| Error::corrupt(counter, e)),
            None => Ok(0),
        }
    }
}
