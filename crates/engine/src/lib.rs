//! Storage engine for WatchVault
//!
//! This crate turns a flat key-value backend into a store of nested records:
//! - Vault: the shared handle, opened over a backend with a `VaultConfig`
//! - AggregateStore: one JSON document per domain, mutated by
//!   load/modify/write cycles with optimistic versioned writes
//! - CounterAllocator: ids from atomic increments
//! - FlatStore: plain keys for everything else
//!
//! Backends live in `watchvault-storage`; records and errors in
//! `watchvault-core`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod primitives;
pub mod vault;

pub use primitives::{AggregateStore, CounterAllocator, FlatStore};
pub use vault::{RetryConfig, Vault, VaultConfig, WriteMode, CONFIG_FILE_NAME};
