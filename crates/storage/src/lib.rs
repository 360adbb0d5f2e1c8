//! Storage layer for WatchVault
//!
//! This crate defines the backend seam and its implementations:
//! - KvBackend: the flat GET/SET/INCR/KEYS surface the engine consumes
//! - MemoryBackend: DashMap-backed store with per-key versions
//! - testing::FaultyBackend: fault injection for failure-path tests
//!
//! The engine never sees more than strings under string keys. Anything
//! structured is serialized above this layer.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod memory;
pub mod testing;

pub use backend::KvBackend;
pub use memory::MemoryBackend;
