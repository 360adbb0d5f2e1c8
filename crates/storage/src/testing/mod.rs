//! Testing utilities for code built on a [`KvBackend`](crate::KvBackend)
//!
//! - **FaultyBackend**: wraps a real backend and injects outages or
//!   interleaved writes at chosen points
//!
//! # Example
//!
//! ```ignore
//! use watchvault_storage::testing::FaultyBackend;
//! use watchvault_storage::MemoryBackend;
//!
//! let backend = FaultyBackend::new(MemoryBackend::new());
//! backend.set_offline(true);
//! assert!(backend.keys().is_err());
//! ```

mod faulty;

pub use faulty::{FaultyBackend, WriteHook};
