//! WatchVault - nested watch records on a flat key-value store
//!
//! WatchVault keeps two domains, user **Collections** and **Providers** with
//! their stock, each as one JSON document under one backend key. Watches are
//! nested inside collections and providers and carry ids from a shared
//! counter.
//!
//! # Quick Start
//!
//! ```ignore
//! use watchvault::{Command, DomainKind, Executor, Vault};
//!
//! let executor = Executor::new(Vault::in_memory()?);
//! executor.execute(Command::CreateRoot { domain: DomainKind::Collections })?;
//! executor.execute(Command::CreateCollection { owner: "alice".into() })?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which provides a command-based
//! API. The [`Vault`] handle gives typed access to the same stores.
//!
//! Internal crates (core, storage, engine) are not exposed beyond what the
//! executor re-exports.

// Re-export the public API from watchvault-executor
pub use watchvault_executor::*;
