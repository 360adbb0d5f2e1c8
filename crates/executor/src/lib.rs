//! # WatchVault Executor
//!
//! The public API for WatchVault: nested watch records on a flat key-value
//! store.
//!
//! This is the only crate users need to import. It provides:
//! - [`Vault`] - The shared handle over a backend, with typed stores
//! - [`Command`]/[`Output`] - Serializable command interface for transports
//! - [`Executor`] - Dispatches commands against a vault
//!
//! ## Quick Start
//!
//! ```text
//! use watchvault_executor::{Command, DomainKind, Executor, Vault};
//!
//! let executor = Executor::new(Vault::in_memory()?);
//! executor.execute(Command::CreateRoot { domain: DomainKind::Collections })?;
//!
//! let out = executor.execute(Command::CreateCollection { owner: "alice".into() })?;
//! // Output::Child { key: "collection_1", .. }
//! ```
//!
//! ## Domains
//!
//! | Domain | Root key | Child keys | Nested sequence |
//! |--------|----------|------------|-----------------|
//! | **Collections** | `Collections` | `collection_<n>` | `watches` |
//! | **Providers** | `Providers` | `provider_<n>` | `stockWatches` |
//!
//! Watch ids come from one counter shared by both domains.

#![warn(missing_docs)]

mod command;
mod convert;
mod error;
mod executor;
mod output;
mod types;

// Handler modules
mod handlers;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use command::Command;
pub use error::Error;
pub use executor::{Executor, Response};
pub use output::Output;
pub use types::*;

// Records and field reports, so users don't need watchvault-core directly
pub use watchvault_core::{
    CollectionRecord, FieldIssue, InvalidField, ProviderRecord, WatchField, WatchRecord,
};

// Engine handle and configuration, so users don't need watchvault-engine directly
pub use watchvault_engine::{RetryConfig, Vault, VaultConfig, WriteMode};

// Backends
pub use watchvault_storage::{KvBackend, MemoryBackend};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
