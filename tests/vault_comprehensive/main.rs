//! WatchVault Comprehensive Test Suite
//!
//! Exercises the public facade end to end: commands in, outputs out, over
//! an in-memory backend.
//!
//! ## Modules
//!
//! - `lifecycle`: root/child/watch lifecycles in both domains
//! - `wire`: commands and responses as raw JSON, the way a transport sends them
//! - `config`: opening a vault from `watchvault.toml`
//! - `concurrency`: many executors on one vault
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test vault_comprehensive
//! cargo test --test vault_comprehensive concurrency::
//! ```

use std::sync::Arc;

use watchvault::{Command, DomainKind, Executor, Output, Vault};

pub mod concurrency;
pub mod config;
pub mod lifecycle;
pub mod wire;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Executor over a fresh in-memory vault with both roots created
pub fn quick_setup() -> (Arc<Vault>, Executor) {
    let vault = Vault::in_memory().expect("Failed to open in-memory vault");
    let executor = Executor::new(Arc::clone(&vault));
    for domain in [DomainKind::Collections, DomainKind::Providers] {
        executor
            .execute(Command::CreateRoot { domain })
            .expect("Failed to create root");
    }
    (vault, executor)
}

/// Key of a freshly created child
pub fn child_key(output: Output) -> String {
    match output {
        Output::Child { key, .. } => key,
        other => panic!("Expected Child output, got {:?}", other),
    }
}

/// Build a patch from a JSON object literal
pub fn patch(v: serde_json::Value) -> watchvault::Patch {
    v.as_object().cloned().expect("patch must be a JSON object")
}
