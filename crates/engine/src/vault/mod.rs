//! Vault handle and open logic
//!
//! A `Vault` is the one long-lived object an application holds. It owns the
//! shared backend handle and the parsed configuration, and hands out the
//! per-domain stores built on top of them. Every store is a stateless facade,
//! so the handle can be shared freely across threads.
//!
//! | Constructor | Config source | Backend |
//! |-------------|---------------|---------|
//! | `open(backend, cfg)` | caller | caller |
//! | `open_with_config_file(backend, path)` | `watchvault.toml`, created with defaults if missing | caller |
//! | `in_memory()` | defaults | fresh `MemoryBackend` |

pub mod config;

pub use config::{RetryConfig, VaultConfig, WriteMode, CONFIG_FILE_NAME};

use std::path::Path;
use std::sync::Arc;
use tracing::info;
use watchvault_core::{Collections, Providers, Result};
use watchvault_storage::{KvBackend, MemoryBackend};

use crate::primitives::{AggregateStore, CounterAllocator, FlatStore};

/// Shared entry point to the stored domains.
pub struct Vault {
    backend: Arc<dyn KvBackend>,
    config: VaultConfig,
    collections: AggregateStore<Collections>,
    providers: AggregateStore<Providers>,
    counters: CounterAllocator,
    flat: FlatStore,
}

impl Vault {
    /// Open a vault over `backend` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Fails if `cfg.write_mode` is not a known mode. The backend is not
    /// contacted.
    pub fn open(backend: Arc<dyn KvBackend>, cfg: VaultConfig) -> Result<Arc<Self>> {
        let mode = cfg.write_mode()?;
        info!(
            target: "watchvault::vault",
            write_mode = %cfg.write_mode,
            max_retries = cfg.retry.max_retries,
            "opening vault"
        );
        Ok(Arc::new(Self {
            collections: AggregateStore::new(Arc::clone(&backend), mode, cfg.retry.clone()),
            providers: AggregateStore::new(Arc::clone(&backend), mode, cfg.retry.clone()),
            counters: CounterAllocator::new(Arc::clone(&backend)),
            flat: FlatStore::new(Arc::clone(&backend)),
            backend,
            config: cfg,
        }))
    }

    /// Open a vault over `backend`, reading settings from the TOML file at
    /// `path`. A default file is written first if none exists.
    pub fn open_with_config_file(
        backend: Arc<dyn KvBackend>,
        path: impl AsRef<Path>,
    ) -> Result<Arc<Self>> {
        let path = path.as_ref();
        VaultConfig::write_default_if_missing(path)?;
        let cfg = VaultConfig::from_file(path)?;
        Self::open(backend, cfg)
    }

    /// A vault over a fresh in-memory backend with default settings.
    pub fn in_memory() -> Result<Arc<Self>> {
        Self::open(Arc::new(MemoryBackend::new()), VaultConfig::default())
    }

    /// The `Collections` aggregate
    pub fn collections(&self) -> &AggregateStore<Collections> {
        &self.collections
    }

    /// The `Providers` aggregate
    pub fn providers(&self) -> &AggregateStore<Providers> {
        &self.providers
    }

    /// Id counters
    pub fn counters(&self) -> &CounterAllocator {
        &self.counters
    }

    /// Flat key access
    pub fn flat(&self) -> &FlatStore {
        &self.flat
    }

    /// The shared backend handle
    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.backend
    }

    /// Configuration the vault was opened with
    pub fn config(&self) -> &VaultConfig {
        &self.config
    }
}
