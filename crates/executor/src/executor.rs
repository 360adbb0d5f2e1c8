//! The Executor - single entry point to WatchVault's engine.
//!
//! The Executor is a stateless dispatcher that routes commands to the
//! appropriate store operations and converts results to outputs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use watchvault_core::{CollectionRecord, Collections, DomainKind, ProviderRecord, Providers};
use watchvault_engine::Vault;

use crate::handlers::{aggregate, data};
use crate::{Command, Error, Output, Result};

/// Run an aggregate handler for the command's domain.
macro_rules! per_domain {
    ($domain:expr, $handler:ident ( $($arg:expr),* $(,)? )) => {
        match $domain {
            DomainKind::Collections => aggregate::$handler::<Collections>($($arg),*),
            DomainKind::Providers => aggregate::$handler::<Providers>($($arg),*),
        }
    };
}

/// Envelope for transports that want one JSON shape for success and failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// True when the command succeeded
    pub ok: bool,
    /// Error code, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Error message, absent on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Command output, absent on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Output>,
}

impl From<Result<Output>> for Response {
    fn from(result: Result<Output>) -> Self {
        match result {
            Ok(output) => Response {
                ok: true,
                code: None,
                message: None,
                output: Some(output),
            },
            Err(e) => Response {
                ok: false,
                code: Some(e.code().to_string()),
                message: Some(e.to_string()),
                output: None,
            },
        }
    }
}

/// The command executor - single entry point to WatchVault's engine.
///
/// The Executor is **stateless**: it holds a reference to the vault but
/// maintains no state of its own. All state lives in the backend.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads.
///
/// # Example
///
/// ```ignore
/// use watchvault_executor::{Command, DomainKind, Executor, Vault};
///
/// let executor = Executor::new(Vault::in_memory()?);
///
/// executor.execute(Command::CreateRoot { domain: DomainKind::Collections })?;
/// let created = executor.execute(Command::CreateCollection { owner: "alice".into() })?;
/// ```
pub struct Executor {
    vault: Arc<Vault>,
}

impl Executor {
    /// Create a new executor wrapping a vault.
    pub fn new(vault: Arc<Vault>) -> Self {
        Self { vault }
    }

    /// Execute a single command.
    ///
    /// Returns the command result or an error.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        let name = cmd.name();
        debug!(target: "watchvault::executor", command = name, write = cmd.is_write(), "execute");

        let result = self.dispatch(cmd);
        if let Err(e) = &result {
            if matches!(e, Error::Conflict { .. }) {
                warn!(
                    target: "watchvault::executor",
                    command = name,
                    error = %e,
                    "command lost to concurrent writers"
                );
            } else {
                debug!(
                    target: "watchvault::executor",
                    command = name,
                    code = e.code(),
                    error = %e,
                    "command failed"
                );
            }
        }
        result
    }

    fn dispatch(&self, cmd: Command) -> Result<Output> {
        let vault = self.vault.as_ref();
        match cmd {
            // Root commands
            Command::CreateRoot { domain } => per_domain!(domain, create_root(vault)),
            Command::ReadRoot { domain } => per_domain!(domain, read_root(vault)),

            // Child commands
            Command::CreateCollection { owner } => aggregate::create_child::<Collections>(
                vault,
                CollectionRecord::new(owner),
            ),
            Command::CreateProvider {
                brand,
                website,
                country_origin,
            } => aggregate::create_child::<Providers>(
                vault,
                ProviderRecord {
                    brand,
                    website,
                    country_origin,
                    stock_watches: Vec::new(),
                },
            ),
            Command::ReadChild { domain, key } => per_domain!(domain, read_child(vault, key)),
            Command::ListChildren { domain } => per_domain!(domain, list_children(vault)),
            Command::PatchChild { domain, key, patch } => {
                per_domain!(domain, patch_child(vault, key, patch))
            }
            Command::DeleteChild { domain, key } => per_domain!(domain, delete_child(vault, key)),

            // Watch commands
            Command::AddWatch {
                domain,
                parent,
                watch,
            } => per_domain!(domain, add_watch(vault, parent, watch)),
            Command::ReadWatch {
                domain,
                parent,
                watch_id,
            } => per_domain!(domain, read_watch(vault, parent, watch_id)),
            Command::ListWatches { domain, parent } => {
                per_domain!(domain, list_watches(vault, parent))
            }
            Command::PatchWatch {
                domain,
                parent,
                watch_id,
                patch,
            } => per_domain!(domain, patch_watch(vault, parent, watch_id, patch)),
            Command::DeleteWatch {
                domain,
                parent,
                watch_id,
            } => per_domain!(domain, delete_watch(vault, parent, watch_id)),

            // Data commands
            Command::DataPut { key, value } => data::data_put(vault, key, value),
            Command::DataGet { key } => data::data_get(vault, key),
            Command::Keys => data::keys(vault),

            // System commands
            Command::Ping => Ok(Output::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            }),
        }
    }

    /// Execute multiple commands sequentially.
    ///
    /// Returns all results in the same order as the input commands.
    /// Execution continues even if some commands fail.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Execute a command and wrap the outcome in a [`Response`] envelope.
    pub fn respond(&self, cmd: Command) -> Response {
        self.execute(cmd).into()
    }

    /// Get a reference to the underlying vault.
    pub fn vault(&self) -> &Arc<Vault> {
        &self.vault
    }
}
