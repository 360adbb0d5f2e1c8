//! Command enum defining all WatchVault operations.
//!
//! Commands are the "instruction set" of WatchVault. Every operation that can
//! be performed on the store is represented as a variant of this enum.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for transport layers
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};
use serde_json::Value;
use watchvault_core::WatchRecord;

use crate::types::*;

/// A command is a self-contained, serializable operation.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Root | 2 | Create or read a whole domain document |
/// | Child | 6 | Collections and providers inside a root |
/// | Watch | 5 | Watches nested under a child |
/// | Data | 3 | Flat key access |
/// | System | 1 | Health |
///
/// # Example
///
/// ```ignore
/// use watchvault_executor::{Command, DomainKind};
///
/// let cmd = Command::ReadChild {
///     domain: DomainKind::Collections,
///     key: "collection_1".into(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Root (2) ====================
    /// Create the domain's empty root document if missing.
    /// Returns: `Output::Created`
    CreateRoot {
        /// Target domain
        domain: DomainKind,
    },

    /// Read the whole domain document.
    /// Returns: `Output::Document`
    ReadRoot {
        /// Target domain
        domain: DomainKind,
    },

    // ==================== Child (6) ====================
    /// Create a collection for `owner`.
    /// Returns: `Output::Child`
    CreateCollection {
        /// Owning user
        owner: String,
    },

    /// Create a provider.
    /// Returns: `Output::Child`
    CreateProvider {
        /// Brand name
        #[serde(default, skip_serializing_if = "Option::is_none")]
        brand: Option<Value>,
        /// Website
        #[serde(default, skip_serializing_if = "Option::is_none")]
        website: Option<Value>,
        /// Country of origin
        #[serde(default, skip_serializing_if = "Option::is_none")]
        country_origin: Option<Value>,
    },

    /// Read one child.
    /// Returns: `Output::Child`
    ReadChild {
        /// Target domain
        domain: DomainKind,
        /// Child key (`collection_<n>` or `provider_<n>`)
        key: String,
    },

    /// List child keys in id order.
    /// Returns: `Output::Keys`
    ListChildren {
        /// Target domain
        domain: DomainKind,
    },

    /// Partially update a child.
    /// Returns: `Output::Patched`
    PatchChild {
        /// Target domain
        domain: DomainKind,
        /// Child key
        key: String,
        /// Field name to new value
        patch: Patch,
    },

    /// Delete a child.
    /// Returns: `Output::Unit`
    DeleteChild {
        /// Target domain
        domain: DomainKind,
        /// Child key
        key: String,
    },

    // ==================== Watch (5) ====================
    /// Append a watch to a child. Any `watchID` in `watch` is ignored;
    /// keys outside the watch schema fail decoding.
    /// Returns: `Output::Watch`
    AddWatch {
        /// Target domain
        domain: DomainKind,
        /// Parent child key
        parent: String,
        /// Watch fields
        watch: WatchRecord,
    },

    /// Read one watch.
    /// Returns: `Output::Watch`
    ReadWatch {
        /// Target domain
        domain: DomainKind,
        /// Parent child key
        parent: String,
        /// Watch id
        watch_id: u64,
    },

    /// List a child's watches in append order.
    /// Returns: `Output::Watches`
    ListWatches {
        /// Target domain
        domain: DomainKind,
        /// Parent child key
        parent: String,
    },

    /// Partially update a watch.
    /// Returns: `Output::Patched`
    PatchWatch {
        /// Target domain
        domain: DomainKind,
        /// Parent child key
        parent: String,
        /// Watch id
        watch_id: u64,
        /// Field name to new value
        patch: Patch,
    },

    /// Delete a watch.
    /// Returns: `Output::Unit`
    DeleteWatch {
        /// Target domain
        domain: DomainKind,
        /// Parent child key
        parent: String,
        /// Watch id
        watch_id: u64,
    },

    // ==================== Data (3) ====================
    /// Store a JSON value under a flat key.
    /// Returns: `Output::Version`
    DataPut {
        /// Key
        key: String,
        /// Value
        value: Value,
    },

    /// Read a JSON value from a flat key.
    /// Returns: `Output::Value`
    DataGet {
        /// Key
        key: String,
    },

    /// List every key in the backend.
    /// Returns: `Output::Keys`
    Keys,

    // ==================== System (1) ====================
    /// Health check.
    /// Returns: `Output::Pong`
    Ping,
}

impl Command {
    /// Returns true for commands that write to the backend.
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Command::CreateRoot { .. }
                | Command::CreateCollection { .. }
                | Command::CreateProvider { .. }
                | Command::PatchChild { .. }
                | Command::DeleteChild { .. }
                | Command::AddWatch { .. }
                | Command::PatchWatch { .. }
                | Command::DeleteWatch { .. }
                | Command::DataPut { .. }
        )
    }

    /// Returns the variant name as a static string.
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateRoot { .. } => "CreateRoot",
            Command::ReadRoot { .. } => "ReadRoot",
            Command::CreateCollection { .. } => "CreateCollection",
            Command::CreateProvider { .. } => "CreateProvider",
            Command::ReadChild { .. } => "ReadChild",
            Command::ListChildren { .. } => "ListChildren",
            Command::PatchChild { .. } => "PatchChild",
            Command::DeleteChild { .. } => "DeleteChild",
            Command::AddWatch { .. } => "AddWatch",
            Command::ReadWatch { .. } => "ReadWatch",
            Command::ListWatches { .. } => "ListWatches",
            Command::PatchWatch { .. } => "PatchWatch",
            Command::DeleteWatch { .. } => "DeleteWatch",
            Command::DataPut { .. } => "DataPut",
            Command::DataGet { .. } => "DataGet",
            Command::Keys => "Keys",
            Command::Ping => "Ping",
        }
    }
}
