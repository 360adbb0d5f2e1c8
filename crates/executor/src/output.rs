//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is deterministic:
//! the same command always produces the same output variant (though the values
//! may differ based on stored state).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use watchvault_core::WatchRecord;

use crate::types::*;

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output` variant.
///
/// # Example
///
/// ```text
/// use watchvault_executor::{Command, Output, Executor};
///
/// match executor.execute(Command::ReadChild { domain, key })? {
///     Output::Child { key, record } => println!("{}: {:?}", key, record),
///     _ => unreachable!("ReadChild always returns Child"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    // ==================== Primitive Results ====================
    /// No return value (deletes)
    Unit,

    /// Whether a root document was created by this call
    Created(bool),

    /// Backend version assigned to a flat write
    Version(u64),

    /// A flat JSON value
    Value(Value),

    /// Key list (children or backend keys)
    Keys(Vec<String>),

    // ==================== Aggregate Results ====================
    /// A whole domain document
    Document(DocumentView),

    /// One child with its key
    Child {
        /// Child key
        key: String,
        /// Stored record
        record: Record,
    },

    /// One watch
    Watch(WatchRecord),

    /// Watches in append order
    Watches(Vec<WatchRecord>),

    /// A record after a partial update, with what happened to each field
    Patched {
        /// The patched record as stored
        target: PatchedRecord,
        /// Applied and rejected field names
        report: PatchReport,
    },

    // ==================== System ====================
    /// Health check response
    Pong {
        /// Crate version
        version: String,
    },
}
