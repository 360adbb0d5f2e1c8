//! Domain keys, counter names, and versioned values
//!
//! Each aggregate domain is described by a zero-sized marker type implementing
//! [`Domain`]. The marker ties together the root key the whole document lives
//! under, the prefix and counter used to mint child keys, and the record type
//! stored for each child.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::records::{ChildRecord, CollectionRecord, ProviderRecord};

/// Counter shared by watches and stock watches across every parent.
pub const WATCH_COUNTER: &str = "watchID_counter";

/// A value read from the backend together with the version that wrote it.
///
/// Versions are assigned by the backend and strictly increase across all
/// writes, so a reader can hand the version back for compare-and-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Stored value
    pub value: T,
    /// Backend write version
    pub version: u64,
}

impl<T> Versioned<T> {
    /// Pair a value with its version
    pub fn new(value: T, version: u64) -> Self {
        Self { value, version }
    }
}

/// Static description of one aggregate domain.
pub trait Domain: Send + Sync + 'static {
    /// Record stored for each child
    type Record: ChildRecord;

    /// Backend key the whole document is stored under
    const ROOT_KEY: &'static str;

    /// Prefix of generated child keys (`"<prefix>_<id>"`)
    const CHILD_PREFIX: &'static str;

    /// Counter that mints child identifiers
    const CHILD_COUNTER: &'static str;

    /// Runtime tag for this domain
    const KIND: DomainKind;
}

/// Watch collections owned by users.
#[derive(Debug, Clone, Copy)]
pub struct Collections;

impl Domain for Collections {
    type Record = CollectionRecord;
    const ROOT_KEY: &'static str = "Collections";
    const CHILD_PREFIX: &'static str = "collection";
    const CHILD_COUNTER: &'static str = "collectionID_counter";
    const KIND: DomainKind = DomainKind::Collections;
}

/// Watch providers and their stock.
#[derive(Debug, Clone, Copy)]
pub struct Providers;

impl Domain for Providers {
    type Record = ProviderRecord;
    const ROOT_KEY: &'static str = "Providers";
    const CHILD_PREFIX: &'static str = "provider";
    const CHILD_COUNTER: &'static str = "provider_counter";
    const KIND: DomainKind = DomainKind::Providers;
}

/// Serializable tag naming a domain in commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainKind {
    /// See [`Collections`]
    Collections,
    /// See [`Providers`]
    Providers,
}

impl DomainKind {
    /// Root key of the domain's aggregate document
    pub fn root_key(self) -> &'static str {
        match self {
            DomainKind::Collections => Collections::ROOT_KEY,
            DomainKind::Providers => Providers::ROOT_KEY,
        }
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_key())
    }
}

/// Keys written only by the aggregate stores and the counter allocator.
pub const RESERVED_KEYS: [&str; 5] = [
    Collections::ROOT_KEY,
    Collections::CHILD_COUNTER,
    Providers::ROOT_KEY,
    Providers::CHILD_COUNTER,
    WATCH_COUNTER,
];

/// True for a root document key or an id counter.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Build a child key from its prefix and allocated id.
pub fn child_key(prefix: &str, id: u64) -> String {
    format!("{}_{}", prefix, id)
}

/// Extract the numeric id from a child key with the given prefix.
///
/// Returns `None` when the key does not have the `"<prefix>_<digits>"` shape.
pub fn parse_child_id(prefix: &str, key: &str) -> Option<u64> {
    key.strip_prefix(prefix)?.strip_prefix('_')?.parse().ok()
}
