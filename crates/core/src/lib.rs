//! Core types for WatchVault
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: Error type hierarchy
//! - Versioned: a stored value paired with the backend version that wrote it
//! - Domain: the two aggregate domains (Collections, Providers) and their keys
//! - Records: WatchRecord, CollectionRecord, ProviderRecord
//! - Schema: static per-record field tables consulted by partial updates
//! - AggregateDocument: a whole domain serialized under one root key
//! - Limits: key validation shared by every entry point

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod document;
pub mod error;
pub mod limits;
pub mod records;
pub mod schema;
pub mod types;

pub use document::AggregateDocument;
pub use error::{Error, Result};
pub use limits::{validate_key, MAX_KEY_BYTES};
pub use records::{ChildRecord, CollectionRecord, ProviderRecord, WatchRecord};
pub use schema::{
    apply_patch, CollectionField, FieldIssue, FieldSchema, InvalidField, Patch, Patchable,
    PatchReport, Patched, ProviderField, WatchField,
};
pub use types::{
    child_key, is_reserved_key, parse_child_id, Collections, Domain, DomainKind, Providers,
    Versioned, RESERVED_KEYS, WATCH_COUNTER,
};
