//! Supporting types for commands and outputs.
//!
//! Records reach the caller tagged with their domain, so one `Output` shape
//! covers both aggregates.

use serde::{Deserialize, Serialize};
use watchvault_core::{AggregateDocument, CollectionRecord, ProviderRecord, WatchRecord};

pub use watchvault_core::{DomainKind, Patch, PatchReport};

// =============================================================================
// Record Types
// =============================================================================

/// A child record from either domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Record {
    /// A user's collection
    Collection(CollectionRecord),
    /// A provider and its stock
    Provider(ProviderRecord),
}

impl Record {
    /// Domain the record belongs to
    pub fn domain(&self) -> DomainKind {
        match self {
            Record::Collection(_) => DomainKind::Collections,
            Record::Provider(_) => DomainKind::Providers,
        }
    }

    /// Nested watches of the record
    pub fn watches(&self) -> &[WatchRecord] {
        match self {
            Record::Collection(c) => &c.watches,
            Record::Provider(p) => &p.stock_watches,
        }
    }
}

/// A whole aggregate document from either domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DocumentView {
    /// The `Collections` root
    Collections(AggregateDocument<CollectionRecord>),
    /// The `Providers` root
    Providers(AggregateDocument<ProviderRecord>),
}

impl DocumentView {
    /// Number of children in the document
    pub fn len(&self) -> usize {
        match self {
            DocumentView::Collections(d) => d.len(),
            DocumentView::Providers(d) => d.len(),
        }
    }

    /// True when the document has no children
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of a partial update: the record as stored plus the per-field report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatchedRecord {
    /// A patched child
    Child {
        /// Child key
        key: String,
        /// Record after the patch
        record: Record,
    },
    /// A patched nested watch
    Watch {
        /// Parent child key
        parent: String,
        /// Watch after the patch
        watch: WatchRecord,
    },
}
