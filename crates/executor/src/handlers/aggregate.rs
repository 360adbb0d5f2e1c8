//! Aggregate command handlers.
//!
//! Every handler is generic over the domain; `Executor` picks the concrete
//! domain from the command's `DomainKind`. `DomainOutput` supplies the two
//! domain-specific pieces: which store to use and how to tag its records.

use tracing::debug;
use watchvault_core::{
    AggregateDocument, CollectionRecord, Collections, Domain, Patch, ProviderRecord, Providers,
    WatchRecord,
};
use watchvault_engine::{AggregateStore, Vault};

use crate::convert::convert_result;
use crate::types::{DocumentView, PatchedRecord, Record};
use crate::{Output, Result};

/// Glue between a domain and the executor's output types.
pub trait DomainOutput: Domain + Sized {
    /// The domain's store on `vault`
    fn store(vault: &Vault) -> &AggregateStore<Self>;

    /// Tag a record with its domain
    fn record(record: Self::Record) -> Record;

    /// Tag a whole document with its domain
    fn document(doc: AggregateDocument<Self::Record>) -> DocumentView;
}

impl DomainOutput for Collections {
    fn store(vault: &Vault) -> &AggregateStore<Self> {
        vault.collections()
    }

    fn record(record: CollectionRecord) -> Record {
        Record::Collection(record)
    }

    fn document(doc: AggregateDocument<CollectionRecord>) -> DocumentView {
        DocumentView::Collections(doc)
    }
}

impl DomainOutput for Providers {
    fn store(vault: &Vault) -> &AggregateStore<Self> {
        vault.providers()
    }

    fn record(record: ProviderRecord) -> Record {
        Record::Provider(record)
    }

    fn document(doc: AggregateDocument<ProviderRecord>) -> DocumentView {
        DocumentView::Providers(doc)
    }
}

// =============================================================================
// Root
// =============================================================================

/// Handle CreateRoot command.
pub fn create_root<D: DomainOutput>(vault: &Vault) -> Result<Output> {
    let created = convert_result(D::store(vault).create_root())?;
    Ok(Output::Created(created))
}

/// Handle ReadRoot command.
pub fn read_root<D: DomainOutput>(vault: &Vault) -> Result<Output> {
    let doc = convert_result(D::store(vault).read_root())?;
    Ok(Output::Document(D::document(doc)))
}

// =============================================================================
// Children
// =============================================================================

/// Handle CreateCollection and CreateProvider commands.
pub fn create_child<D: DomainOutput>(vault: &Vault, payload: D::Record) -> Result<Output> {
    let (key, record) = convert_result(D::store(vault).create_child(payload))?;
    Ok(Output::Child {
        key,
        record: D::record(record),
    })
}

/// Handle ReadChild command.
pub fn read_child<D: DomainOutput>(vault: &Vault, key: String) -> Result<Output> {
    let record = convert_result(D::store(vault).read_child(&key))?;
    Ok(Output::Child {
        key,
        record: D::record(record),
    })
}

/// Handle ListChildren command.
pub fn list_children<D: DomainOutput>(vault: &Vault) -> Result<Output> {
    Ok(Output::Keys(convert_result(D::store(vault).list_children())?))
}

/// Handle PatchChild command.
pub fn patch_child<D: DomainOutput>(vault: &Vault, key: String, patch: Patch) -> Result<Output> {
    let patched = convert_result(D::store(vault).update_child(&key, &patch))?;
    debug!(
        target: "watchvault::executor",
        root = D::ROOT_KEY,
        key = %key,
        applied = patched.report.applied.len(),
        rejected = patched.report.rejected.len(),
        "patched child"
    );
    Ok(Output::Patched {
        target: PatchedRecord::Child {
            key,
            record: D::record(patched.record),
        },
        report: patched.report,
    })
}

/// Handle DeleteChild command.
pub fn delete_child<D: DomainOutput>(vault: &Vault, key: String) -> Result<Output> {
    convert_result(D::store(vault).delete_child(&key))?;
    Ok(Output::Unit)
}

// =============================================================================
// Watches
// =============================================================================

/// Handle AddWatch command.
pub fn add_watch<D: DomainOutput>(
    vault: &Vault,
    parent: String,
    watch: WatchRecord,
) -> Result<Output> {
    let watch = convert_result(D::store(vault).add_watch(&parent, watch))?;
    Ok(Output::Watch(watch))
}

/// Handle ReadWatch command.
pub fn read_watch<D: DomainOutput>(vault: &Vault, parent: String, watch_id: u64) -> Result<Output> {
    let watch = convert_result(D::store(vault).read_watch(&parent, watch_id))?;
    Ok(Output::Watch(watch))
}

/// Handle ListWatches command.
pub fn list_watches<D: DomainOutput>(vault: &Vault, parent: String) -> Result<Output> {
    Ok(Output::Watches(convert_result(
        D::store(vault).list_watches(&parent),
    )?))
}

/// Handle PatchWatch command.
pub fn patch_watch<D: DomainOutput>(
    vault: &Vault,
    parent: String,
    watch_id: u64,
    patch: Patch,
) -> Result<Output> {
    let patched = convert_result(D::store(vault).update_watch(&parent, watch_id, &patch))?;
    Ok(Output::Patched {
        target: PatchedRecord::Watch {
            parent,
            watch: patched.record,
        },
        report: patched.report,
    })
}

/// Handle DeleteWatch command.
pub fn delete_watch<D: DomainOutput>(
    vault: &Vault,
    parent: String,
    watch_id: u64,
) -> Result<Output> {
    convert_result(D::store(vault).delete_watch(&parent, watch_id))?;
    Ok(Output::Unit)
}
