//! AggregateStore: nested records emulated on a flat backend
//!
//! ## Design
//!
//! A whole domain lives under one backend key as a serialized
//! [`AggregateDocument`]. Every structural operation is the same cycle:
//!
//! 1. load the full document and the version it was written at
//! 2. apply one in-memory mutation
//! 3. write the full document back
//!
//! There is no per-child key. Children and nested watches are found by
//! loading the document and scanning it.
//!
//! ## Concurrency
//!
//! Under [`WriteMode::Optimistic`] step 3 is a compare-and-set on the version
//! from step 1. Losing the race re-runs steps 1–3 from a fresh read, so a
//! mutation is never applied to a stale copy; after `retry.max_retries`
//! losses the caller gets `Conflict`. The mutation closure may therefore run
//! more than once and must only touch the document it is given.
//!
//! Under [`WriteMode::Overwrite`] step 3 is an unconditional `SET`. Two
//! concurrent mutations of the same domain both start from the same read and
//! the later write discards the earlier one. This mode exists for parity with
//! deployments that relied on that behavior.
//!
//! Ids for new children and watches are allocated once, before the cycle, and
//! only after the target is known to exist. Retries reuse the same id.
//!
//! ## Root Policy
//!
//! Roots are never created implicitly. Every operation other than
//! `create_root` fails with `RootNotFound` until the root exists.

use std::marker::PhantomData;
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};
use watchvault_core::{
    apply_patch, child_key, parse_child_id, AggregateDocument, ChildRecord, Domain, Error, Patch,
    PatchReport, Patched, Result, Versioned, WatchRecord, WATCH_COUNTER,
};
use watchvault_storage::KvBackend;

use super::counter::CounterAllocator;
use crate::vault::{RetryConfig, WriteMode};

type Doc<D> = AggregateDocument<<D as Domain>::Record>;

/// Read-modify-write access to one domain's aggregate document.
///
/// Stateless facade over the backend; cheap to clone.
pub struct AggregateStore<D: Domain> {
    backend: Arc<dyn KvBackend>,
    counters: CounterAllocator,
    mode: WriteMode,
    retry: RetryConfig,
    _domain: PhantomData<fn() -> D>,
}

impl<D: Domain> Clone for AggregateStore<D> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            counters: self.counters.clone(),
            mode: self.mode,
            retry: self.retry.clone(),
            _domain: PhantomData,
        }
    }
}

impl<D: Domain> AggregateStore<D> {
    /// Create new AggregateStore instance
    pub fn new(backend: Arc<dyn KvBackend>, mode: WriteMode, retry: RetryConfig) -> Self {
        Self {
            counters: CounterAllocator::new(Arc::clone(&backend)),
            backend,
            mode,
            retry,
            _domain: PhantomData,
        }
    }

    /// Backend key of this domain's document
    pub fn root_key(&self) -> &'static str {
        D::ROOT_KEY
    }

    // ========== Root ==========

    /// Create the empty root document if it does not exist.
    ///
    /// Returns `true` if this call created it. An existing document is never
    /// touched.
    pub fn create_root(&self) -> Result<bool> {
        let created = self
            .backend
            .set_if_absent(D::ROOT_KEY, Doc::<D>::new().to_blob()?)?;
        if created {
            info!(target: "watchvault::aggregate", root = D::ROOT_KEY, "created root document");
        }
        Ok(created)
    }

    /// Load the full document.
    pub fn read_root(&self) -> Result<Doc<D>> {
        Ok(self.load()?.value)
    }

    /// Child keys, ordered by numeric id.
    pub fn list_children(&self) -> Result<Vec<String>> {
        let doc = self.read_root()?;
        let mut keys: Vec<String> = doc.keys().cloned().collect();
        keys.sort_by(|a, b| {
            let ia = parse_child_id(D::CHILD_PREFIX, a);
            let ib = parse_child_id(D::CHILD_PREFIX, b);
            ia.cmp(&ib).then_with(|| a.cmp(b))
        });
        Ok(keys)
    }

    // ========== Children ==========

    /// Add a child under a freshly allocated key.
    ///
    /// Any nested watches in `payload` are dropped; watches are only added
    /// through [`add_watch`](Self::add_watch). Returns the new key and the
    /// record as stored.
    pub fn create_child(&self, payload: D::Record) -> Result<(String, D::Record)> {
        // root must exist before an id is spent
        self.load()?;
        let id = self.counters.next_id(D::CHILD_COUNTER)?;
        let key = child_key(D::CHILD_PREFIX, id);

        let mut record = payload;
        record.watches_mut().clear();

        self.mutate(|doc| {
            if doc.contains(&key) {
                return Err(Error::corrupt(
                    D::ROOT_KEY,
                    format!(
                        "child {} already present; counter {} is behind the document",
                        key,
                        D::CHILD_COUNTER
                    ),
                ));
            }
            doc.insert(key.clone(), record.clone());
            Ok(())
        })?;

        info!(target: "watchvault::aggregate", root = D::ROOT_KEY, key = %key, "created child");
        Ok((key, record))
    }

    /// Read one child.
    pub fn read_child(&self, key: &str) -> Result<D::Record> {
        let mut doc = self.read_root()?;
        doc.remove(key).ok_or_else(|| Self::child_missing(key))
    }

    /// Apply a partial update to one child.
    ///
    /// Each patch entry is applied or rejected independently; rejected
    /// entries are listed in the report and do not stop the rest. The
    /// document is written back even if every entry was rejected.
    pub fn update_child(&self, key: &str, patch: &Patch) -> Result<Patched<D::Record>> {
        let patched = self.mutate(|doc| {
            let record = doc.get_mut(key).ok_or_else(|| Self::child_missing(key))?;
            let report = apply_patch(record, patch);
            Ok(Patched {
                record: record.clone(),
                report,
            })
        })?;
        Self::log_rejected(key, &patched.report);
        Ok(patched)
    }

    /// Remove one child and return it.
    pub fn delete_child(&self, key: &str) -> Result<D::Record> {
        let removed = self.mutate(|doc| doc.remove(key).ok_or_else(|| Self::child_missing(key)))?;
        info!(target: "watchvault::aggregate", root = D::ROOT_KEY, key, "deleted child");
        Ok(removed)
    }

    // ========== Nested watches ==========

    /// Append a watch to `parent`'s sequence under a fresh domain-wide id.
    ///
    /// A `watchID` in `payload` is ignored.
    pub fn add_watch(&self, parent: &str, payload: WatchRecord) -> Result<WatchRecord> {
        // parent must exist before an id is spent
        if !self.read_root()?.contains(parent) {
            return Err(Self::child_missing(parent));
        }
        let watch_id = self.counters.next_id(WATCH_COUNTER)?;
        let watch = WatchRecord { watch_id, ..payload };

        self.mutate(|doc| {
            let record = doc.get_mut(parent).ok_or_else(|| Self::child_missing(parent))?;
            record.watches_mut().push(watch.clone());
            Ok(())
        })?;

        debug!(
            target: "watchvault::aggregate",
            root = D::ROOT_KEY,
            parent,
            watch_id,
            "added watch"
        );
        Ok(watch)
    }

    /// Read one watch from `parent`.
    pub fn read_watch(&self, parent: &str, watch_id: u64) -> Result<WatchRecord> {
        let record = self.read_child(parent)?;
        record
            .find_watch(watch_id)
            .cloned()
            .ok_or_else(|| Self::watch_missing(parent, watch_id))
    }

    /// All watches of `parent`, in append order.
    pub fn list_watches(&self, parent: &str) -> Result<Vec<WatchRecord>> {
        let mut record = self.read_child(parent)?;
        Ok(std::mem::take(record.watches_mut()))
    }

    /// Apply a partial update to one watch of `parent`.
    ///
    /// Same per-field policy as [`update_child`](Self::update_child);
    /// `watchID` is reported as not patchable.
    pub fn update_watch(
        &self,
        parent: &str,
        watch_id: u64,
        patch: &Patch,
    ) -> Result<Patched<WatchRecord>> {
        let patched = self.mutate(|doc| {
            let record = doc.get_mut(parent).ok_or_else(|| Self::child_missing(parent))?;
            let watch = record
                .find_watch_mut(watch_id)
                .ok_or_else(|| Self::watch_missing(parent, watch_id))?;
            let report = apply_patch(watch, patch);
            Ok(Patched {
                record: watch.clone(),
                report,
            })
        })?;
        Self::log_rejected(parent, &patched.report);
        Ok(patched)
    }

    /// Remove one watch from `parent` and return it. Survivors keep their order.
    pub fn delete_watch(&self, parent: &str, watch_id: u64) -> Result<WatchRecord> {
        self.mutate(|doc| {
            let record = doc.get_mut(parent).ok_or_else(|| Self::child_missing(parent))?;
            record
                .remove_watch(watch_id)
                .ok_or_else(|| Self::watch_missing(parent, watch_id))
        })
    }

    // ========== Read-modify-write ==========

    fn load(&self) -> Result<Versioned<Doc<D>>> {
        let stored = self
            .backend
            .get(D::ROOT_KEY)?
            .ok_or_else(|| Error::RootNotFound {
                root: D::ROOT_KEY.to_string(),
            })?;
        let doc = AggregateDocument::from_blob(D::ROOT_KEY, &stored.value)?;
        Ok(Versioned::new(doc, stored.version))
    }

    fn persist(&self, read_version: u64, blob: String) -> Result<u64> {
        match self.mode {
            WriteMode::Optimistic => self
                .backend
                .compare_and_set(D::ROOT_KEY, read_version, blob),
            WriteMode::Overwrite => self.backend.set(D::ROOT_KEY, blob),
        }
    }

    /// Load, apply `f`, and write back, retrying from a fresh read when an
    /// optimistic write loses.
    fn mutate<T>(&self, mut f: impl FnMut(&mut Doc<D>) -> Result<T>) -> Result<T> {
        let mut attempt = 0;
        loop {
            let Versioned {
                value: mut doc,
                version,
            } = self.load()?;
            let out = f(&mut doc)?;

            match self.persist(version, doc.to_blob()?) {
                Ok(written) => {
                    debug!(
                        target: "watchvault::aggregate",
                        root = D::ROOT_KEY,
                        read_version = version,
                        written,
                        "persisted document"
                    );
                    return Ok(out);
                }
                Err(Error::VersionMismatch { actual, .. }) => {
                    attempt += 1;
                    if !self.retry.allows(attempt) {
                        warn!(
                            target: "watchvault::aggregate",
                            root = D::ROOT_KEY,
                            attempts = attempt,
                            "giving up on contended document"
                        );
                        return Err(Error::Conflict {
                            root: D::ROOT_KEY.to_string(),
                            attempts: attempt,
                        });
                    }
                    debug!(
                        target: "watchvault::aggregate",
                        root = D::ROOT_KEY,
                        read_version = version,
                        current = ?actual,
                        attempt,
                        "document changed underneath, retrying"
                    );
                    thread::sleep(self.retry.backoff(attempt));
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn child_missing(key: &str) -> Error {
        Error::ChildNotFound {
            root: D::ROOT_KEY.to_string(),
            key: key.to_string(),
        }
    }

    fn watch_missing(parent: &str, watch_id: u64) -> Error {
        Error::NestedNotFound {
            parent: parent.to_string(),
            watch_id,
        }
    }

    fn log_rejected(key: &str, report: &PatchReport) {
        for rejected in &report.rejected {
            warn!(
                target: "watchvault::aggregate",
                root = D::ROOT_KEY,
                key,
                field = %rejected.field,
                issue = %rejected.issue,
                "patch field rejected"
            );
        }
    }
}
