//! Fault-injecting backend wrapper
//!
//! Used to drive the engine through the failure paths a real networked
//! backend produces: calls that fail outright, and writes from another
//! client landing between a read and the write that follows it.

use parking_lot::Mutex;
use tracing::debug;
use watchvault_core::{Error, Result, Versioned};

use crate::backend::KvBackend;

/// Callback run against the wrapped backend just before a write.
pub type WriteHook<B> = Box<dyn FnOnce(&B) + Send>;

struct FaultState<B> {
    offline: bool,
    fail_next: usize,
    before_write: Option<WriteHook<B>>,
    writes: usize,
}

/// Backend wrapper with switchable faults.
///
/// - `set_offline(true)`: every call fails with `BackendUnavailable`
/// - `fail_next(n)`: the next `n` calls fail, then service resumes
/// - `before_next_write(hook)`: the next `set` or `compare_and_set` first runs
///   `hook` against the inner backend, simulating a concurrent client
pub struct FaultyBackend<B> {
    inner: B,
    state: Mutex<FaultState<B>>,
}

impl<B: KvBackend> FaultyBackend<B> {
    /// Wrap `inner` with no faults armed
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            state: Mutex::new(FaultState {
                offline: false,
                fail_next: 0,
                before_write: None,
                writes: 0,
            }),
        }
    }

    /// The wrapped backend, bypassing fault injection
    pub fn inner(&self) -> &B {
        &self.inner
    }

    /// Take the backend down or bring it back
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// Fail the next `n` calls
    pub fn fail_next(&self, n: usize) {
        self.state.lock().fail_next = n;
    }

    /// Run `hook` against the inner backend before the next document write
    pub fn before_next_write(&self, hook: impl FnOnce(&B) + Send + 'static) {
        self.state.lock().before_write = Some(Box::new(hook));
    }

    /// Number of `set`/`compare_and_set` calls that reached the inner backend
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    fn check(&self, op: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.offline {
            return Err(Error::BackendUnavailable(format!("{}: backend offline", op)));
        }
        if state.fail_next > 0 {
            state.fail_next -= 1;
            return Err(Error::BackendUnavailable(format!("{}: injected failure", op)));
        }
        Ok(())
    }

    fn before_write(&self, op: &str) -> Result<()> {
        self.check(op)?;
        let hook = {
            let mut state = self.state.lock();
            state.writes += 1;
            state.before_write.take()
        };
        if let Some(hook) = hook {
            debug!(target: "watchvault::testing", op, "running interleaved write hook");
            hook(&self.inner);
        }
        Ok(())
    }
}

impl<B: KvBackend> KvBackend for FaultyBackend<B> {
    fn get(&self, key: &str) -> Result<Option<Versioned<String>>> {
        self.check("get")?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<u64> {
        self.before_write("set")?;
        self.inner.set(key, value)
    }

    fn set_if_absent(&self, key: &str, value: String) -> Result<bool> {
        self.check("set_if_absent")?;
        self.inner.set_if_absent(key, value)
    }

    fn compare_and_set(&self, key: &str, expected_version: u64, value: String) -> Result<u64> {
        self.before_write("compare_and_set")?;
        self.inner.compare_and_set(key, expected_version, value)
    }

    fn incr(&self, key: &str) -> Result<u64> {
        self.check("incr")?;
        self.inner.incr(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.check("keys")?;
        self.inner.keys()
    }
}
