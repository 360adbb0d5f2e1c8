//! Primitives layer for WatchVault
//!
//! Stateless facades over a shared `Arc<dyn KvBackend>`:
//! - **CounterAllocator**: monotonic ids from atomic increments
//! - **AggregateStore**: nested records inside one document per domain
//! - **FlatStore**: JSON values under caller-chosen keys
//!
//! Each facade holds only the backend handle and its settings. Any number of
//! instances over the same backend can be used concurrently; coordination
//! happens in the backend (increments and versioned writes), never in
//! process-local state.

pub mod aggregate;
pub mod counter;
pub mod flat;

pub use aggregate::AggregateStore;
pub use counter::CounterAllocator;
pub use flat::FlatStore;
