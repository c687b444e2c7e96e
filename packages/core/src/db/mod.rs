//! Persistence Layer
//!
//! - [`flat_store`] - `flatten` / `reload`: unordered key-addressable records
//!   to and from the depth-first sequence
//! - [`snapshot_store`] - async storage interface for snapshots, with in-memory
//!   and JSON file implementations

pub mod flat_store;
pub mod snapshot_store;

pub use flat_store::{flatten, reload, FlatStore, MemoryStore, NodeStore};
pub use snapshot_store::{InMemorySnapshotStore, JsonFileSnapshotStore, Snapshot, SnapshotStore};
