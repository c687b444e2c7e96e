//! Snapshot persistence
//!
//! A [`Snapshot`] is what the persistence collaborator reads and writes: the
//! flattened records of a document plus its root key. Saving happens after an
//! operation has returned, against an immutable snapshot, so a slow store
//! never blocks or alters the in-memory document.
//!
//! # Examples
//!
//! ```rust
//! use outline_core::db::{InMemorySnapshotStore, Snapshot, SnapshotStore};
//! use outline_core::models::Document;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = InMemorySnapshotStore::new();
//!     store.save(Snapshot::capture(&Document::empty_slate())).await?;
//!
//!     let loaded = store.load().await?.expect("saved above");
//!     assert_eq!(loaded.records.len(), 2);
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::db::flat_store::{flatten, reload, FlatStore, MemoryStore};
use crate::models::{Document, Node, NodeKey};
use crate::operations::Result;

/// Persisted form of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub root_key: NodeKey,
    pub records: FlatStore,
}

impl Snapshot {
    /// Flatten a document for storage
    pub fn capture(doc: &Document) -> Self {
        Self {
            root_key: doc.root_key().to_string(),
            records: flatten(doc.nodes()),
        }
    }

    /// Rebuild the ordered sequence from the records. Cache fields are
    /// recomputed; run the result through the sanitizer for untrusted data.
    pub fn restore(&self) -> Result<Vec<Node>> {
        reload(&MemoryStore::new(self.records.clone()), &self.root_key)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Storage backend for snapshots
///
/// Implementations must be `Send + Sync` so a save can run on another task
/// while the editor keeps dispatching.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Replace the stored snapshot
    async fn save(&self, snapshot: Snapshot) -> anyhow::Result<()>;

    /// The last saved snapshot, if any
    async fn load(&self) -> anyhow::Result<Option<Snapshot>>;
}

/// Snapshot store kept in memory as serialized JSON
#[derive(Clone, Default)]
pub struct InMemorySnapshotStore {
    json: Arc<RwLock<Option<String>>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed saves
    pub async fn save_count(&self) -> usize {
        *self.saves.read().await
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn save(&self, snapshot: Snapshot) -> anyhow::Result<()> {
        let json = snapshot.to_json()?;
        *self.json.write().await = Some(json);
        *self.saves.write().await += 1;
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        match self.json.read().await.as_deref() {
            Some(json) => Ok(Some(Snapshot::from_json(json)?)),
            None => Ok(None),
        }
    }
}

/// Snapshot store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SnapshotStore for JsonFileSnapshotStore {
    async fn save(&self, snapshot: Snapshot) -> anyhow::Result<()> {
        let json = snapshot.to_json_pretty()?;
        tokio::fs::write(&self.path, json)
            .await
            .with_context(|| format!("Failed to write snapshot to {}", self.path.display()))?;
        debug!(path = %self.path.display(), records = snapshot.records.len(), "snapshot saved");
        Ok(())
    }

    async fn load(&self) -> anyhow::Result<Option<Snapshot>> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Ok(None);
        }
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read snapshot from {}", self.path.display()))?;
        let snapshot = Snapshot::from_json(&json)
            .with_context(|| format!("Invalid snapshot in {}", self.path.display()))?;
        Ok(Some(snapshot))
    }
}
