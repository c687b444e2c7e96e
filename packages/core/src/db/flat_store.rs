//! Flatten / reload round-trip
//!
//! The persistence collaborator stores nodes as an unordered key-addressable
//! map. [`reload`] rebuilds the canonical depth-first sequence from
//! `parent_id`/`pos` alone, so the order of records on the wire never matters.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::{Node, NodeKey};
use crate::operations::{OutlineError, Result};

/// Key-addressable view of a document, order dropped
pub type FlatStore = HashMap<NodeKey, Node>;

/// Index a sequence by key
pub fn flatten(nodes: &[Node]) -> FlatStore {
    nodes
        .iter()
        .map(|node| (node.key.clone(), node.clone()))
        .collect()
}

/// Read access needed to rebuild a sequence from unordered records
pub trait NodeStore {
    fn node(&self, key: &str) -> Option<&Node>;

    /// Children of `key`, ascending by `pos` (ties broken by key)
    fn children(&self, key: &str) -> Vec<&Node>;
}

/// In-memory [`NodeStore`] over a [`FlatStore`] with a prebuilt child index
pub struct MemoryStore {
    records: FlatStore,
    children: HashMap<NodeKey, Vec<NodeKey>>,
}

impl MemoryStore {
    pub fn new(records: FlatStore) -> Self {
        let mut children: HashMap<NodeKey, Vec<NodeKey>> = HashMap::new();
        for node in records.values() {
            if let Some(parent) = &node.parent_id {
                if parent != &node.key {
                    children.entry(parent.clone()).or_default().push(node.key.clone());
                }
            }
        }
        for keys in children.values_mut() {
            keys.sort_by(|a, b| {
                let pos = |key: &NodeKey| records.get(key).map_or(0, |node| node.pos);
                pos(a).cmp(&pos(b)).then_with(|| a.cmp(b))
            });
        }
        Self { records, children }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<&[Node]> for MemoryStore {
    fn from(nodes: &[Node]) -> Self {
        Self::new(flatten(nodes))
    }
}

impl NodeStore for MemoryStore {
    fn node(&self, key: &str) -> Option<&Node> {
        self.records.get(key)
    }

    fn children(&self, key: &str) -> Vec<&Node> {
        self.children
            .get(key)
            .map(|keys| keys.iter().filter_map(|key| self.records.get(key)).collect())
            .unwrap_or_default()
    }
}

/// Rebuild the depth-first sequence reachable from `root_key`.
///
/// Children are visited in ascending `pos` order; `depth` and `has_children`
/// are recomputed, every other field is taken as stored. Records that cannot
/// be reached from the root are left out.
///
/// # Errors
///
/// [`OutlineError::RootNotFound`] if the store has no `root_key` record.
pub fn reload<S: NodeStore + ?Sized>(store: &S, root_key: &str) -> Result<Vec<Node>> {
    let root = store
        .node(root_key)
        .ok_or_else(|| OutlineError::root_not_found(root_key.to_string()))?;

    let mut out = Vec::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&Node, i32)> = vec![(root, 0)];
    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node.key.as_str()) {
            warn!(key = %node.key, "node reached twice while reloading, skipping");
            continue;
        }

        let children = store.children(&node.key);
        let mut rebuilt = node.clone();
        rebuilt.depth = depth;
        rebuilt.has_children = !children.is_empty();
        if depth == 0 {
            rebuilt.parent_id = None;
        }
        out.push(rebuilt);

        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }

    Ok(out)
}
