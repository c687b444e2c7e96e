//! Document State
//!
//! A [`Document`] is the flat, depth-first ordered sequence of an outline's
//! nodes, root first. Operations never mutate a document in place: each one
//! returns a new `Document` and the previous value stays valid as a snapshot.

use std::collections::HashMap;

use crate::models::node::{Node, ROOT_KEY};
use crate::operations::{OutlineError, Result};
use crate::tree::fractional_ordering::PositionGenerator;
use crate::tree::subtree;

/// Ordered sequence of nodes satisfying the order invariant.
///
/// The first node is always the parentless root. A pre-order depth-first
/// traversal of the tree described by `parent_id`/`pos` (children ascending by
/// `pos`) reproduces the sequence exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// A fresh outline: the root plus one empty content node
    pub fn empty_slate() -> Self {
        Self::empty_slate_rooted(ROOT_KEY)
    }

    /// A fresh outline under an explicit root key
    pub fn empty_slate_rooted(root_key: &str) -> Self {
        let mut root = Node::root(root_key);
        root.has_children = true;
        let item = Node::new("")
            .with_parent(root_key, PositionGenerator::at(1))
            .with_depth(1);
        Self {
            nodes: vec![root, item],
        }
    }

    /// Wrap an already ordered sequence.
    ///
    /// Only the root placement is checked here; use [`Document::check_invariants`]
    /// for a full verification.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        let root = nodes.first().ok_or(OutlineError::EmptyDocument)?;
        if !root.is_root() {
            return Err(OutlineError::invalid_root(root.key.clone()));
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn root(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn root_key(&self) -> &str {
        &self.nodes[0].key
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        subtree::find(&self.nodes, key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        subtree::index_of(&self.nodes, key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    /// Number of nodes, root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a document holds at least its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes other than the root
    pub fn content(&self) -> &[Node] {
        &self.nodes[1..]
    }

    /// Verify the order invariant and every cache field.
    ///
    /// Checks, in order: a single parentless root; the sequence equals the
    /// depth-first traversal of `parent_id`/`pos`; sibling positions are
    /// unique; `depth` and `has_children` agree with the structure.
    pub fn check_invariants(&self) -> Result<()> {
        let mut children: HashMap<&str, Vec<&Node>> = HashMap::new();
        for node in self.content() {
            let parent = node.parent_id.as_deref().ok_or_else(|| {
                OutlineError::corrupt_tree(format!("node '{}' has no parent", node.key))
            })?;
            children.entry(parent).or_default().push(node);
        }
        for (parent, list) in children.iter_mut() {
            list.sort_by_key(|node| node.pos);
            if let Some(pair) = list.windows(2).find(|pair| pair[0].pos == pair[1].pos) {
                return Err(OutlineError::corrupt_tree(format!(
                    "children '{}' and '{}' of '{}' share pos {}",
                    pair[0].key, pair[1].key, parent, pair[0].pos
                )));
            }
        }

        let mut expected: Vec<(&Node, i32)> = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<(&Node, i32)> = vec![(self.root(), 0)];
        while let Some((node, depth)) = stack.pop() {
            if expected.len() > self.nodes.len() {
                return Err(OutlineError::corrupt_tree("cyclic ancestry"));
            }
            expected.push((node, depth));
            if let Some(kids) = children.get(node.key.as_str()) {
                stack.extend(kids.iter().rev().map(|&kid| (kid, depth + 1)));
            }
        }

        if expected.len() != self.nodes.len() {
            return Err(OutlineError::corrupt_tree(format!(
                "{} nodes reachable from the root, {} in the sequence",
                expected.len(),
                self.nodes.len()
            )));
        }

        for (index, (node, (want, depth))) in self.nodes.iter().zip(expected).enumerate() {
            if node.key != want.key {
                return Err(OutlineError::corrupt_tree(format!(
                    "expected '{}' at index {}, found '{}'",
                    want.key, index, node.key
                )));
            }
            if node.depth != depth {
                return Err(OutlineError::corrupt_tree(format!(
                    "node '{}' caches depth {}, actual {}",
                    node.key, node.depth, depth
                )));
            }
            if node.has_children != children.contains_key(node.key.as_str()) {
                return Err(OutlineError::corrupt_tree(format!(
                    "node '{}' has a stale has_children flag",
                    node.key
                )));
            }
        }

        Ok(())
    }
}
