//! Whole-document repair for data of unknown integrity
//!
//! Used on load only. Every cached field is discarded and recomputed from the
//! `parent_id` links reachable from the root:
//!
//! - `pos` is renumbered `at(i + 1)` among siblings, keeping their current
//!   relative order in the input sequence
//! - `depth` is the parent's depth plus one (root = 0)
//! - `has_children` reflects the rebuilt tree
//!
//! Nodes that cannot be reached from the root (dangling parent, cycles,
//! duplicate keys) are dropped with a warning.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::models::{Document, Node};
use crate::operations::{OutlineError, Result};
use crate::tree::fractional_ordering::PositionGenerator;

/// Rebuild the sequence depth-first from `root_key`, renumbering every cache field.
///
/// An empty input yields an empty slate rooted at `root_key`.
///
/// # Errors
///
/// [`OutlineError::RootNotFound`] if `nodes` is non-empty and has no `root_key`.
pub fn sanitize(nodes: &[Node], root_key: &str) -> Result<Vec<Node>> {
    if nodes.is_empty() {
        warn!(root = root_key, "sanitizing an empty document, starting from an empty slate");
        return Ok(Document::empty_slate_rooted(root_key).into_nodes());
    }

    let root = nodes
        .iter()
        .find(|node| node.key == root_key)
        .ok_or_else(|| OutlineError::root_not_found(root_key.to_string()))?;

    let mut children: HashMap<&str, Vec<&Node>> = HashMap::new();
    for node in nodes {
        if node.key == root_key {
            continue;
        }
        if let Some(parent) = node.parent_id.as_deref() {
            children.entry(parent).or_default().push(node);
        }
    }

    let mut out = Vec::with_capacity(nodes.len());
    let mut visited: HashSet<&str> = HashSet::with_capacity(nodes.len());
    visited.insert(root.key.as_str());

    let mut root = root.clone();
    root.parent_id = None;
    root.depth = 0;
    root.has_children = children.contains_key(root_key);
    out.push(root);

    // explicit stack of (node, depth); children pushed in reverse to pop in order
    let mut stack: Vec<(&Node, i32)> = Vec::new();
    push_children(&children, root_key, 1, &mut stack);

    let mut pending_pos: HashMap<&str, i64> = HashMap::new();
    while let Some((node, depth)) = stack.pop() {
        if !visited.insert(node.key.as_str()) {
            warn!(key = %node.key, "duplicate node key, keeping the first occurrence");
            continue;
        }

        let parent = node.parent_id.as_deref().unwrap_or(root_key);
        let index = pending_pos.entry(parent).or_insert(0);
        *index += 1;

        let mut fixed = node.clone();
        fixed.pos = PositionGenerator::at(*index);
        fixed.depth = depth;
        fixed.has_children = children.contains_key(node.key.as_str());
        out.push(fixed);

        push_children(&children, &node.key, depth + 1, &mut stack);
    }

    let dropped = nodes.len() - out.len();
    if dropped > 0 {
        warn!(
            dropped,
            root = root_key,
            "discarded nodes unreachable from the root"
        );
    }

    Ok(out)
}

fn push_children<'a>(
    children: &HashMap<&str, Vec<&'a Node>>,
    parent: &str,
    depth: i32,
    stack: &mut Vec<(&'a Node, i32)>,
) {
    if let Some(kids) = children.get(parent) {
        stack.extend(kids.iter().rev().map(|&kid| (kid, depth)));
    }
}
