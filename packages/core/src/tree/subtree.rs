//! Subtree extraction and sibling lookups over a flat sequence
//!
//! Every function here reads a depth-first ordered slice of nodes. Subtree
//! extraction relies on that order: a node's descendants are exactly the run
//! of nodes that immediately follow it with a greater cached depth, so the
//! cost is proportional to the subtree, not to the document.

use std::ops::Range;

use crate::models::Node;

/// Index of `key` in the sequence
pub fn index_of(nodes: &[Node], key: &str) -> Option<usize> {
    nodes.iter().position(|node| node.key == key)
}

/// Node with `key`, if present
pub fn find<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    nodes.iter().find(|node| node.key == key)
}

/// Index range of the node at `start` together with all of its descendants
pub fn run_from(nodes: &[Node], start: usize) -> Range<usize> {
    let depth = nodes[start].depth;
    let len = nodes[start + 1..]
        .iter()
        .take_while(|node| node.depth > depth)
        .count();
    start..start + 1 + len
}

/// Index range of `key` and all of its descendants
pub fn subtree_range(nodes: &[Node], key: &str) -> Option<Range<usize>> {
    index_of(nodes, key).map(|start| run_from(nodes, start))
}

/// The contiguous run `[key, ...descendants]`, in sequence order.
///
/// Returns an empty slice when `key` is absent.
pub fn descendants_of<'a>(nodes: &'a [Node], key: &str) -> &'a [Node] {
    match subtree_range(nodes, key) {
        Some(range) => &nodes[range],
        None => &[],
    }
}

/// Direct children of `key`, in sequence order
pub fn children_of<'a>(nodes: &'a [Node], key: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
    nodes.iter().filter(move |node| node.is_child_of(key))
}

/// Whether any node names `key` as its parent. Scans the whole sequence.
pub fn has_children(nodes: &[Node], key: &str) -> bool {
    children_of(nodes, key).next().is_some()
}

pub fn first_child<'a>(nodes: &'a [Node], key: &'a str) -> Option<&'a Node> {
    children_of(nodes, key).next()
}

pub fn last_child<'a>(nodes: &'a [Node], key: &'a str) -> Option<&'a Node> {
    children_of(nodes, key).last()
}

/// Nearest sibling before `key`: the last node, scanning the same parent's
/// children backwards, whose `pos` is smaller
pub fn previous_sibling<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    let node = find(nodes, key)?;
    let parent = node.parent_id.as_deref()?;
    nodes
        .iter()
        .rev()
        .filter(|other| other.is_child_of(parent))
        .find(|other| other.pos < node.pos)
}

/// Nearest sibling after `key`: the first node of the same parent whose `pos` is larger
pub fn next_sibling<'a>(nodes: &'a [Node], key: &str) -> Option<&'a Node> {
    let node = find(nodes, key)?;
    let parent = node.parent_id.as_deref()?;
    nodes
        .iter()
        .filter(|other| other.is_child_of(parent))
        .find(|other| other.pos > node.pos)
}

/// Set the cached `has_children` flag of each listed key from the actual children.
///
/// Keys not present are skipped.
pub fn refresh_has_children(nodes: &mut [Node], keys: &[&str]) {
    for key in keys {
        let flag = has_children(nodes, key);
        if let Some(index) = index_of(nodes, key) {
            nodes[index].has_children = flag;
        }
    }
}
