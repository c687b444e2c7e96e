//! Depth and ancestry queries
//!
//! Depth is derived by walking `parent_id` references upwards. Every walk is
//! bounded by the sequence length so that dangling or cyclic parent chains
//! (document corruption) terminate instead of looping.

use crate::models::Node;
use crate::tree::subtree::find;

/// Bounded iterator over the ancestors of a node, nearest first
pub struct Ancestors<'a> {
    nodes: &'a [Node],
    next: Option<&'a str>,
    remaining: usize,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let node = find(self.nodes, self.next?)?;
        self.next = node.parent_id.as_deref();
        Some(node)
    }
}

/// Ancestors of `key`, starting at its parent. Empty if `key` is absent.
pub fn ancestors<'a>(nodes: &'a [Node], key: &str) -> Ancestors<'a> {
    let next = find(nodes, key).and_then(|node| node.parent_id.as_deref());
    Ancestors {
        nodes,
        next,
        remaining: nodes.len(),
    }
}

/// Nesting depth of `key`, counted in ancestors strictly below `zoom_root`.
///
/// - `-1` for the global root and for keys absent from `nodes`
/// - `0` for direct children of the root, or of `zoom_root` when given
///
/// Without a zoom root this equals the cached `depth` minus one.
pub fn depth_of(nodes: &[Node], key: &str, zoom_root: Option<&str>) -> i32 {
    let mut depth = -1;
    for ancestor in ancestors(nodes, key) {
        depth += 1;
        if zoom_root == Some(ancestor.key.as_str()) {
            break;
        }
    }
    depth
}

/// Whether some ancestor of `key` below `zoom_root` is collapsed.
///
/// The zoom root itself is never considered: its children are always shown.
pub fn has_collapsed_antecedent(nodes: &[Node], key: &str, zoom_root: Option<&str>) -> bool {
    ancestors(nodes, key)
        .take_while(|ancestor| zoom_root != Some(ancestor.key.as_str()))
        .any(|ancestor| ancestor.collapsed)
}

/// Whether `key` is `ancestor` or lies somewhere inside its subtree
pub fn is_within(nodes: &[Node], key: &str, ancestor: &str) -> bool {
    key == ancestor || ancestors(nodes, key).any(|node| node.key == ancestor)
}
