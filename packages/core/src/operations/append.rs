//! Append an empty child

use crate::models::{Document, Node};
use crate::operations::{applied, refuse, Outcome, Refusal, Result};
use crate::tree::fractional_ordering::PositionGenerator;
use crate::tree::subtree::{last_child, subtree_range};

/// Add an empty node as the last child of `parent` (normally the zoom root)
/// and focus it.
///
/// The node is placed at the end of the parent's run, which is already its
/// depth-first slot, so no reconciliation is needed.
pub fn append_child(doc: &Document, parent: &str) -> Result<Outcome> {
    const OP: &str = "append_child";
    let nodes = doc.nodes();
    let range = match subtree_range(nodes, parent) {
        Some(range) => range,
        None => return refuse(OP, parent, Refusal::UnknownNode),
    };

    let pos = last_child(nodes, parent).map_or(PositionGenerator::at(1), |last| {
        PositionGenerator::after(last.pos)
    });
    let child = Node::new("")
        .with_parent(parent, pos)
        .with_depth(nodes[range.start].depth + 1);
    let focus = child.key.clone();

    let mut next = nodes.to_vec();
    next[range.start].has_children = true;
    next.insert(range.end, child);
    applied(next, Some(focus))
}
