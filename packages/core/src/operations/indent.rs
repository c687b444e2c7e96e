//! Indent and dedent
//!
//! Indent makes the target the last child of the nearest preceding node one
//! level up; dedent makes it the sibling immediately after its old parent. The
//! target's subtree travels with it.

use crate::models::Document;
use crate::operations::{applied, place_among, refuse, Outcome, Refusal, Result};
use crate::tree::depth::depth_of;
use crate::tree::fractional_ordering::PositionGenerator;
use crate::tree::reconcile::reconcile_parents;
use crate::tree::subtree::children_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shift {
    Indent,
    Dedent,
}

impl Shift {
    fn name(self) -> &'static str {
        match self {
            Shift::Indent => "indent",
            Shift::Dedent => "dedent",
        }
    }

    fn delta(self) -> i32 {
        match self {
            Shift::Indent => 1,
            Shift::Dedent => -1,
        }
    }
}

/// Move `key` one level deeper, under the nearest preceding node at its depth.
///
/// A collapsed new parent is expanded so the node stays visible.
pub fn indent(doc: &Document, key: &str, zoom_root: &str, max_depth: i32) -> Result<Outcome> {
    shift_depth(doc, key, zoom_root, max_depth, Shift::Indent)
}

/// Move `key` one level up, right after its old parent
pub fn dedent(doc: &Document, key: &str, zoom_root: &str, max_depth: i32) -> Result<Outcome> {
    shift_depth(doc, key, zoom_root, max_depth, Shift::Dedent)
}

fn shift_depth(
    doc: &Document,
    key: &str,
    zoom_root: &str,
    max_depth: i32,
    shift: Shift,
) -> Result<Outcome> {
    let op = shift.name();
    let nodes = doc.nodes();

    let index = match doc.index_of(key) {
        Some(index) => index,
        None => return refuse(op, key, Refusal::UnknownNode),
    };
    if index == 0 {
        return refuse(op, key, Refusal::NoPreviousNode);
    }

    let depth = depth_of(nodes, key, None);
    let base_depth = if zoom_root == doc.root_key() {
        0
    } else {
        depth_of(nodes, zoom_root, None) + 1
    };

    if depth < base_depth || (shift == Shift::Dedent && depth == base_depth) {
        return refuse(op, key, Refusal::AtZoomBoundary);
    }
    if depth >= max_depth {
        return refuse(op, key, Refusal::MaxDepthReached);
    }
    let previous = &nodes[index - 1];
    if shift == Shift::Indent && depth - depth_of(nodes, &previous.key, None) >= 1 {
        return refuse(op, key, Refusal::IndentTooDeep);
    }

    let target = &nodes[index];
    let old_parent = match target.parent_id.clone() {
        Some(parent) => parent,
        None => return refuse(op, key, Refusal::TargetIsRoot),
    };

    // nearest preceding node shallower than the new depth
    let new_depth = target.depth + shift.delta();
    let new_parent = nodes[..index]
        .iter()
        .rev()
        .find(|node| node.depth < new_depth)
        .map_or_else(|| doc.root_key().to_string(), |node| node.key.clone());

    let mut next = nodes.to_vec();
    next[index].parent_id = Some(new_parent.clone());

    // neighbours among the new parent's children, in sequence order
    let pos = place_among(&mut next, &new_parent, key, |nodes| {
        let siblings: Vec<_> = children_of(nodes, &new_parent).collect();
        let at = siblings.iter().position(|node| node.key == key)?;
        let before = at.checked_sub(1).map(|i| siblings[i].pos);
        let after = siblings.get(at + 1).map(|node| node.pos);
        PositionGenerator::calculate(before, after)
    })?;
    next[index].pos = pos;

    if shift == Shift::Indent {
        if let Some(parent) = next.iter_mut().find(|node| node.key == new_parent) {
            parent.collapsed = false;
        }
    }

    // has_children of both parents is refreshed by the rebuild
    let next = reconcile_parents(&next, &[old_parent.as_str(), new_parent.as_str()])?;
    applied(next, Some(key.to_string()))
}
