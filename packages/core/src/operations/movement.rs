//! Move up / move down
//!
//! A move swaps the target with its neighbour in rendering order. Between
//! siblings that is a plain exchange of `pos`. At the edge of a sibling list
//! the node crosses into the neighbouring parent instead:
//!
//! - up: becomes the last child of the parent's previous sibling
//! - down: becomes the first child of the parent's next sibling

use crate::models::{Document, Node};
use crate::operations::{applied, place_among, refuse, Outcome, Refusal, Result};
use crate::tree::depth::{depth_of, is_within};
use crate::tree::fractional_ordering::PositionGenerator;
use crate::tree::reconcile::reconcile_parents;
use crate::tree::subtree::{children_of, last_child, next_sibling, previous_sibling};

/// Where the moving node ends up
struct Destination {
    parent: String,
    pos: Option<i64>,
    /// Sibling whose `pos` is traded with the mover
    swap_with: Option<(String, i64)>,
}

/// Move `key` one step up in rendering order
pub fn move_up(doc: &Document, key: &str, zoom_root: &str) -> Result<Outcome> {
    const OP: &str = "move_up";
    let nodes = doc.nodes();
    let target = match movable(doc, key, OP)? {
        Ok(target) => target,
        Err(outcome) => return Ok(outcome),
    };
    let parent = target.parent_id.as_deref().unwrap_or_default();

    let partner = match previous_sibling(nodes, key) {
        Some(sibling) => sibling,
        None => {
            let uncle = match previous_sibling(nodes, parent) {
                Some(uncle) => uncle,
                None => return refuse(OP, key, Refusal::NothingToSwap),
            };
            last_child(nodes, &uncle.key).unwrap_or(uncle)
        }
    };

    // never slide above the zoom root
    let after_partner = doc
        .index_of(&partner.key)
        .and_then(|index| nodes.get(index + 1));
    if partner.key == zoom_root || after_partner.map_or(false, |node| node.key == zoom_root) {
        return refuse(OP, key, Refusal::EscapesZoom);
    }

    let destination = if partner.is_child_of(parent) {
        Destination {
            parent: parent.to_string(),
            pos: Some(partner.pos),
            swap_with: Some((partner.key.clone(), target.pos)),
        }
    } else if depth_of(nodes, &partner.key, None) == depth_of(nodes, key, None) {
        // below the last child of the preceding parent
        Destination {
            parent: partner.parent_id.clone().unwrap_or_default(),
            pos: Some(PositionGenerator::after(partner.pos)),
            swap_with: None,
        }
    } else {
        // into a childless node
        Destination {
            parent: partner.key.clone(),
            pos: Some(PositionGenerator::at(1)),
            swap_with: None,
        }
    };

    relocate(doc, target, destination, zoom_root, OP)
}

/// Move `key` one step down in rendering order
pub fn move_down(doc: &Document, key: &str, zoom_root: &str) -> Result<Outcome> {
    const OP: &str = "move_down";
    let nodes = doc.nodes();
    let target = match movable(doc, key, OP)? {
        Ok(target) => target,
        Err(outcome) => return Ok(outcome),
    };
    let parent = target.parent_id.as_deref().unwrap_or_default();

    let partner = match next_sibling(nodes, key).or_else(|| next_sibling(nodes, parent)) {
        Some(partner) if partner.key != key => partner,
        _ => return refuse(OP, key, Refusal::NothingToSwap),
    };

    let destination = if partner.is_child_of(parent) {
        Destination {
            parent: parent.to_string(),
            pos: Some(partner.pos),
            swap_with: Some((partner.key.clone(), target.pos)),
        }
    } else {
        // the parent's next sibling would fall outside the zoomed view
        if parent == zoom_root {
            return refuse(OP, key, Refusal::EscapesZoom);
        }
        // above the first child of the next parent, placed once the sequence is copied
        Destination {
            parent: partner.key.clone(),
            pos: None,
            swap_with: None,
        }
    };

    relocate(doc, target, destination, zoom_root, OP)
}

/// The node to move, or the refusal outcome when it cannot move at all
fn movable<'a>(doc: &'a Document, key: &str, op: &'static str) -> Result<std::result::Result<&'a Node, Outcome>> {
    match doc.get(key) {
        None => refuse(op, key, Refusal::UnknownNode).map(Err),
        Some(node) if node.is_root() => refuse(op, key, Refusal::TargetIsRoot).map(Err),
        Some(node) => Ok(Ok(node)),
    }
}

fn relocate(
    doc: &Document,
    target: &Node,
    destination: Destination,
    zoom_root: &str,
    op: &'static str,
) -> Result<Outcome> {
    let key = target.key.as_str();
    if !is_within(doc.nodes(), &destination.parent, zoom_root) {
        return refuse(op, key, Refusal::EscapesZoom);
    }

    let old_parent = target.parent_id.clone().unwrap_or_default();
    let new_parent = destination.parent;
    let mut next = doc.nodes().to_vec();

    if let Some((partner, pos)) = &destination.swap_with {
        if let Some(node) = next.iter_mut().find(|node| &node.key == partner) {
            node.pos = *pos;
        }
    }

    if let Some(index) = doc.index_of(key) {
        next[index].parent_id = Some(new_parent.clone());
        let pos = match destination.pos {
            Some(pos) => pos,
            None => place_among(&mut next, &new_parent, key, |nodes| {
                match children_of(nodes, &new_parent).find(|child| child.key != key) {
                    Some(first) => PositionGenerator::between(0, first.pos),
                    None => Some(PositionGenerator::at(1)),
                }
            })?,
        };
        next[index].pos = pos;
    }

    let next = reconcile_parents(&next, &[old_parent.as_str(), new_parent.as_str()])?;
    applied(next, Some(key.to_string()))
}
