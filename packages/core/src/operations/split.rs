//! Split a node at a text offset

use crate::models::{Document, Node};
use crate::operations::{applied, place_among, refuse, Outcome, Refusal, Result};
use crate::tree::fractional_ordering::PositionGenerator;
use crate::tree::reconcile::reconcile;
use crate::tree::subtree::{children_of, has_children, next_sibling};

/// Split `key` at character `offset` (clamped to the text length).
///
/// The node keeps the text before the offset and a new node receives the rest:
///
/// - as the first child, when the node is the zoom root or is expanded with
///   children and the offset is not at column 0
/// - otherwise as the next sibling
///
/// At column 0 the sibling case inserts the new, empty node *before* the
/// original, which keeps its whole text. Splitting the zoom root at column 0
/// splits at the end of its text instead. Focus always lands on the new node.
pub fn split(doc: &Document, key: &str, offset: usize, zoom_root: &str) -> Result<Outcome> {
    const OP: &str = "split";
    let nodes = doc.nodes();
    let index = match doc.index_of(key) {
        Some(index) => index,
        None => return refuse(OP, key, Refusal::UnknownNode),
    };
    let target = &nodes[index];
    let parent = match target.parent_id.clone() {
        Some(parent) => parent,
        None => return refuse(OP, key, Refusal::TargetIsRoot),
    };

    let is_zoom_root = key == zoom_root;
    let mut offset = offset.min(target.char_len());
    if is_zoom_root && offset == 0 {
        offset = target.char_len();
    }

    let mut next = nodes.to_vec();
    let as_first_child =
        is_zoom_root || (!target.collapsed && has_children(nodes, key) && offset != 0);

    let mut new_node = Node::new("");
    let focus = new_node.key.clone();

    let new_parent = if as_first_child {
        let pos = place_among(&mut next, key, &new_node.key, |nodes| {
            match children_of(nodes, key).next() {
                Some(first) => PositionGenerator::between(0, first.pos),
                None => Some(PositionGenerator::at(1)),
            }
        })?;
        new_node.pos = pos;
        key.to_string()
    } else {
        let pos = place_among(&mut next, &parent, &new_node.key, |nodes| {
            let own = nodes[index].pos;
            match next_sibling(nodes, key) {
                Some(sibling) => PositionGenerator::between(own, sibling.pos),
                None => Some(PositionGenerator::after(own)),
            }
        })?;

        if offset == 0 {
            // new empty node takes the old slot; the original moves after it
            new_node.pos = next[index].pos;
            next[index].pos = pos;
            offset = target.char_len();
        } else {
            new_node.pos = pos;
        }
        parent
    };

    let text = &target.text;
    let byte_offset = text
        .char_indices()
        .nth(offset)
        .map_or(text.len(), |(byte, _)| byte);
    new_node.text = text[byte_offset..].to_string();
    next[index].text = text[..byte_offset].to_string();

    let parent_depth = next
        .iter()
        .find(|node| node.key == new_parent)
        .map_or(0, |node| node.depth);
    new_node.depth = parent_depth + 1;
    new_node.parent_id = Some(new_parent.clone());

    // inside the parent's run; the rebuild moves it to its final slot
    next.insert(index + 1, new_node);

    let next = reconcile(&next, &new_parent)?;
    applied(next, Some(focus))
}
