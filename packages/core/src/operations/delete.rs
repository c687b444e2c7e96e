//! Delete a leaf node

use crate::models::Document;
use crate::operations::{applied, refuse, Outcome, Refusal, Result};
use crate::tree::subtree::{descendants_of, previous_sibling, refresh_has_children};

/// Delete `key` together with its descendants.
///
/// Only leaves are deleted, so the removed run is always the node alone. Focus
/// moves to the previous sibling, else the previous node in the sequence (when
/// it is not the root), else the first remaining content node.
pub fn delete(doc: &Document, key: &str, zoom_root: &str) -> Result<Outcome> {
    const OP: &str = "delete";
    let index = match doc.index_of(key) {
        Some(index) => index,
        None => return refuse(OP, key, Refusal::UnknownNode),
    };
    if index == 0 {
        return refuse(OP, key, Refusal::TargetIsRoot);
    }
    if key == zoom_root {
        return refuse(OP, key, Refusal::IsZoomRoot);
    }
    let run = descendants_of(doc.nodes(), key);
    if run.len() > 1 {
        return refuse(OP, key, Refusal::HasChildren);
    }
    if doc.len() - run.len() <= 1 {
        return refuse(OP, key, Refusal::LastContentNode);
    }

    let nodes = doc.nodes();
    let parent = nodes[index].parent_id.clone().unwrap_or_default();
    let focus = previous_sibling(nodes, key)
        .or_else(|| nodes.get(index - 1).filter(|node| !node.is_root()))
        .map(|node| node.key.clone());

    let mut next = nodes.to_vec();
    next.drain(index..index + run.len());
    refresh_has_children(&mut next, &[parent.as_str()]);

    let focus = focus.or_else(|| next.get(1).map(|node| node.key.clone()));
    applied(next, focus)
}
