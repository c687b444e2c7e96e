//! Collapse / expand
//!
//! Pure flag flips: the sequence order never changes, so nothing is reconciled.

use crate::models::Document;
use crate::operations::{applied, refuse, Outcome, Refusal, Result};
use crate::tree::subtree::{descendants_of, subtree_range};

pub fn collapse(doc: &Document, key: &str) -> Result<Outcome> {
    set_collapsed(doc, key, true)
}

pub fn expand(doc: &Document, key: &str) -> Result<Outcome> {
    set_collapsed(doc, key, false)
}

fn set_collapsed(doc: &Document, key: &str, collapsed: bool) -> Result<Outcome> {
    let op = if collapsed { "collapse" } else { "expand" };
    let index = match doc.index_of(key) {
        Some(index) => index,
        None => return refuse(op, key, Refusal::UnknownNode),
    };
    if doc.nodes()[index].collapsed == collapsed {
        return refuse(op, key, Refusal::AlreadyInState);
    }
    if descendants_of(doc.nodes(), key).len() == 1 {
        return refuse(op, key, Refusal::NoChildren);
    }

    let mut next = doc.nodes().to_vec();
    next[index].collapsed = collapsed;
    applied(next, Some(key.to_string()))
}

/// Collapse every node with children strictly inside the zoom root's subtree
pub fn collapse_all(doc: &Document, zoom_root: &str) -> Result<Outcome> {
    set_collapsed_all(doc, zoom_root, true)
}

/// Expand every node with children strictly inside the zoom root's subtree
pub fn expand_all(doc: &Document, zoom_root: &str) -> Result<Outcome> {
    set_collapsed_all(doc, zoom_root, false)
}

fn set_collapsed_all(doc: &Document, zoom_root: &str, collapsed: bool) -> Result<Outcome> {
    let op = if collapsed { "collapse_all" } else { "expand_all" };
    let range = match subtree_range(doc.nodes(), zoom_root) {
        Some(range) => range,
        None => return refuse(op, zoom_root, Refusal::UnknownNode),
    };

    let mut next = doc.nodes().to_vec();
    let mut changed = 0;
    for node in &mut next[range.start + 1..range.end] {
        if node.has_children && node.collapsed != collapsed {
            node.collapsed = collapsed;
            changed += 1;
        }
    }

    if changed == 0 {
        return refuse(op, zoom_root, Refusal::NothingToChange);
    }
    applied(next, None)
}
