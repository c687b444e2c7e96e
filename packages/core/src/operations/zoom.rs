//! Zoom into a node
//!
//! Zooming changes the view, not the document: the outcome is the new zoom
//! root and the node that should receive focus.

use crate::models::{Document, NodeKey};
use crate::operations::{refuse, Outcome, Refusal, Result};
use crate::tree::subtree::descendants_of;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomTarget {
    pub zoom_root: NodeKey,
    pub focus: NodeKey,
}

/// Zoom into `target`; an unknown or absent target zooms out to the root.
///
/// Focus stays put when it is inside the new zoomed subtree, otherwise it
/// moves to the first child, or to the zoom root itself when it has none.
pub fn zoom(
    doc: &Document,
    current_zoom: &str,
    focus: &str,
    target: Option<&str>,
) -> Result<Outcome<ZoomTarget>> {
    const OP: &str = "zoom";
    let zoom_root = target
        .filter(|key| doc.contains(key))
        .unwrap_or_else(|| doc.root_key());
    if zoom_root == current_zoom {
        return refuse(OP, zoom_root, Refusal::AlreadyZoomed);
    }

    let run = descendants_of(doc.nodes(), zoom_root);
    let focus = if run.len() > 1 {
        if run.iter().any(|node| node.key == focus) {
            focus
        } else {
            run[1].key.as_str()
        }
    } else {
        zoom_root
    };

    Ok(Outcome::Applied(ZoomTarget {
        zoom_root: zoom_root.to_string(),
        focus: focus.to_string(),
    }))
}
