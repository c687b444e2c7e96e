//! Mutation Operations
//!
//! Every operation is a pure function from a [`Document`] (plus the target key,
//! zoom root and operation parameters) to an [`Outcome`]:
//!
//! - [`Outcome::Applied`] carries the new document and the node that should
//!   receive focus. The input document is never modified.
//! - [`Outcome::Refused`] reports an unmet precondition. It is not an error:
//!   the caller keeps its current document.
//!
//! Errors (`Err(OutlineError)`) are reserved for contract violations and
//! corrupt data detected while restoring the order invariant.
//!
//! Structural operations compute the new `parent_id`/`pos` of the nodes they
//! touch and leave the re-ordering to [`crate::tree::reconcile_parents`].

pub mod error;

mod append;
mod collapse;
mod delete;
mod flags;
mod indent;
mod movement;
mod split;
mod zoom;

use std::fmt;

use tracing::{debug, warn};

pub use append::append_child;
pub use collapse::{collapse, collapse_all, expand, expand_all};
pub use delete::delete;
pub use error::{OutlineError, Result};
pub use flags::{toggle_bookmark, toggle_completion};
pub use indent::{dedent, indent};
pub use movement::{move_down, move_up};
pub use split::split;
pub use zoom::{zoom, ZoomTarget};

use crate::models::{Document, Node, NodeKey};
use crate::tree::fractional_ordering::PositionGenerator;

/// A document produced by an applied operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub document: Document,
    /// Node that should hold the cursor next; `None` leaves focus where it is
    pub focus: Option<NodeKey>,
}

impl Transition {
    pub fn new(document: Document, focus: Option<NodeKey>) -> Self {
        Self { document, focus }
    }
}

/// Result of an operation whose preconditions may be unmet
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T = Transition> {
    Applied(T),
    Refused(Refusal),
}

impl<T> Outcome<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Refused(_) => None,
        }
    }

    pub fn refusal(&self) -> Option<Refusal> {
        match self {
            Outcome::Applied(_) => None,
            Outcome::Refused(reason) => Some(*reason),
        }
    }
}

/// Why an operation left the document unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// The target key is not in the document
    UnknownNode,
    /// The global root is never edited directly
    TargetIsRoot,
    /// Nothing precedes the target in the sequence
    NoPreviousNode,
    /// The target is the zoom root, lies above it, or would leave its subtree
    AtZoomBoundary,
    /// The target already sits at the configured maximum depth
    MaxDepthReached,
    /// Indent would put the target more than one level below the node before it
    IndentTooDeep,
    /// No node to trade places with
    NothingToSwap,
    /// The move would take the node outside the zoomed subtree
    EscapesZoom,
    /// Collapse/expand of a node without children
    NoChildren,
    /// The node already is in the requested state
    AlreadyInState,
    /// Expand-all/collapse-all found no node to change
    NothingToChange,
    /// Only leaves can be deleted
    HasChildren,
    /// The last content node of the document cannot be deleted
    LastContentNode,
    /// The zoom root cannot be deleted while zoomed in
    IsZoomRoot,
    /// Completion is not toggled on a node without text
    BlankText,
    /// Bookmarks apply to a zoom root other than the global root
    NotZoomed,
    /// Zoom target equals the current zoom root
    AlreadyZoomed,
}

impl fmt::Display for Refusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Refusal::UnknownNode => "node does not exist",
            Refusal::TargetIsRoot => "the root cannot be edited",
            Refusal::NoPreviousNode => "no preceding node",
            Refusal::AtZoomBoundary => "at the zoom boundary",
            Refusal::MaxDepthReached => "maximum depth reached",
            Refusal::IndentTooDeep => "already one level below the previous node",
            Refusal::NothingToSwap => "nothing to swap with",
            Refusal::EscapesZoom => "would leave the zoomed subtree",
            Refusal::NoChildren => "node has no children",
            Refusal::AlreadyInState => "already in the requested state",
            Refusal::NothingToChange => "nothing to change",
            Refusal::HasChildren => "node has children",
            Refusal::LastContentNode => "last remaining node",
            Refusal::IsZoomRoot => "node is the zoom root",
            Refusal::BlankText => "node text is blank",
            Refusal::NotZoomed => "not zoomed in",
            Refusal::AlreadyZoomed => "already zoomed into this node",
        };
        f.write_str(text)
    }
}

/// Log and return a refusal
pub(crate) fn refuse<T>(operation: &'static str, key: &str, reason: Refusal) -> Result<Outcome<T>> {
    debug!(operation, key, %reason, "operation refused");
    Ok(Outcome::Refused(reason))
}

/// Wrap a rebuilt sequence into an applied outcome
pub(crate) fn applied(nodes: Vec<Node>, focus: Option<NodeKey>) -> Result<Outcome> {
    Ok(Outcome::Applied(Transition::new(
        Document::from_nodes(nodes)?,
        focus,
    )))
}

/// Renumber the children of `parent` (except `moving`) to `at(1)`, `at(2)`, ...
/// in ascending `pos` order.
fn renumber_children(nodes: &mut [Node], parent: &str, moving: &str) {
    let mut siblings: Vec<(i64, usize)> = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.is_child_of(parent) && node.key != moving)
        .map(|(index, node)| (node.pos, index))
        .collect();
    siblings.sort();

    let positions = PositionGenerator::rebalance(siblings.len());
    for ((_, index), pos) in siblings.into_iter().zip(positions) {
        nodes[index].pos = pos;
    }
}

/// Compute an order key with `place`, renumbering the siblings under `parent`
/// once if the gap is exhausted.
///
/// `place` is re-run against the renumbered sequence, so it must read neighbour
/// positions from the slice it is given.
pub(crate) fn place_among<F>(nodes: &mut [Node], parent: &str, moving: &str, place: F) -> Result<i64>
where
    F: Fn(&[Node]) -> Option<i64>,
{
    if let Some(pos) = place(nodes) {
        return Ok(pos);
    }

    warn!(parent, "sibling positions exhausted, renumbering");
    renumber_children(nodes, parent, moving);
    place(nodes).ok_or_else(|| OutlineError::position_exhausted(parent.to_string()))
}
