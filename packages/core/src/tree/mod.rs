//! Tree primitives over the flat sequence
//!
//! - [`fractional_ordering`] - order keys between siblings
//! - [`depth`] - depth and ancestry walks, bounded against corrupt parent chains
//! - [`subtree`] - contiguous subtree runs, children and sibling lookups
//! - [`reconcile`] - localized rebuild of one or two parents' runs
//! - [`sanitize`] - whole-document repair on load
//! - [`visibility`] - per-render-pass visibility memo

pub mod depth;
pub mod fractional_ordering;
pub mod reconcile;
pub mod sanitize;
pub mod subtree;
pub mod visibility;

pub use depth::{ancestors, depth_of, has_collapsed_antecedent, is_within};
pub use fractional_ordering::{PositionGenerator, BASE_POS};
pub use reconcile::{reconcile, reconcile_parents};
pub use sanitize::sanitize;
pub use subtree::{children_of, descendants_of, subtree_range};
pub use visibility::VisibilityPass;
