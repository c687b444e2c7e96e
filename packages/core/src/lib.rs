//! Outline Tree Engine
//!
//! An outline is a tree of bullets kept as a single flat sequence in
//! depth-first pre-order. Each node stores its parent key and a sparse integer
//! `pos` ordering it among its siblings; structural edits change those two
//! fields and then rebuild only the affected parents' runs, so the sequence
//! always reads as the tree would render.
//!
//! # Architecture
//!
//! - **Flat sequence**: the root first, then every subtree as a contiguous run
//! - **Sparse sibling order**: `pos` values spaced by [`tree::BASE_POS`], new
//!   keys bisect the gap and sibling sets are renumbered when it runs out
//! - **Pure operations**: `(&Document, ...) -> Outcome`, refusals instead of
//!   silent no-ops
//! - **Snapshot persistence**: an unordered key → record map, rebuilt by `pos`
//!
//! # Modules
//!
//! - [`models`] - `Node` and `Document`
//! - [`tree`] - ordering, depth, subtree, reconcile, sanitize and visibility primitives
//! - [`operations`] - indent/dedent, move, split, collapse, delete, zoom and flags
//! - [`services`] - `OutlineService`, the single dispatch path
//! - [`db`] - flatten/reload and the async snapshot store
//! - [`config`] - `OutlineConfig`
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod operations;
pub mod services;
pub mod tree;

// Re-export commonly used types
pub use config::OutlineConfig;
pub use models::*;
pub use operations::{Outcome, OutlineError, Refusal, Result, Transition};
pub use services::*;
