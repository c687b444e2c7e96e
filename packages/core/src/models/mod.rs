//! Data Models
//!
//! - `Node` - a single bullet: text, parent link, sibling order key and flags
//! - `Document` - the root-first, depth-first ordered sequence of nodes

mod document;
mod node;

pub use document::Document;
pub use node::{Node, NodeKey, ROOT_KEY};
