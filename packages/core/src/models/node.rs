//! Node Data Structures
//!
//! This module defines the `Node` struct, the atomic element of an outline.
//!
//! # Architecture
//!
//! - **Structural truth**: `parent_id` and `pos` define the tree. A node's place
//!   among its siblings is its `pos`, never its index in a sequence.
//! - **Cache fields**: `depth` and `has_children` are derivable from the
//!   `parent_id` chain and are recomputed by every structural operation (or
//!   wholesale by the sanitizer). They exist for render performance.
//! - **Wire format**: serialized in camelCase so a persisted record is
//!   `{key, text, parentId, pos, depth, collapsed, completed, bookmarked, hasChildren}`.
//!
//! # Examples
//!
//! ```rust
//! use outline_core::models::{Node, ROOT_KEY};
//!
//! let root = Node::root(ROOT_KEY);
//! let item = Node::new("Buy milk").with_parent(ROOT_KEY, 100_000).with_depth(1);
//!
//! assert!(root.is_root());
//! assert_eq!(item.parent_id.as_deref(), Some(ROOT_KEY));
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, stable identifier of a node
pub type NodeKey = String;

/// Key of the designated root node of every document
pub const ROOT_KEY: &str = "root";

/// A single bullet of the outline.
///
/// # Fields
///
/// - `key`: Unique identifier, stable for the node's lifetime
/// - `text`: Editable content, owned by the text-editing surface
/// - `parent_id`: Key of the parent; `None` only for the root
/// - `pos`: Order key among siblings sharing the same `parent_id`
/// - `depth`: Cached nesting level (root = 0, its children = 1)
/// - `collapsed`: Hides descendants in the rendered tree
/// - `completed`: Completion flag, inherited on toggle by all descendants
/// - `bookmarked`: Set on a node while it is the active zoom root
/// - `has_children`: Cached; true iff some node names this one as its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub key: NodeKey,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub parent_id: Option<NodeKey>,

    #[serde(default)]
    pub pos: i64,

    #[serde(default)]
    pub depth: i32,

    #[serde(default)]
    pub collapsed: bool,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub bookmarked: bool,

    #[serde(default)]
    pub has_children: bool,
}

impl Node {
    /// Create a detached node with a freshly generated key.
    ///
    /// New nodes always start childless, expanded and not completed.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_key(Uuid::new_v4().to_string(), text)
    }

    /// Create a detached node with an explicit key
    pub fn with_key(key: impl Into<NodeKey>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            parent_id: None,
            pos: 0,
            depth: 0,
            collapsed: false,
            completed: false,
            bookmarked: false,
            has_children: false,
        }
    }

    /// Create a root node. The root is never rendered or edited directly.
    pub fn root(key: impl Into<NodeKey>) -> Self {
        Self::with_key(key, "")
    }

    /// Attach the node under `parent` at order key `pos`
    pub fn with_parent(mut self, parent: impl Into<NodeKey>, pos: i64) -> Self {
        self.parent_id = Some(parent.into());
        self.pos = pos;
        self
    }

    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Whether `parent_id` names `key`
    pub fn is_child_of(&self, key: &str) -> bool {
        self.parent_id.as_deref() == Some(key)
    }

    /// Whether the text is empty once surrounding whitespace is removed
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of characters in the text
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
