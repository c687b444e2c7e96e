//! Error types for the outline engine
//!
//! Only contract violations and data corruption are errors. An operation whose
//! preconditions are unmet (indent at the zoom boundary, delete of a non-leaf,
//! ...) is not an error: it is reported as [`Outcome::Refused`] and leaves the
//! document untouched.
//!
//! [`Outcome::Refused`]: crate::operations::Outcome::Refused

use thiserror::Error;

/// Errors raised by the tree primitives and mutation operations
///
/// # Examples
///
/// ```rust
/// use outline_core::operations::OutlineError;
///
/// let err = OutlineError::parent_not_found("n-42".to_string());
/// assert_eq!(
///     err.to_string(),
///     "Cannot reconcile parent 'n-42': not present in the sequence"
/// );
/// ```
#[derive(Error, Debug)]
pub enum OutlineError {
    /// The reconciler was asked to rebuild a parent absent from the sequence
    #[error("Cannot reconcile parent '{key}': not present in the sequence")]
    ParentNotFound { key: String },

    /// The designated root is missing from a document being loaded
    #[error("Root node '{key}' not found")]
    RootNotFound { key: String },

    /// A document must contain at least its root
    #[error("Document has no nodes")]
    EmptyDocument,

    /// The first node of a document must be a parentless root
    #[error("Node '{key}' cannot be the document root: it has a parent")]
    InvalidRoot { key: String },

    /// Structural repair detected inconsistent data (cycles, lost or overlapping runs)
    #[error("Corrupt tree: {reason}")]
    CorruptTree { reason: String },

    /// No order key fits between two siblings even after renumbering
    #[error("No position available among children of '{parent}'")]
    PositionExhausted { parent: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl OutlineError {
    /// Create a ParentNotFound error
    pub fn parent_not_found(key: String) -> Self {
        Self::ParentNotFound { key }
    }

    /// Create a RootNotFound error
    pub fn root_not_found(key: String) -> Self {
        Self::RootNotFound { key }
    }

    /// Create an InvalidRoot error
    pub fn invalid_root(key: String) -> Self {
        Self::InvalidRoot { key }
    }

    /// Create a CorruptTree error
    pub fn corrupt_tree(reason: impl Into<String>) -> Self {
        Self::CorruptTree {
            reason: reason.into(),
        }
    }

    /// Create a PositionExhausted error
    pub fn position_exhausted(parent: String) -> Self {
        Self::PositionExhausted { parent }
    }
}

/// Result alias used across the engine
pub type Result<T> = std::result::Result<T, OutlineError>;
