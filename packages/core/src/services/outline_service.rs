//! Outline Service - single dispatch path
//!
//! [`OutlineService`] owns the editor state (document, zoom root and focused
//! node) and applies [`Action`]s to it one at a time. Every mutation goes
//! through [`OutlineService::dispatch`], which runs the pure operation against
//! the current document and swaps the result in only when it was applied.
//!
//! Persistence is decoupled: [`OutlineService::persist`] hands an immutable
//! [`Snapshot`] to a [`SnapshotStore`] and skips the save when nothing changed
//! since the last one.
//!
//! # Examples
//!
//! ```rust
//! use outline_core::config::OutlineConfig;
//! use outline_core::services::{Action, OutlineService};
//!
//! let mut service = OutlineService::new(OutlineConfig::default());
//! service.dispatch(Action::AppendChild).unwrap();
//! service.dispatch(Action::Indent).unwrap();
//!
//! assert_eq!(service.revision(), 2);
//! assert_eq!(service.document().len(), 3);
//! ```

use tracing::{debug, info};

use crate::config::OutlineConfig;
use crate::db::{Snapshot, SnapshotStore};
use crate::models::{Document, NodeKey};
use crate::operations::{self, Outcome, Refusal, Result, Transition};
use crate::tree::sanitize;

/// What the editor currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub document: Document,
    /// Root key when not zoomed
    pub zoom_root: NodeKey,
    pub focus: NodeKey,
}

/// A user intent, applied to the focused node unless it names its own target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Indent,
    Dedent,
    MoveUp,
    MoveDown,
    /// Enter at character `offset` of the focused node
    Split { offset: usize },
    /// Collapse `key`, or the focused node
    Collapse { key: Option<NodeKey> },
    /// Expand `key`, or the focused node
    Expand { key: Option<NodeKey> },
    ExpandAll,
    CollapseAll,
    ToggleCompletion,
    DeleteCurrentItem,
    /// Zoom into `key`; `None` zooms out to the root
    Zoom { key: Option<NodeKey> },
    /// Toggle the bookmark on the zoom root
    Bookmark,
    /// Append an empty node at the end of the zoom root's children
    AppendChild,
    Focus { key: NodeKey },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Indent => "indent",
            Action::Dedent => "dedent",
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::Split { .. } => "split",
            Action::Collapse { .. } => "collapse",
            Action::Expand { .. } => "expand",
            Action::ExpandAll => "expand_all",
            Action::CollapseAll => "collapse_all",
            Action::ToggleCompletion => "toggle_completion",
            Action::DeleteCurrentItem => "delete",
            Action::Zoom { .. } => "zoom",
            Action::Bookmark => "bookmark",
            Action::AppendChild => "append_child",
            Action::Focus { .. } => "focus",
        }
    }
}

pub struct OutlineService {
    config: OutlineConfig,
    state: EditorState,
    revision: u64,
    saved_revision: Option<u64>,
}

impl OutlineService {
    /// Start from an empty slate: the root and one empty node holding focus
    pub fn new(config: OutlineConfig) -> Self {
        let document = Document::empty_slate();
        let focus = first_content_key(&document);
        let zoom_root = document.root_key().to_string();
        Self::with_state(
            config,
            EditorState {
                document,
                zoom_root,
                focus,
            },
        )
    }

    /// Load a stored snapshot.
    ///
    /// The records are reloaded into sequence order, repaired by the sanitizer
    /// and given an empty content node when none survived.
    pub fn load(config: OutlineConfig, snapshot: &Snapshot) -> Result<Self> {
        config.validate()?;
        let nodes = snapshot.restore()?;
        let mut document = Document::from_nodes(sanitize(&nodes, &snapshot.root_key)?)?;

        if document.content().is_empty() {
            let root = document.root_key().to_string();
            if let Outcome::Applied(transition) = operations::append_child(&document, &root)? {
                document = transition.document;
            }
        }

        info!(
            root = %snapshot.root_key,
            nodes = document.len(),
            "outline loaded"
        );

        let focus = first_content_key(&document);
        let zoom_root = document.root_key().to_string();
        Ok(Self::with_state(
            config,
            EditorState {
                document,
                zoom_root,
                focus,
            },
        ))
    }

    fn with_state(config: OutlineConfig, state: EditorState) -> Self {
        Self {
            config,
            state,
            revision: 0,
            saved_revision: None,
        }
    }

    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document(&self) -> &Document {
        &self.state.document
    }

    pub fn zoom_root(&self) -> &str {
        &self.state.zoom_root
    }

    pub fn focus(&self) -> &str {
        &self.state.focus
    }

    /// Number of applied actions since construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Whether the state has moved since the last successful save
    pub fn is_dirty(&self) -> bool {
        self.saved_revision != Some(self.revision)
    }

    /// Apply `action` to the current state.
    ///
    /// A refused action leaves state and revision untouched. An error means the
    /// operation found corrupt data; the state is left untouched as well.
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome<()>> {
        let state = &self.state;
        let doc = &state.document;
        let focus = state.focus.as_str();
        let zoom_root = state.zoom_root.as_str();
        let max_depth = self.config.max_depth;

        let outcome = match &action {
            Action::Indent => operations::indent(doc, focus, zoom_root, max_depth)?,
            Action::Dedent => operations::dedent(doc, focus, zoom_root, max_depth)?,
            Action::MoveUp => operations::move_up(doc, focus, zoom_root)?,
            Action::MoveDown => operations::move_down(doc, focus, zoom_root)?,
            Action::Split { offset } => operations::split(doc, focus, *offset, zoom_root)?,
            Action::Collapse { key } => {
                operations::collapse(doc, key.as_deref().unwrap_or(focus))?
            }
            Action::Expand { key } => operations::expand(doc, key.as_deref().unwrap_or(focus))?,
            Action::ExpandAll => operations::expand_all(doc, zoom_root)?,
            Action::CollapseAll => operations::collapse_all(doc, zoom_root)?,
            Action::ToggleCompletion => operations::toggle_completion(doc, focus)?,
            Action::DeleteCurrentItem => operations::delete(doc, focus, zoom_root)?,
            Action::Bookmark => operations::toggle_bookmark(doc, zoom_root)?,
            Action::AppendChild => operations::append_child(doc, zoom_root)?,
            Action::Zoom { key } => {
                return match operations::zoom(doc, zoom_root, focus, key.as_deref())? {
                    Outcome::Applied(target) => {
                        self.state.zoom_root = target.zoom_root;
                        self.state.focus = target.focus;
                        Ok(self.advance(&action))
                    }
                    Outcome::Refused(reason) => Ok(Outcome::Refused(reason)),
                };
            }
            Action::Focus { key } => {
                if !doc.contains(key) {
                    debug!(operation = "focus", key = %key, "operation refused");
                    return Ok(Outcome::Refused(Refusal::UnknownNode));
                }
                self.state.focus = key.clone();
                return Ok(self.advance(&action));
            }
        };

        match outcome {
            Outcome::Applied(Transition { document, focus }) => {
                self.state.document = document;
                if let Some(focus) = focus {
                    self.state.focus = focus;
                }
                Ok(self.advance(&action))
            }
            Outcome::Refused(reason) => Ok(Outcome::Refused(reason)),
        }
    }

    fn advance(&mut self, action: &Action) -> Outcome<()> {
        self.revision += 1;
        debug!(
            action = action.name(),
            revision = self.revision,
            focus = %self.state.focus,
            "action applied"
        );
        Outcome::Applied(())
    }

    /// Immutable copy of the document for persistence
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state.document)
    }

    /// Save the document unless it is unchanged since the last save.
    ///
    /// Returns whether a save happened.
    pub async fn persist(&mut self, store: &dyn SnapshotStore) -> anyhow::Result<bool> {
        if !self.is_dirty() {
            return Ok(false);
        }
        let revision = self.revision;
        store.save(self.snapshot()).await?;
        self.saved_revision = Some(revision);
        debug!(revision, "outline persisted");
        Ok(true)
    }

    /// Load the document from `store`, or start empty when it holds nothing
    pub async fn open(config: OutlineConfig, store: &dyn SnapshotStore) -> anyhow::Result<Self> {
        let mut service = match store.load().await? {
            Some(snapshot) => Self::load(config, &snapshot)?,
            None => Self::new(config),
        };
        service.saved_revision = Some(service.revision);
        Ok(service)
    }
}

fn first_content_key(document: &Document) -> NodeKey {
    document
        .content()
        .first()
        .map_or_else(|| document.root_key().to_string(), |node| node.key.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemorySnapshotStore;

    fn service() -> OutlineService {
        OutlineService::new(OutlineConfig::default())
    }

    #[test]
    fn test_new_focuses_empty_node() {
        let service = service();
        assert_eq!(service.document().len(), 2);
        assert_eq!(service.focus(), service.document().content()[0].key);
        assert_eq!(service.zoom_root(), "root");
        assert_eq!(service.revision(), 0);
    }

    #[test]
    fn test_refused_action_keeps_revision() {
        let mut service = service();
        let before = service.state().clone();

        let outcome = service.dispatch(Action::Indent).unwrap();
        assert_eq!(outcome.refusal(), Some(Refusal::IndentTooDeep));
        assert_eq!(service.revision(), 0);
        assert_eq!(service.state(), &before);
    }

    #[test]
    fn test_collapse_defaults_to_focus() {
        let mut service = service();
        let first = service.focus().to_string();
        service.dispatch(Action::AppendChild).unwrap();
        service.dispatch(Action::Indent).unwrap();
        service
            .dispatch(Action::Focus { key: first.clone() })
            .unwrap();

        assert!(service.dispatch(Action::Collapse { key: None }).unwrap().is_applied());
        assert!(service.document().get(&first).unwrap().collapsed);
        assert_eq!(
            service.dispatch(Action::Collapse { key: None }).unwrap().refusal(),
            Some(Refusal::AlreadyInState)
        );
    }

    #[test]
    fn test_focus_unknown_key_is_refused() {
        let mut service = service();
        let outcome = service
            .dispatch(Action::Focus {
                key: "missing".to_string(),
            })
            .unwrap();
        assert_eq!(outcome.refusal(), Some(Refusal::UnknownNode));
    }

    #[tokio::test]
    async fn test_persist_skips_unchanged_revision() {
        let store = InMemorySnapshotStore::new();
        let mut service = service();

        assert!(service.persist(&store).await.unwrap());
        assert!(!service.persist(&store).await.unwrap());

        service.dispatch(Action::AppendChild).unwrap();
        assert!(service.persist(&store).await.unwrap());
        assert_eq!(store.save_count().await, 2);
    }
}
