//! Services
//!
//! - `OutlineService` - owns the editor state and is the single path through
//!   which actions mutate the document

pub mod outline_service;

pub use outline_service::{Action, EditorState, OutlineService};
