//! Shared fixtures for integration tests
#![allow(dead_code)]

use outline_core::db::{flatten, reload};
use outline_core::operations::{dedent, indent, move_down, move_up, split, Outcome, Result};
use outline_core::tree::{sanitize, PositionGenerator};
use outline_core::{Document, Node, ROOT_KEY};

pub const MAX_DEPTH: i32 = 10;

/// Sample outline, two spaces per level below the root.
///
/// Line numbers are sequence indices (the root is index 0): `Welcome` is 1,
/// `Every bullet is a document.` is 3, `Things to try` is 9.
const SAMPLE_OUTLINE: &str = "\
Welcome
  Bullets hold everything
  Every bullet is a document.
  Getting around
    Keyboard
      Tab to indent
      Shift+Tab to dedent
    Learn more
      Things to try
        Zoom into any bullet
        Collapse long lists
        Complete a task
          Completed tasks fade out
        Bookmark where you are
        Move items with the keyboard
        Split a line with enter
        Delete empty bullets
        Expand everything at once
        Collapse everything at once
        Tag things with #hashtags
        Share a bullet
      Things real people have done with it
        Wrote a novel
        Planned a wedding
        Ran a product launch
        Kept a daily journal
        Organized a move
        Tracked a renovation
        Drafted a thesis
        Managed a reading list
      Keyboard shortcuts
        Enter splits a line
        Tab indents
        Shift+Tab dedents
        Ctrl+Up moves up
        Ctrl+Down moves down
        Ctrl+Space collapses
        Alt+Right zooms in
        Alt+Left zooms out
        Ctrl+Enter completes
      Questions
        Is there a mobile app?
        Can I export?
        Does it sync?
        Is it free?
        How do I share?
        Where is my data?
        Can I undo?
        Who made this?
";

/// Key of the node at sequence index `index` in the sample outline
pub fn key(index: usize) -> String {
    if index == 0 {
        ROOT_KEY.to_string()
    } else {
        format!("n{:02}", index)
    }
}

/// Build a document from an indented listing.
///
/// Siblings get `pos_at(1)`, `pos_at(2)`, ... in listing order; the result is
/// run through the sanitizer so every cache field is consistent.
pub fn parse_outline(listing: &str) -> Document {
    let mut nodes = vec![Node::root(ROOT_KEY)];
    // (parent key, children seen so far) per open level
    let mut open: Vec<(String, i64)> = vec![(ROOT_KEY.to_string(), 0)];

    for (index, line) in listing.lines().filter(|l| !l.trim().is_empty()).enumerate() {
        let indent = line.len() - line.trim_start().len();
        let level = indent / 2 + 1;
        open.truncate(level);

        let (parent, count) = open.last_mut().expect("indentation skips a level");
        *count += 1;
        let node_key = key(index + 1);
        nodes.push(
            Node::with_key(node_key.clone(), line.trim())
                .with_parent(parent.clone(), PositionGenerator::at(*count)),
        );
        open.push((node_key, 0));
    }

    Document::from_nodes(sanitize(&nodes, ROOT_KEY).unwrap()).unwrap()
}

/// The 50-node sample outline
pub fn sample_outline() -> Document {
    parse_outline(SAMPLE_OUTLINE)
}

pub fn index_of(doc: &Document, key: &str) -> usize {
    doc.index_of(key).expect("key in document")
}

pub fn text_at(doc: &Document, index: usize) -> &str {
    &doc.nodes()[index].text
}

/// Unwrap an applied outcome and check the document invariants
pub fn applied(outcome: Result<Outcome>) -> Document {
    let document = outcome.unwrap().applied().expect("operation applied").document;
    document.check_invariants().unwrap();
    document
}

/// A structural edit addressed by sequence index, as a user would apply it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    Indent(usize),
    Dedent(usize),
    MoveUp(usize),
    MoveDown(usize),
    Split(usize, usize),
}

/// Apply `edit` to `doc`; refusals keep the document as it is
pub fn apply_edit(doc: &Document, edit: Edit) -> Result<Document> {
    let pick = |index: usize| doc.nodes()[1 + index % (doc.len() - 1)].key.clone();
    let outcome = match edit {
        Edit::Indent(i) => indent(doc, &pick(i), ROOT_KEY, MAX_DEPTH)?,
        Edit::Dedent(i) => dedent(doc, &pick(i), ROOT_KEY, MAX_DEPTH)?,
        Edit::MoveUp(i) => move_up(doc, &pick(i), ROOT_KEY)?,
        Edit::MoveDown(i) => move_down(doc, &pick(i), ROOT_KEY)?,
        Edit::Split(i, offset) => split(doc, &pick(i), offset, ROOT_KEY)?,
    };
    Ok(match outcome {
        Outcome::Applied(transition) => transition.document,
        Outcome::Refused(_) => doc.clone(),
    })
}

/// Whether the document after `edits` survives a flatten/reload round trip
/// unchanged
pub fn round_trips(start: &Document, edits: &[Edit]) -> bool {
    let mut doc = start.clone();
    for &edit in edits {
        doc = match apply_edit(&doc, edit) {
            Ok(doc) => doc,
            Err(_) => return false,
        };
    }
    if doc.check_invariants().is_err() {
        return false;
    }
    match reload(&outline_core::db::MemoryStore::new(flatten(doc.nodes())), doc.root_key()) {
        Ok(reloaded) => reloaded == doc.nodes(),
        Err(_) => false,
    }
}

/// Binary-search the shortest prefix of `edits` that breaks the round trip.
///
/// Returns `None` when the full session round-trips.
pub fn minimal_failing_prefix(start: &Document, edits: &[Edit]) -> Option<usize> {
    if round_trips(start, edits) {
        return None;
    }
    let (mut good, mut bad) = (0, edits.len());
    while bad - good > 1 {
        let mid = (good + bad) / 2;
        if round_trips(start, &edits[..mid]) {
            good = mid;
        } else {
            bad = mid;
        }
    }
    Some(bad)
}
