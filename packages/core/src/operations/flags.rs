//! Completion and bookmark flags

use crate::models::Document;
use crate::operations::{applied, refuse, Outcome, Refusal, Result};
use crate::tree::subtree::subtree_range;

/// Flip `completed` on `key`; every descendant takes the node's new value.
///
/// Nodes with blank text are never completed.
pub fn toggle_completion(doc: &Document, key: &str) -> Result<Outcome> {
    const OP: &str = "toggle_completion";
    let range = match subtree_range(doc.nodes(), key) {
        Some(range) => range,
        None => return refuse(OP, key, Refusal::UnknownNode),
    };
    let target = &doc.nodes()[range.start];
    if target.is_root() {
        return refuse(OP, key, Refusal::TargetIsRoot);
    }
    if target.is_blank() {
        return refuse(OP, key, Refusal::BlankText);
    }

    let completed = !target.completed;
    let mut next = doc.nodes().to_vec();
    for node in &mut next[range] {
        node.completed = completed;
    }
    applied(next, None)
}

/// Flip `bookmarked` on the zoom root
pub fn toggle_bookmark(doc: &Document, zoom_root: &str) -> Result<Outcome> {
    const OP: &str = "toggle_bookmark";
    if zoom_root == doc.root_key() {
        return refuse(OP, zoom_root, Refusal::NotZoomed);
    }
    let index = match doc.index_of(zoom_root) {
        Some(index) => index,
        None => return refuse(OP, zoom_root, Refusal::UnknownNode),
    };

    let mut next = doc.nodes().to_vec();
    next[index].bookmarked = !next[index].bookmarked;
    applied(next, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn doc() -> Document {
        let mut a1 = Node::with_key("a1", "A1").with_parent("a", 1);
        a1.completed = true;
        let nodes = vec![
            Node::root("root"),
            Node::with_key("a", "A").with_parent("root", 1),
            a1,
            Node::with_key("b", "   ").with_parent("root", 2),
        ];
        Document::from_nodes(crate::tree::sanitize(&nodes, "root").unwrap()).unwrap()
    }

    #[test]
    fn test_toggle_completion_propagates_to_descendants() {
        let result = toggle_completion(&doc(), "a").unwrap().applied().unwrap().document;
        assert!(result.get("a").unwrap().completed);
        assert!(result.get("a1").unwrap().completed);
        assert!(!result.get("b").unwrap().completed);

        let result = toggle_completion(&result, "a").unwrap().applied().unwrap().document;
        assert!(!result.get("a").unwrap().completed);
        assert!(!result.get("a1").unwrap().completed);
    }

    #[test]
    fn test_toggle_completion_refuses_blank_text() {
        assert_eq!(
            toggle_completion(&doc(), "b").unwrap().refusal(),
            Some(Refusal::BlankText)
        );
    }

    #[test]
    fn test_toggle_bookmark() {
        let doc = doc();
        assert_eq!(
            toggle_bookmark(&doc, "root").unwrap().refusal(),
            Some(Refusal::NotZoomed)
        );

        let result = toggle_bookmark(&doc, "a").unwrap().applied().unwrap().document;
        assert!(result.get("a").unwrap().bookmarked);
        let result = toggle_bookmark(&result, "a").unwrap().applied().unwrap().document;
        assert!(!result.get("a").unwrap().bookmarked);
    }
}
