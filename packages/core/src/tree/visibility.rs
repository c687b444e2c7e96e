//! Per-render-pass visibility
//!
//! A node is shown when it is the zoom root or lies inside the zoom root's
//! subtree with no collapsed ancestor strictly below the zoom root. The
//! answer for all children of a parent is the same, so a [`VisibilityPass`]
//! memoizes it per parent key.
//!
//! The memo borrows the sequence it was built from and is dropped with it: it
//! cannot outlive one rendering pass, so it never goes stale.

use std::collections::HashMap;

use crate::models::Node;
use crate::tree::subtree::find;

/// Visibility memo for one pass over one sequence
pub struct VisibilityPass<'a> {
    nodes: &'a [Node],
    zoom_root: &'a str,
    children_shown: HashMap<&'a str, bool>,
}

impl<'a> VisibilityPass<'a> {
    pub fn new(nodes: &'a [Node], zoom_root: &'a str) -> Self {
        Self {
            nodes,
            zoom_root,
            children_shown: HashMap::new(),
        }
    }

    /// Whether `key` should be hidden in the rendered view
    pub fn is_hidden(&mut self, key: &str) -> bool {
        if key == self.zoom_root {
            return false;
        }
        match find(self.nodes, key).and_then(|node| node.parent_id.as_deref()) {
            Some(parent) => !self.shows_children_of(parent),
            None => true,
        }
    }

    /// Keys of every visible node, in sequence order
    pub fn visible_keys(&mut self) -> Vec<&'a str> {
        let nodes = self.nodes;
        nodes
            .iter()
            .filter(|node| match node.parent_id.as_deref() {
                _ if node.key == self.zoom_root => true,
                Some(parent) => self.shows_children_of(parent),
                None => false,
            })
            .map(|node| node.key.as_str())
            .collect()
    }

    /// Number of distinct parents resolved so far
    #[cfg(test)]
    fn memo_len(&self) -> usize {
        self.children_shown.len()
    }

    fn shows_children_of(&mut self, parent: &str) -> bool {
        // walk up until a memoized answer, the zoom root, or the top of the tree
        let mut path: Vec<&'a str> = Vec::new();
        let mut current = find(self.nodes, parent);
        let mut answer = false;
        while let Some(node) = current {
            let key = node.key.as_str();
            if let Some(&known) = self.children_shown.get(key) {
                answer = known;
                break;
            }
            if key == self.zoom_root {
                answer = true;
                break;
            }
            if path.len() >= self.nodes.len() {
                break;
            }
            path.push(key);
            current = node.parent_id.as_deref().and_then(|p| find(self.nodes, p));
        }

        // unwind: each level shows its children iff its parent does and it is expanded
        for key in path.into_iter().rev() {
            let collapsed = find(self.nodes, key).map_or(true, |node| node.collapsed);
            answer = answer && !collapsed;
            self.children_shown.insert(key, answer);
        }
        answer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // root
    //   a (collapsed)
    //     a1
    //       a1x
    //   b
    //     b1
    fn sample() -> Vec<Node> {
        let mut a = Node::with_key("a", "A").with_parent("root", 100).with_depth(1);
        a.collapsed = true;
        vec![
            Node::root("root"),
            a,
            Node::with_key("a1", "A1").with_parent("a", 100).with_depth(2),
            Node::with_key("a1x", "A1x").with_parent("a1", 100).with_depth(3),
            Node::with_key("b", "B").with_parent("root", 200).with_depth(1),
            Node::with_key("b1", "B1").with_parent("b", 100).with_depth(2),
        ]
    }

    #[test]
    fn test_collapsed_subtree_is_hidden() {
        let nodes = sample();
        let mut pass = VisibilityPass::new(&nodes, "root");
        assert!(!pass.is_hidden("a"));
        assert!(pass.is_hidden("a1"));
        assert!(pass.is_hidden("a1x"));
        assert!(!pass.is_hidden("b1"));
        assert_eq!(pass.visible_keys(), vec!["root", "a", "b", "b1"]);
    }

    #[test]
    fn test_zoom_scope() {
        let nodes = sample();
        let mut pass = VisibilityPass::new(&nodes, "a1");
        // the collapsed ancestor sits above the zoom root
        assert!(!pass.is_hidden("a1x"));
        assert!(!pass.is_hidden("a1"));
        assert!(pass.is_hidden("b"));
        assert!(pass.is_hidden("root"));
        assert_eq!(pass.visible_keys(), vec!["a1", "a1x"]);
    }

    #[test]
    fn test_memo_is_keyed_by_parent() {
        let nodes = sample();
        let mut pass = VisibilityPass::new(&nodes, "root");
        pass.is_hidden("a1x");
        // a1 and a were resolved on the way up
        assert_eq!(pass.memo_len(), 2);
        pass.is_hidden("a1");
        assert_eq!(pass.memo_len(), 2);
    }

    #[test]
    fn test_unknown_key_is_hidden() {
        let nodes = sample();
        let mut pass = VisibilityPass::new(&nodes, "root");
        assert!(pass.is_hidden("nope"));
    }
}
