//! Integration tests for indent and dedent on the sample outline
//!
//! Tests cover:
//! - Depth, parent and position after indent/dedent
//! - Subtrees travelling with the moved node
//! - Zoom boundary and depth limit refusals
//! - Indent followed by dedent restoring a leaf

mod common;

use common::{applied, index_of, key, sample_outline, text_at, MAX_DEPTH};
use outline_core::operations::{dedent, indent, Refusal};
use outline_core::tree::{depth_of, is_within, BASE_POS};

// =========================================================================
// Indent
// =========================================================================

#[test]
fn test_indent_moves_under_previous_sibling() {
    let doc = sample_outline();
    let node = &doc.nodes()[3];
    assert_eq!(node.depth, 2);
    assert_eq!(node.parent_id.as_deref(), Some(key(1).as_str()));
    assert_eq!(node.pos, 2 * BASE_POS);

    let doc = applied(indent(&doc, &key(3), "root", MAX_DEPTH));
    let node = &doc.nodes()[3];
    assert_eq!(node.key, key(3));
    assert_eq!(node.depth, 3);
    assert_eq!(node.parent_id.as_deref(), Some(key(2).as_str()));
    assert_eq!(node.pos, BASE_POS);
    assert!(doc.get(&key(2)).unwrap().has_children);
}

#[test]
fn test_indent_appends_after_existing_children() {
    let doc = sample_outline();
    assert_eq!(doc.nodes()[22].parent_id.as_deref(), Some(key(8).as_str()));
    assert_eq!(doc.nodes()[22].pos, 2 * BASE_POS);

    let doc = applied(indent(&doc, &key(22), "root", MAX_DEPTH));
    let node = doc.get(&key(22)).unwrap();
    assert_eq!(node.parent_id.as_deref(), Some(key(9).as_str()));
    assert_eq!(node.pos, 12 * BASE_POS);
    // its own children come along one level deeper
    assert_eq!(doc.get(&key(23)).unwrap().depth, 6);
    assert_eq!(index_of(&doc, &key(22)), 22);
}

#[test]
fn test_indent_first_child_is_refused() {
    let doc = sample_outline();
    assert_eq!(doc.nodes()[9].depth, 4);

    let outcome = indent(&doc, &key(9), "root", MAX_DEPTH).unwrap();
    assert_eq!(outcome.refusal(), Some(Refusal::IndentTooDeep));
}

#[test]
fn test_indent_refused_at_zoom_boundary() {
    let doc = sample_outline();

    // the zoom root itself
    let outcome = indent(&doc, &key(3), &key(3), MAX_DEPTH).unwrap();
    assert_eq!(outcome.refusal(), Some(Refusal::AtZoomBoundary));

    // first child of the zoom root has nothing to indent under
    let outcome = indent(&doc, &key(10), &key(9), MAX_DEPTH).unwrap();
    assert!(outcome.refusal().is_some());
    assert_eq!(doc.nodes()[10].depth, 5);
}

#[test]
fn test_indent_respects_max_depth() {
    let doc = sample_outline();
    assert_eq!(depth_of(doc.nodes(), &key(11), None), 4);

    let outcome = indent(&doc, &key(11), "root", 4).unwrap();
    assert_eq!(outcome.refusal(), Some(Refusal::MaxDepthReached));
    assert!(indent(&doc, &key(11), "root", 5).unwrap().is_applied());
}

// =========================================================================
// Dedent
// =========================================================================

#[test]
fn test_dedent_leaf_follows_old_parent() {
    let doc = sample_outline();
    let doc = applied(dedent(&doc, &key(3), "root", MAX_DEPTH));

    let node = &doc.nodes()[49];
    assert_eq!(node.key, key(3));
    assert_eq!(node.depth, 1);
    assert_eq!(node.parent_id.as_deref(), Some("root"));
    assert_eq!(node.pos, 2 * BASE_POS);
    assert_eq!(text_at(&doc, 49), "Every bullet is a document.");
}

#[test]
fn test_dedent_carries_subtree_after_old_parents_run() {
    let doc = sample_outline();
    let doc = applied(dedent(&doc, &key(9), "root", MAX_DEPTH));

    assert_eq!(text_at(&doc, 37), "Things to try");
    let node = &doc.nodes()[37];
    assert_eq!(node.parent_id.as_deref(), Some(key(4).as_str()));
    assert_eq!(node.depth, 3);
    assert_eq!(node.pos, 3 * BASE_POS);
    // grandchild keeps its place under its own parent
    assert_eq!(doc.nodes()[41].key, key(13));
    assert_eq!(doc.nodes()[41].depth, 5);
}

#[test]
fn test_dedent_refused_at_zoom_boundary() {
    let doc = sample_outline();

    let outcome = dedent(&doc, &key(3), &key(3), MAX_DEPTH).unwrap();
    assert_eq!(outcome.refusal(), Some(Refusal::AtZoomBoundary));

    let outcome = dedent(&doc, &key(10), &key(9), MAX_DEPTH).unwrap();
    assert_eq!(outcome.refusal(), Some(Refusal::AtZoomBoundary));

    let outcome = dedent(&doc, &key(1), "root", MAX_DEPTH).unwrap();
    assert_eq!(outcome.refusal(), Some(Refusal::AtZoomBoundary));
}

#[test]
fn test_dedent_inside_zoom_is_allowed_below_first_level() {
    let doc = sample_outline();
    let doc = applied(dedent(&doc, &key(13), &key(9), MAX_DEPTH));
    let node = doc.get(&key(13)).unwrap();
    assert_eq!(node.parent_id.as_deref(), Some(key(9).as_str()));
    assert_eq!(node.depth, 5);
}

// =========================================================================
// Inverse
// =========================================================================

#[test]
fn test_indent_then_dedent_restores_leaf() {
    let original = sample_outline();
    let doc = applied(indent(&original, &key(3), "root", MAX_DEPTH));
    let doc = applied(dedent(&doc, &key(3), "root", MAX_DEPTH));

    assert_eq!(doc, original);
}

// =========================================================================
// Zoomed depth
// =========================================================================

#[test]
fn test_zoomed_depth_is_relative_to_zoom_root() {
    let doc = sample_outline();
    let zoom = key(9);
    let zoom_depth = doc.get(&zoom).unwrap().depth;

    assert_eq!(depth_of(doc.nodes(), &key(10), Some(&zoom)), 0);
    assert_eq!(depth_of(doc.nodes(), &key(13), Some(&zoom)), 1);

    for node in doc.nodes().iter().filter(|node| node.key != zoom) {
        if is_within(doc.nodes(), &node.key, &zoom) {
            assert_eq!(
                depth_of(doc.nodes(), &node.key, Some(&zoom)),
                node.depth - zoom_depth - 1,
                "{}",
                node.key
            );
        }
    }
}
