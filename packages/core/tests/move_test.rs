//! Integration tests for move up / move down on the sample outline

mod common;

use common::{applied, index_of, key, sample_outline};
use outline_core::operations::{move_down, move_up, Refusal};
use outline_core::tree::BASE_POS;

#[test]
fn test_move_up_swaps_with_previous_sibling_and_carries_subtree() {
    let doc = sample_outline();
    let doc = applied(move_up(&doc, &key(4), "root"));

    assert_eq!(index_of(&doc, &key(4)), 3);
    assert_eq!(index_of(&doc, &key(49)), 48);
    assert_eq!(index_of(&doc, &key(3)), 49);
    assert_eq!(doc.get(&key(4)).unwrap().pos, 2 * BASE_POS);
    assert_eq!(doc.get(&key(3)).unwrap().pos, 3 * BASE_POS);
}

#[test]
fn test_move_down_swaps_with_next_sibling() {
    let doc = sample_outline();
    let doc = applied(move_down(&doc, &key(2), "root"));

    assert_eq!(index_of(&doc, &key(3)), 2);
    assert_eq!(index_of(&doc, &key(2)), 3);
}

#[test]
fn test_move_up_first_child_enters_childless_uncle() {
    let doc = sample_outline();
    let doc = applied(move_up(&doc, &key(5), "root"));

    let node = doc.get(&key(5)).unwrap();
    assert_eq!(node.parent_id.as_deref(), Some(key(3).as_str()));
    assert_eq!(node.pos, BASE_POS);
    assert_eq!(node.depth, 3);
    assert_eq!(index_of(&doc, &key(5)), 4);
    assert_eq!(index_of(&doc, &key(7)), 6);
    assert_eq!(index_of(&doc, &key(4)), 7);
    assert!(doc.get(&key(3)).unwrap().has_children);
}

#[test]
fn test_move_down_last_child_enters_next_uncle_first() {
    let doc = sample_outline();
    let doc = applied(move_down(&doc, &key(7), "root"));

    let node = doc.get(&key(7)).unwrap();
    assert_eq!(node.parent_id.as_deref(), Some(key(8).as_str()));
    assert_eq!(node.pos, BASE_POS / 2);
    assert_eq!(node.depth, 4);
    assert_eq!(index_of(&doc, &key(8)), 7);
    assert_eq!(index_of(&doc, &key(7)), 8);
    assert_eq!(index_of(&doc, &key(9)), 9);
}

#[test]
fn test_moves_are_refused_at_the_edges() {
    let doc = sample_outline();

    assert_eq!(
        move_up(&doc, &key(1), "root").unwrap().refusal(),
        Some(Refusal::NothingToSwap)
    );
    assert_eq!(
        move_down(&doc, &key(1), "root").unwrap().refusal(),
        Some(Refusal::NothingToSwap)
    );
}

#[test]
fn test_moves_stay_inside_zoomed_subtree() {
    let doc = sample_outline();

    // first child of the zoom root would land under the previous section
    assert_eq!(
        move_up(&doc, &key(42), &key(41)).unwrap().refusal(),
        Some(Refusal::EscapesZoom)
    );
    // last child of the zoom root has nowhere to go
    assert_eq!(
        move_down(&doc, &key(30), &key(22)).unwrap().refusal(),
        Some(Refusal::EscapesZoom)
    );
    // siblings inside the zoom still swap
    let doc = applied(move_down(&doc, &key(48), &key(41)));
    assert_eq!(index_of(&doc, &key(49)), 48);
}
