//! Test removing from a two-level tree: plain removal, rotations and merges.

use crate::scenario_tests::helpers::*;

#[test]
fn test_remove_from_root_without_rebalance() {
    let mut tree = tree_with_keys(MIN_ITEMS, ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);
    assert_shape(&tree, &ten_keys());

    remove_present(&mut tree, "7");

    assert_shape(
        &tree,
        &internal(
            &["2", "5"],
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "8", "9"])],
        ),
    );
}

#[test]
fn test_remove_from_root_and_rotate_left() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["2", "5"],
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7", "8"])],
        ),
    );

    remove_present(&mut tree, "5");

    assert_shape(
        &tree,
        &internal(
            &["2", "6"],
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["7", "8"])],
        ),
    );
}

#[test]
fn test_remove_from_root_and_rotate_right() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["3", "6"],
            vec![leaf(&["0", "1", "2"]), leaf(&["4", "5"]), leaf(&["7", "8"])],
        ),
    );

    remove_present(&mut tree, "6");

    assert_shape(
        &tree,
        &internal(
            &["2", "5"],
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["7", "8"])],
        ),
    );
}

/// The under-capacity node is the leftmost child, so its right sibling
/// merges into it.
#[test]
fn test_remove_from_root_and_merge_to_unbalanced() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["2", "5"],
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
        ),
    );

    remove_present(&mut tree, "2");

    assert_shape(
        &tree,
        &internal(&["5"], vec![leaf(&["0", "1", "3", "4"]), leaf(&["6", "7"])]),
    );
}

/// The under-capacity node has a left sibling, so it merges into that one.
#[test]
fn test_remove_from_root_and_merge_from_unbalanced() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["2", "5"],
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
        ),
    );

    remove_present(&mut tree, "5");

    assert_shape(
        &tree,
        &internal(&["4"], vec![leaf(&["0", "1", "2", "3"]), leaf(&["6", "7"])]),
    );
}
