//! Test removing from a leaf at the bottom of a three-level tree.

use crate::scenario_tests::helpers::*;

/// The right sibling's items and everything above stay untouched.
fn right_subtree() -> crate::btree::Node<String, String> {
    internal(
        &["c", "f"],
        vec![leaf(&["a", "b"]), leaf(&["d", "e"]), leaf(&["g", "h"])],
    )
}

#[test]
fn test_remove_from_leaf_and_rotate_left() {
    let mut tree = tree(MIN_ITEMS, spare_middle_leaf());

    remove_present(&mut tree, "1");

    assert_shape(
        &tree,
        &internal(
            &["9"],
            vec![
                internal(
                    &["3", "6"],
                    vec![leaf(&["0", "2"]), leaf(&["4", "5"]), leaf(&["7", "8"])],
                ),
                right_subtree(),
            ],
        ),
    );
}

#[test]
fn test_remove_from_leaf_and_rotate_right() {
    let mut tree = tree(MIN_ITEMS, spare_middle_leaf());

    remove_present(&mut tree, "8");

    assert_shape(
        &tree,
        &internal(
            &["9"],
            vec![
                internal(
                    &["2", "5"],
                    vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
                ),
                right_subtree(),
            ],
        ),
    );
}

#[test]
fn test_remove_from_leaf_and_union() {
    let mut tree = tree(MIN_ITEMS, minimal_three_levels());

    remove_present(&mut tree, "0");

    assert_shape(
        &tree,
        &internal(
            &["5", "8", "b", "e"],
            vec![
                leaf(&["1", "2", "3", "4"]),
                leaf(&["6", "7"]),
                leaf(&["9", "a"]),
                leaf(&["c", "d"]),
                leaf(&["f", "g"]),
            ],
        ),
    );
}

#[test]
fn test_drain_three_levels() {
    let mut tree = tree(MIN_ITEMS, minimal_three_levels());
    let keys: Vec<String> = collect_keys(tree.root())
        .into_iter()
        .map(str::to_string)
        .collect();

    for (removed, key) in keys.iter().enumerate() {
        remove_present(&mut tree, key);
        assert_eq!(tree.len(), keys.len() - removed - 1);
        let remaining: Vec<&str> = keys[removed + 1..].iter().map(String::as_str).collect();
        assert_eq!(collect_keys(tree.root()), remaining);
    }

    assert_shape(&tree, &leaf(&[]));
}
