//! Test putting enough keys to split the root.

use crate::scenario_tests::helpers::*;

#[test]
fn test_add_multiple() {
    let tree = tree_with_keys(MIN_ITEMS, ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"]);

    assert_shape(&tree, &ten_keys());
    assert_eq!(tree.height(), 2);
}

#[test]
fn test_fifth_key_grows_tree() {
    let mut tree = tree_with_keys(MIN_ITEMS, ["0", "1", "2", "3"]);
    assert_shape(&tree, &leaf(&["0", "1", "2", "3"]));

    tree.put("4".to_string(), "4".to_string());

    assert_shape(
        &tree,
        &internal(&["2"], vec![leaf(&["0", "1"]), leaf(&["3", "4"])]),
    );
}

#[test]
fn test_add_reverse_order() {
    let tree = tree_with_keys(MIN_ITEMS, ["9", "8", "7", "6", "5", "4", "3", "2", "1", "0"]);

    assert_shape(
        &tree,
        &internal(
            &["4", "7"],
            vec![leaf(&["0", "1", "2", "3"]), leaf(&["5", "6"]), leaf(&["8", "9"])],
        ),
    );
}
