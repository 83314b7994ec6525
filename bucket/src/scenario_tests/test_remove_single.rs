//! Test removing the only key from a tree.

use crate::btree::TreeError;
use crate::scenario_tests::helpers::*;

#[test]
fn test_remove_from_root_single_element() {
    let mut tree = tree_with_keys(MIN_ITEMS, ["0"]);
    assert_shape(&tree, &leaf(&["0"]));

    remove_present(&mut tree, "0");

    assert_shape(&tree, &leaf(&[]));
    assert!(tree.is_empty());
}

#[test]
fn test_remove_twice() {
    let mut tree = tree_with_keys(MIN_ITEMS, ["0"]);

    remove_present(&mut tree, "0");

    assert_eq!(tree.remove("0"), Err(TreeError::KeyNotFound));
    assert_shape(&tree, &leaf(&[]));
}
