//! Test putting one key into an empty tree.

use crate::scenario_tests::helpers::*;

#[test]
fn test_add_single() {
    let tree = tree_with_keys(MIN_ITEMS, ["0"]);

    assert_shape(&tree, &leaf(&["0"]));
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.get("0"), Some(&"0".to_string()));
}
