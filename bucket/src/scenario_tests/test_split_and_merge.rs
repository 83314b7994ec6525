//! Test that removing the key that caused a split merges the halves again.

use crate::scenario_tests::helpers::*;

#[test]
fn test_split_and_merge() {
    let before = internal(&["4"], vec![leaf(&["0", "1", "2", "3"]), leaf(&["5", "6", "7", "8"])]);
    let mut tree = tree(MIN_ITEMS, before.clone());

    tree.put("9".to_string(), "9".to_string());
    assert_shape(
        &tree,
        &internal(
            &["4", "7"],
            vec![leaf(&["0", "1", "2", "3"]), leaf(&["5", "6"]), leaf(&["8", "9"])],
        ),
    );

    remove_present(&mut tree, "9");

    assert_shape(&tree, &before);
}
