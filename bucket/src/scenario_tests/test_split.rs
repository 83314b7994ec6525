//! Test splitting a full leaf into a root with spare room.

use crate::scenario_tests::helpers::*;

#[test]
fn test_add_and_rebalance_split() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(&["4"], vec![leaf(&["0", "1", "2", "3"]), leaf(&["5", "6", "7", "8"])]),
    );

    tree.put("9".to_string(), "9".to_string());

    assert_shape(
        &tree,
        &internal(
            &["4", "7"],
            vec![leaf(&["0", "1", "2", "3"]), leaf(&["5", "6"]), leaf(&["8", "9"])],
        ),
    );
    assert_eq!(tree.height(), 2);
}

#[test]
fn test_split_propagates_to_new_root() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["2", "5", "8", "b"],
            vec![
                leaf(&["0", "1"]),
                leaf(&["3", "4"]),
                leaf(&["6", "7"]),
                leaf(&["9", "a"]),
                leaf(&["c", "d", "e", "f"]),
            ],
        ),
    );

    tree.put("g".to_string(), "g".to_string());

    assert_shape(
        &tree,
        &internal(
            &["8"],
            vec![
                internal(
                    &["2", "5"],
                    vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
                ),
                internal(
                    &["b", "e"],
                    vec![leaf(&["9", "a"]), leaf(&["c", "d"]), leaf(&["f", "g"])],
                ),
            ],
        ),
    );
    assert_eq!(tree.height(), 3);
}
