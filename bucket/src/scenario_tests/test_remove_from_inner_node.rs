//! Test removing a separator from an inner node of a three-level tree.

use crate::scenario_tests::helpers::*;

#[test]
fn test_remove_from_inner_node_and_rotate_left() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["8"],
            vec![
                internal(
                    &["2", "5"],
                    vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
                ),
                internal(
                    &["b", "e", "h"],
                    vec![
                        leaf(&["9", "a"]),
                        leaf(&["c", "d"]),
                        leaf(&["f", "g"]),
                        leaf(&["i", "j"]),
                    ],
                ),
            ],
        ),
    );

    remove_present(&mut tree, "5");

    assert_shape(
        &tree,
        &internal(
            &["b"],
            vec![
                internal(
                    &["4", "8"],
                    vec![leaf(&["0", "1", "2", "3"]), leaf(&["6", "7"]), leaf(&["9", "a"])],
                ),
                internal(
                    &["e", "h"],
                    vec![leaf(&["c", "d"]), leaf(&["f", "g"]), leaf(&["i", "j"])],
                ),
            ],
        ),
    );
}

#[test]
fn test_remove_from_inner_node_and_rotate_right() {
    let mut tree = tree(
        MIN_ITEMS,
        internal(
            &["b"],
            vec![
                internal(
                    &["2", "5", "8"],
                    vec![
                        leaf(&["0", "1"]),
                        leaf(&["3", "4"]),
                        leaf(&["6", "7"]),
                        leaf(&["9", "a"]),
                    ],
                ),
                internal(
                    &["e", "h"],
                    vec![leaf(&["c", "d"]), leaf(&["f", "g"]), leaf(&["i", "j"])],
                ),
            ],
        ),
    );

    remove_present(&mut tree, "e");

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
                    &["b", "h"],
                    vec![leaf(&["9", "a"]), leaf(&["c", "d", "f", "g"]), leaf(&["i", "j"])],
                ),
            ],
        ),
    );
}

#[test]
fn test_remove_from_inner_node_and_union() {
    let mut tree = tree(MIN_ITEMS, minimal_three_levels());
    assert_eq!(tree.height(), 3);

    remove_present(&mut tree, "2");

    assert_shape(
        &tree,
        &internal(
            &["5", "8", "b", "e"],
            vec![
                leaf(&["0", "1", "3", "4"]),
                leaf(&["6", "7"]),
                leaf(&["9", "a"]),
                leaf(&["c", "d"]),
                leaf(&["f", "g"]),
            ],
        ),
    );
    assert_eq!(tree.height(), 2);
}
