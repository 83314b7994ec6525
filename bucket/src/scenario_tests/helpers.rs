//! Common helpers for shape tests.

use crate::btree::{Node, Tree};

pub use crate::testing::{collect_keys, internal, leaf, tree, tree_with_keys};

/// Order used by every scenario: nodes hold between 2 and 4 items.
pub const MIN_ITEMS: usize = 2;

pub type StringTree = Tree<String, String>;

/// Assert that `tree` has exactly the layout of `expected`.
pub fn assert_shape(tree: &StringTree, expected: &Node<String, String>) {
    assert_eq!(
        tree.root(),
        expected,
        "tree keys {:?}, expected keys {:?}",
        collect_keys(tree.root()),
        collect_keys(expected)
    );
    assert_eq!(tree.len(), expected.count_items());
}

/// Remove a key that must be present; keys double as values.
pub fn remove_present(tree: &mut StringTree, key: &str) {
    assert_eq!(tree.remove(key), Ok(key.to_string()));
    assert!(tree.find(key).is_none(), "{key} still present after remove");
}

/// The tree `put` builds from keys "0" through "9".
///
/// ```text
///            [2 5]
///   [0 1]   [3 4]   [6 7 8 9]
/// ```
pub fn ten_keys() -> Node<String, String> {
    internal(
        &["2", "5"],
        vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7", "8", "9"])],
    )
}

/// Three levels where every node holds the minimum.
///
/// ```text
///                        [8]
///          [2 5]                     [b e]
///   [0 1] [3 4] [6 7]         [9 a] [c d] [f g]
/// ```
pub fn minimal_three_levels() -> Node<String, String> {
    internal(
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
    )
}

/// Three levels where the left inner node has a leaf with a spare item.
///
/// ```text
///                        [9]
///          [2 6]                       [c f]
///   [0 1] [3 4 5] [7 8]         [a b] [d e] [g h]
/// ```
pub fn spare_middle_leaf() -> Node<String, String> {
    internal(
        &["9"],
        vec![
            internal(
                &["2", "6"],
                vec![leaf(&["0", "1"]), leaf(&["3", "4", "5"]), leaf(&["7", "8"])],
            ),
            internal(
                &["c", "f"],
                vec![leaf(&["a", "b"]), leaf(&["d", "e"]), leaf(&["g", "h"])],
            ),
        ],
    )
}
