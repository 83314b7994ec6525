//! Test looking up present and absent keys.

use crate::scenario_tests::helpers::*;

#[test]
fn test_find_node() {
    let tree = tree(MIN_ITEMS, minimal_three_levels());

    let item = tree.find("c").expect("c is in a leaf");
    assert_eq!(item.key(), "c");
    assert_eq!(item.value(), "c");

    assert!(tree.find("h").is_none());
}

#[test]
fn test_find_separators_and_bounds() {
    let tree = tree(MIN_ITEMS, minimal_three_levels());

    for key in ["8", "2", "e", "0", "g"] {
        assert_eq!(tree.get(key), Some(&key.to_string()), "missing {key}");
    }
    for key in ["", "00", "85", "z"] {
        assert!(!tree.contains_key(key), "unexpected {key}");
    }
}
