//! Test that putting an existing key replaces its value in place.

use crate::scenario_tests::helpers::*;

#[test]
fn test_update_node() {
    let mut tree = tree(MIN_ITEMS, minimal_three_levels());
    assert_eq!(tree.get("c"), Some(&"c".to_string()));

    let previous = tree.put("c".to_string(), "f".to_string());

    assert_eq!(previous, Some("c".to_string()));
    assert_eq!(tree.get("c"), Some(&"f".to_string()));
    assert_eq!(collect_keys(tree.root()), collect_keys(&minimal_three_levels()));
    assert_eq!(tree.len(), 17);
}

#[test]
fn test_update_separator() {
    let mut tree = tree(MIN_ITEMS, minimal_three_levels());

    tree.put("8".to_string(), "eight".to_string());

    assert_eq!(tree.root().items()[0].value(), "eight");
    assert_eq!(tree.height(), 3);
}
