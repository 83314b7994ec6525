//! Helpers for building trees by hand in tests.
//!
//! Keys double as values so shapes can be compared on keys alone.

use crate::btree::{Item, Node, Tree};

fn items(keys: &[&str]) -> Vec<Item<String, String>> {
    keys.iter()
        .map(|key| Item::new((*key).to_string(), (*key).to_string()))
        .collect()
}

/// A leaf holding `keys`.
pub fn leaf(keys: &[&str]) -> Node<String, String> {
    Node::leaf(items(keys))
}

/// An internal node holding `keys` and `children`.
pub fn internal(keys: &[&str], children: Vec<Node<String, String>>) -> Node<String, String> {
    Node::internal(items(keys), children)
}

/// A tree of order `min_items` around a hand-built root.
pub fn tree(min_items: usize, root: Node<String, String>) -> Tree<String, String> {
    #[allow(clippy::expect_used)]
    Tree::from_root(root, min_items).expect("test trees use a nonzero order")
}

/// A tree of order `min_items` filled by `put` with the given keys in order.
pub fn tree_with_keys<'a>(
    min_items: usize,
    keys: impl IntoIterator<Item = &'a str>,
) -> Tree<String, String> {
    #[allow(clippy::expect_used)]
    let mut tree = Tree::new(min_items).expect("test trees use a nonzero order");
    for key in keys {
        tree.put(key.to_string(), key.to_string());
    }
    tree
}

/// In-order keys of the subtree rooted at `node`.
pub fn collect_keys(node: &Node<String, String>) -> Vec<&str> {
    let mut keys = Vec::new();
    collect_into(node, &mut keys);
    keys
}

fn collect_into<'a>(node: &'a Node<String, String>, keys: &mut Vec<&'a str>) {
    for (index, item) in node.items().iter().enumerate() {
        if let Some(child) = node.children().get(index) {
            collect_into(child, keys);
        }
        keys.push(item.key().as_str());
    }
    if let Some(last) = node.children().get(node.items().len()) {
        collect_into(last, keys);
    }
}
