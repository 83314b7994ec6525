//! B-tree node types and local structural operations.
//!
//! A node is either a leaf (no children) or an internal node holding exactly
//! one more child than it has items. Nodes own their children outright; the
//! order parameters live in [`Capacity`] and are passed into every operation
//! that needs them instead of being stored per node.

use std::borrow::Borrow;
use std::mem;

/// Default minimum number of items in a non-root node.
pub const DEFAULT_MIN_ITEMS: usize = 128;

/// A key-value record stored in the tree.
///
/// Items are never mutated in place; an update replaces the whole item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<K, V> {
    key: K,
    value: V,
}

impl<K, V> Item<K, V> {
    /// Create a new item.
    #[must_use]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Split the item into its key and value.
    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }

    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }
}

/// Order parameters of a tree.
///
/// `max_items` is always `2 * min_items`, and `min_items` is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    min_items: usize,
    max_items: usize,
}

impl Capacity {
    /// Build the capacity for a tree of the given order.
    ///
    /// Returns `None` if `min_items` is zero.
    #[must_use]
    pub const fn new(min_items: usize) -> Option<Self> {
        if min_items == 0 {
            return None;
        }
        Some(Self {
            min_items,
            max_items: min_items * 2,
        })
    }

    #[must_use]
    pub const fn min_items(&self) -> usize {
        self.min_items
    }

    #[must_use]
    pub const fn max_items(&self) -> usize {
        self.max_items
    }

    /// A node with `len` items has too many and must be split.
    #[must_use]
    pub const fn is_overpopulated(&self, len: usize) -> bool {
        len > self.max_items
    }

    /// A non-root node with `len` items has too few and must be rebalanced.
    #[must_use]
    pub const fn is_underpopulated(&self, len: usize) -> bool {
        len < self.min_items
    }

    /// A sibling with `len` items can give one away and stay within bounds.
    #[must_use]
    pub const fn has_surplus(&self, len: usize) -> bool {
        len > self.min_items
    }
}

/// How an under-capacity child was repaired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rebalance {
    /// Borrowed the last item of the left sibling.
    RotatedRight,
    /// Borrowed the first item of the right sibling.
    RotatedLeft,
    /// Merged with a sibling; the parent lost one item and one child.
    Merged,
}

/// A B-tree node.
///
/// Invariants (restored by the tree before any public call returns):
/// - `items` is sorted strictly ascending by key.
/// - `children` is empty (leaf) or has `items.len() + 1` entries.
/// - Every key under `children[i]` is below `items[i]`, every key under
///   `children[i + 1]` is above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<K, V> {
    pub(crate) items: Vec<Item<K, V>>,
    pub(crate) children: Vec<Node<K, V>>,
}

impl<K, V> Node<K, V> {
    /// Create an empty leaf.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create a leaf holding the given items.
    #[cfg(test)]
    #[must_use]
    pub(crate) const fn leaf(items: Vec<Item<K, V>>) -> Self {
        Self {
            items,
            children: Vec::new(),
        }
    }

    /// Create an internal node from items and children.
    #[must_use]
    pub(crate) const fn internal(items: Vec<Item<K, V>>, children: Vec<Self>) -> Self {
        Self { items, children }
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn items(&self) -> &[Item<K, V>] {
        &self.items
    }

    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Keys of this node in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.iter().map(Item::key)
    }

    #[must_use]
    pub fn len_items(&self) -> usize {
        self.items.len()
    }

    /// Total number of items in the subtree rooted here.
    #[must_use]
    pub fn count_items(&self) -> usize {
        self.items.len() + self.children.iter().map(Self::count_items).sum::<usize>()
    }

    /// Number of levels in the subtree rooted here. A lone leaf has height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut node = self;
        while let Some(first) = node.children.first() {
            height += 1;
            node = first;
        }
        height
    }

    #[must_use]
    pub fn is_overpopulated(&self, capacity: Capacity) -> bool {
        capacity.is_overpopulated(self.items.len())
    }

    #[must_use]
    pub fn is_underpopulated(&self, capacity: Capacity) -> bool {
        capacity.is_underpopulated(self.items.len())
    }

    /// Search this node for a key.
    ///
    /// Returns `Ok(index)` on an exact match, or `Err(index)` with the number
    /// of items strictly below the key. At an internal node that index is the
    /// child to descend into; at a leaf it is the insertion point.
    pub fn find_key<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items
            .binary_search_by(|item| item.key.borrow().cmp(key))
    }

    /// Insert an item at `index`, shifting later items right.
    ///
    /// Capacity is not checked; the caller repairs overflow afterwards.
    pub fn insert_item(&mut self, index: usize, item: Item<K, V>) {
        self.items.insert(index, item);
    }

    /// Insert a child at `index`, shifting later children right.
    pub fn insert_child(&mut self, index: usize, child: Self) {
        self.children.insert(index, child);
    }

    /// Replace the item at `index`, returning the previous one.
    pub fn replace_item(&mut self, index: usize, item: Item<K, V>) -> Item<K, V> {
        mem::replace(&mut self.items[index], item)
    }

    /// Remove the item at `index` from a leaf.
    pub fn remove_item(&mut self, index: usize) -> Item<K, V> {
        self.items.remove(index)
    }

    /// Remove the item at `index` from an internal node.
    ///
    /// The item is replaced by its in-order predecessor, the last item of the
    /// rightmost leaf under `children[index]`, which is then removed from
    /// that leaf. Returns the removed item together with the child indices
    /// walked from this node down to that leaf; every node on that trail may
    /// now be under capacity.
    pub fn remove_internal_item(&mut self, index: usize) -> (Item<K, V>, Vec<usize>) {
        let mut trail = vec![index];
        let mut node = &mut self.children[index];
        while !node.is_leaf() {
            let last = node.children.len() - 1;
            trail.push(last);
            node = &mut node.children[last];
        }

        let last = node.items.len() - 1;
        let predecessor = node.items.remove(last);
        let removed = mem::replace(&mut self.items[index], predecessor);
        (removed, trail)
    }

    /// Split the over-capacity child at `index`.
    ///
    /// The item at offset `min_items` is promoted into this node at `index`
    /// and everything after it moves to a new sibling inserted at
    /// `index + 1`. Repeats on the new sibling while it is still over
    /// capacity. This node may itself end up over capacity; the caller
    /// handles that one level up.
    ///
    /// ```text
    ///          3                            3,6
    ///        /   \           ----->       /  |  \
    ///     1,2   4,5,6,7,8              1,2  4,5  7,8
    /// ```
    pub fn split_child(&mut self, index: usize, capacity: Capacity) {
        let min_items = capacity.min_items();
        let mut index = index;

        while self.children[index].is_overpopulated(capacity) {
            let child = &mut self.children[index];
            let mut right_items = child.items.split_off(min_items);
            let median = right_items.remove(0);
            let right_children = if child.is_leaf() {
                Vec::new()
            } else {
                child.children.split_off(min_items + 1)
            };

            self.items.insert(index, median);
            self.children
                .insert(index + 1, Self::internal(right_items, right_children));
            index += 1;
        }
    }

    /// Move one item from the left sibling of `children[index]` through the
    /// separator into `children[index]`.
    ///
    /// ```text
    ///          4                            3
    ///        /   \           ----->       /   \
    ///    1,2,3    5                     1,2   4,5
    /// ```
    pub fn rotate_right(&mut self, index: usize) {
        let separator_index = index - 1;
        let (left, right) = self.children.split_at_mut(index);
        let donor = &mut left[separator_index];
        let target = &mut right[0];

        if let Some(item) = donor.items.pop() {
            let separator = mem::replace(&mut self.items[separator_index], item);
            target.items.insert(0, separator);
        }
        if let Some(child) = donor.children.pop() {
            target.children.insert(0, child);
        }
    }

    /// Move one item from the right sibling of `children[index]` through the
    /// separator into `children[index]`.
    ///
    /// ```text
    ///          2                            3
    ///        /   \           ----->       /   \
    ///       1    3,4,5                  1,2   4,5
    /// ```
    pub fn rotate_left(&mut self, index: usize) {
        let (left, right) = self.children.split_at_mut(index + 1);
        let target = &mut left[index];
        let donor = &mut right[0];

        if !donor.items.is_empty() {
            let item = donor.items.remove(0);
            let separator = mem::replace(&mut self.items[index], item);
            target.items.push(separator);
        }
        if !donor.children.is_empty() {
            target.children.push(donor.children.remove(0));
        }
    }

    /// Merge `children[left_index + 1]` and the separator between them into
    /// `children[left_index]`.
    ///
    /// ```text
    ///         2,5                           5
    ///       /  |  \          ----->       /   \
    ///      1  3,4  6,7                1,2,3,4  6,7
    /// ```
    pub fn merge_children(&mut self, left_index: usize) {
        let right = self.children.remove(left_index + 1);
        let separator = self.items.remove(left_index);
        let left = &mut self.children[left_index];
        left.items.push(separator);
        left.items.extend(right.items);
        left.children.extend(right.children);
    }

    /// Repair the under-capacity child at `index`.
    ///
    /// Prefers a right rotation from the left sibling, then a left rotation
    /// from the right sibling, and merges only when neither sibling has a
    /// surplus. The leftmost child merges with its right sibling, any other
    /// child merges into its left sibling.
    pub fn rebalance_child(&mut self, index: usize, capacity: Capacity) -> Rebalance {
        if index > 0 && capacity.has_surplus(self.children[index - 1].items.len()) {
            self.rotate_right(index);
            return Rebalance::RotatedRight;
        }

        if index + 1 < self.children.len()
            && capacity.has_surplus(self.children[index + 1].items.len())
        {
            self.rotate_left(index);
            return Rebalance::RotatedLeft;
        }

        if index == 0 {
            self.merge_children(0);
        } else {
            self.merge_children(index - 1);
        }
        Rebalance::Merged
    }

    /// Follow `path` from this node, one child index per level.
    pub(crate) fn descend_mut(&mut self, path: &[usize]) -> &mut Self {
        let mut node = self;
        for &index in path {
            node = &mut node.children[index];
        }
        node
    }
}

impl<K, V> Default for Node<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(keys: &[&str]) -> Vec<Item<String, String>> {
        keys.iter()
            .map(|k| Item::new((*k).to_string(), (*k).to_string()))
            .collect()
    }

    fn leaf(keys: &[&str]) -> Node<String, String> {
        Node::leaf(items(keys))
    }

    fn keys_of(node: &Node<String, String>) -> Vec<&str> {
        node.keys().map(String::as_str).collect()
    }

    fn capacity() -> Capacity {
        Capacity::new(2).expect("nonzero order")
    }

    #[test]
    fn test_capacity_rejects_zero() {
        assert!(Capacity::new(0).is_none());

        let capacity = capacity();
        assert_eq!(capacity.min_items(), 2);
        assert_eq!(capacity.max_items(), 4);
        assert!(capacity.is_overpopulated(5));
        assert!(!capacity.is_overpopulated(4));
        assert!(capacity.is_underpopulated(1));
        assert!(!capacity.is_underpopulated(2));
        assert!(capacity.has_surplus(3));
        assert!(!capacity.has_surplus(2));
    }

    #[test]
    fn test_find_key() {
        let node = leaf(&["1", "3", "5"]);

        assert_eq!(node.find_key("1"), Ok(0));
        assert_eq!(node.find_key("5"), Ok(2));
        assert_eq!(node.find_key("0"), Err(0));
        assert_eq!(node.find_key("2"), Err(1));
        assert_eq!(node.find_key("4"), Err(2));
        assert_eq!(node.find_key("6"), Err(3));
    }

    #[test]
    fn test_find_key_empty_node() {
        let node: Node<String, String> = Node::new();
        assert_eq!(node.find_key("a"), Err(0));
    }

    #[test]
    fn test_insert_item_keeps_order() {
        let mut node = leaf(&["1", "5"]);
        node.insert_item(1, Item::new("3".to_string(), "3".to_string()));
        node.insert_item(3, Item::new("7".to_string(), "7".to_string()));
        node.insert_item(0, Item::new("0".to_string(), "0".to_string()));

        assert_eq!(keys_of(&node), vec!["0", "1", "3", "5", "7"]);
    }

    #[test]
    fn test_insert_child() {
        let mut node = Node::internal(items(&["5"]), vec![leaf(&["1"]), leaf(&["9"])]);
        node.insert_child(1, leaf(&["6"]));

        assert_eq!(node.children.len(), 3);
        assert_eq!(keys_of(&node.children[1]), vec!["6"]);
        assert_eq!(keys_of(&node.children[2]), vec!["9"]);
    }

    #[test]
    fn test_replace_item() {
        let mut node = leaf(&["a", "b"]);
        let previous = node.replace_item(1, Item::new("b".to_string(), "updated".to_string()));

        assert_eq!(previous.value(), "b");
        assert_eq!(node.items[1].value(), "updated");
        assert_eq!(node.len_items(), 2);
    }

    #[test]
    fn test_split_leaf_child() {
        let mut parent = Node::internal(
            items(&["3"]),
            vec![leaf(&["1", "2"]), leaf(&["4", "5", "6", "7", "8"])],
        );

        parent.split_child(1, capacity());

        assert_eq!(keys_of(&parent), vec!["3", "6"]);
        assert_eq!(parent.children.len(), 3);
        assert_eq!(keys_of(&parent.children[0]), vec!["1", "2"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["4", "5"]);
        assert_eq!(keys_of(&parent.children[2]), vec!["7", "8"]);
    }

    #[test]
    fn test_split_internal_child_moves_children() {
        let child = Node::internal(
            items(&["b", "d", "f", "h", "j"]),
            vec![
                leaf(&["a"]),
                leaf(&["c"]),
                leaf(&["e"]),
                leaf(&["g"]),
                leaf(&["i"]),
                leaf(&["k"]),
            ],
        );
        let mut parent = Node::internal(Vec::new(), vec![child]);

        parent.split_child(0, capacity());

        assert_eq!(keys_of(&parent), vec!["f"]);
        let left = &parent.children[0];
        let right = &parent.children[1];
        assert_eq!(keys_of(left), vec!["b", "d"]);
        assert_eq!(keys_of(right), vec!["h", "j"]);
        assert_eq!(left.children.len(), 3);
        assert_eq!(right.children.len(), 3);
        assert_eq!(keys_of(&left.children[2]), vec!["e"]);
        assert_eq!(keys_of(&right.children[0]), vec!["g"]);
    }

    #[test]
    fn test_split_within_bounds_is_noop() {
        let mut parent = Node::internal(items(&["3"]), vec![leaf(&["1", "2"]), leaf(&["4", "5"])]);
        let before = parent.clone();

        parent.split_child(1, capacity());

        assert_eq!(parent, before);
    }

    #[test]
    fn test_rotate_right_leaf() {
        let mut parent = Node::internal(items(&["4"]), vec![leaf(&["1", "2", "3"]), leaf(&["5"])]);

        parent.rotate_right(1);

        assert_eq!(keys_of(&parent), vec!["3"]);
        assert_eq!(keys_of(&parent.children[0]), vec!["1", "2"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["4", "5"]);
    }

    #[test]
    fn test_rotate_left_leaf() {
        let mut parent = Node::internal(items(&["2"]), vec![leaf(&["1"]), leaf(&["3", "4", "5"])]);

        parent.rotate_left(0);

        assert_eq!(keys_of(&parent), vec!["3"]);
        assert_eq!(keys_of(&parent.children[0]), vec!["1", "2"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["4", "5"]);
    }

    #[test]
    fn test_rotate_right_internal_moves_last_child() {
        let left = Node::internal(
            items(&["2", "5", "8"]),
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"]), leaf(&["9", "a"])],
        );
        let right = Node::internal(items(&["h"]), vec![leaf(&["c", "d", "f", "g"]), leaf(&["i", "j"])]);
        let mut parent = Node::internal(items(&["b"]), vec![left, right]);

        parent.rotate_right(1);

        assert_eq!(keys_of(&parent), vec!["8"]);
        assert_eq!(keys_of(&parent.children[0]), vec!["2", "5"]);
        assert_eq!(parent.children[0].children.len(), 3);
        assert_eq!(keys_of(&parent.children[1]), vec!["b", "h"]);
        assert_eq!(parent.children[1].children.len(), 3);
        assert_eq!(keys_of(&parent.children[1].children[0]), vec!["9", "a"]);
    }

    #[test]
    fn test_rotate_left_internal_moves_first_child() {
        let left = Node::internal(items(&["4"]), vec![leaf(&["0", "1", "2", "3"]), leaf(&["6", "7"])]);
        let right = Node::internal(
            items(&["b", "e", "h"]),
            vec![leaf(&["9", "a"]), leaf(&["c", "d"]), leaf(&["f", "g"]), leaf(&["i", "j"])],
        );
        let mut parent = Node::internal(items(&["8"]), vec![left, right]);

        parent.rotate_left(0);

        assert_eq!(keys_of(&parent), vec!["b"]);
        assert_eq!(keys_of(&parent.children[0]), vec!["4", "8"]);
        assert_eq!(keys_of(&parent.children[0].children[2]), vec!["9", "a"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["e", "h"]);
        assert_eq!(parent.children[1].children.len(), 3);
    }

    #[test]
    fn test_merge_children() {
        let mut parent = Node::internal(
            items(&["2", "5"]),
            vec![leaf(&["1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
        );

        parent.merge_children(0);

        assert_eq!(keys_of(&parent), vec!["5"]);
        assert_eq!(parent.children.len(), 2);
        assert_eq!(keys_of(&parent.children[0]), vec!["1", "2", "3", "4"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["6", "7"]);
    }

    #[test]
    fn test_merge_internal_children_concatenates_children() {
        let left = Node::internal(items(&["1"]), vec![leaf(&["0"]), leaf(&["2"])]);
        let right = Node::internal(items(&["5"]), vec![leaf(&["4"]), leaf(&["6"])]);
        let mut parent = Node::internal(items(&["3"]), vec![left, right]);

        parent.merge_children(0);

        assert!(parent.items.is_empty());
        assert_eq!(parent.children.len(), 1);
        let merged = &parent.children[0];
        assert_eq!(keys_of(merged), vec!["1", "3", "5"]);
        assert_eq!(merged.children.len(), 4);
    }

    #[test]
    fn test_rebalance_prefers_right_rotation() {
        let mut parent = Node::internal(
            items(&["3", "6"]),
            vec![leaf(&["0", "1", "2"]), leaf(&["4"]), leaf(&["7", "8", "9"])],
        );

        let outcome = parent.rebalance_child(1, capacity());

        assert_eq!(outcome, Rebalance::RotatedRight);
        assert_eq!(keys_of(&parent), vec!["2", "6"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["3", "4"]);
    }

    #[test]
    fn test_rebalance_falls_back_to_left_rotation() {
        let mut parent = Node::internal(
            items(&["2", "5"]),
            vec![leaf(&["0", "1"]), leaf(&["3"]), leaf(&["6", "7", "8"])],
        );

        let outcome = parent.rebalance_child(1, capacity());

        assert_eq!(outcome, Rebalance::RotatedLeft);
        assert_eq!(keys_of(&parent), vec!["2", "6"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["3", "5"]);
        assert_eq!(keys_of(&parent.children[2]), vec!["7", "8"]);
    }

    #[test]
    fn test_rebalance_merges_into_left_sibling() {
        let mut parent = Node::internal(
            items(&["2", "5"]),
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6"])],
        );

        let outcome = parent.rebalance_child(2, capacity());

        assert_eq!(outcome, Rebalance::Merged);
        assert_eq!(keys_of(&parent), vec!["2"]);
        assert_eq!(keys_of(&parent.children[1]), vec!["3", "4", "5", "6"]);
    }

    #[test]
    fn test_rebalance_leftmost_merges_with_right_sibling() {
        let mut parent = Node::internal(
            items(&["2", "5"]),
            vec![leaf(&["0"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
        );

        let outcome = parent.rebalance_child(0, capacity());

        assert_eq!(outcome, Rebalance::Merged);
        assert_eq!(keys_of(&parent), vec!["5"]);
        assert_eq!(keys_of(&parent.children[0]), vec!["0", "2", "3", "4"]);
    }

    #[test]
    fn test_remove_item_from_leaf() {
        let mut node = leaf(&["1", "2", "3"]);
        let removed = node.remove_item(1);

        assert_eq!(removed.key(), "2");
        assert_eq!(keys_of(&node), vec!["1", "3"]);
    }

    #[test]
    fn test_remove_internal_item_uses_predecessor() {
        let left = Node::internal(
            items(&["2", "5"]),
            vec![leaf(&["0", "1"]), leaf(&["3", "4"]), leaf(&["6", "7"])],
        );
        let right = Node::internal(items(&["b"]), vec![leaf(&["9", "a"]), leaf(&["c", "d"])]);
        let mut root = Node::internal(items(&["8"]), vec![left, right]);

        let (removed, trail) = root.remove_internal_item(0);

        assert_eq!(removed.key(), "8");
        assert_eq!(trail, vec![0, 2]);
        assert_eq!(keys_of(&root), vec!["7"]);
        assert_eq!(keys_of(&root.children[0].children[2]), vec!["6"]);
    }

    #[test]
    fn test_height_and_count() {
        let root = Node::internal(
            items(&["5"]),
            vec![
                Node::internal(items(&["2"]), vec![leaf(&["0", "1"]), leaf(&["3", "4"])]),
                Node::internal(items(&["8"]), vec![leaf(&["6", "7"]), leaf(&["9"])]),
            ],
        );

        assert_eq!(root.height(), 3);
        assert_eq!(root.count_items(), 10);
        assert_eq!(leaf(&[]).height(), 1);
    }

    #[test]
    fn test_descend_mut() {
        let mut root = Node::internal(
            items(&["5"]),
            vec![
                Node::internal(items(&["2"]), vec![leaf(&["0", "1"]), leaf(&["3", "4"])]),
                leaf(&["6"]),
            ],
        );

        assert_eq!(keys_of(root.descend_mut(&[])), vec!["5"]);
        assert_eq!(keys_of(root.descend_mut(&[0, 1])), vec!["3", "4"]);
        assert_eq!(keys_of(root.descend_mut(&[1])), vec!["6"]);
    }
}
