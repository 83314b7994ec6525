//! In-memory B-tree keyed by any totally ordered key.
//!
//! Every mutation descends from the root recording a [`Breadcrumbs`] path,
//! edits one node, then walks the path bottom-up repairing capacity:
//! - `put` splits over-capacity nodes and grows a new root when the old one
//!   overflows.
//! - `remove` rotates or merges under-capacity nodes and collapses an empty
//!   root onto its only child.
//!
//! No node is left outside its bounds once a call returns.

use std::borrow::Borrow;
use std::mem;

use crate::btree::node::{Capacity, DEFAULT_MIN_ITEMS, Item, Node};
use crate::btree::path::Breadcrumbs;
use crate::config::TreeConfig;

/// An ordered in-memory map backed by a B-tree.
///
/// Single-threaded and synchronous; callers serialize mutation externally.
#[derive(Debug, Clone)]
pub struct Tree<K, V> {
    root: Node<K, V>,
    capacity: Capacity,
    len: usize,
}

impl<K: Ord, V> Tree<K, V> {
    /// Create an empty tree whose non-root nodes hold between `min_items`
    /// and `2 * min_items` items.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidConfiguration`] if `min_items` is zero.
    pub fn new(min_items: usize) -> Result<Self, TreeError> {
        let capacity =
            Capacity::new(min_items).ok_or(TreeError::InvalidConfiguration { min_items })?;

        tracing::debug!(
            min_items = capacity.min_items(),
            max_items = capacity.max_items(),
            "created tree"
        );

        Ok(Self {
            root: Node::new(),
            capacity,
            len: 0,
        })
    }

    /// Create an empty tree using the order from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidConfiguration`] if `min_items` is zero.
    pub fn with_config(config: &TreeConfig) -> Result<Self, TreeError> {
        Self::new(config.min_items)
    }

    /// Build a tree around an existing root, e.g. one assembled by hand.
    ///
    /// The root must already satisfy the node invariants for `min_items`.
    #[cfg(test)]
    pub(crate) fn from_root(root: Node<K, V>, min_items: usize) -> Result<Self, TreeError> {
        let capacity =
            Capacity::new(min_items).ok_or(TreeError::InvalidConfiguration { min_items })?;
        let len = root.count_items();
        Ok(Self {
            root,
            capacity,
            len,
        })
    }

    /// Number of items in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of levels. An empty tree and a single leaf both have height 1.
    #[must_use]
    pub fn height(&self) -> usize {
        self.root.height()
    }

    #[must_use]
    pub const fn capacity(&self) -> Capacity {
        self.capacity
    }

    #[must_use]
    pub const fn min_items(&self) -> usize {
        self.capacity.min_items()
    }

    #[must_use]
    pub const fn max_items(&self) -> usize {
        self.capacity.max_items()
    }

    pub(crate) const fn root(&self) -> &Node<K, V> {
        &self.root
    }

    /// Look up the item stored under `key`.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<&Item<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut node = &self.root;
        loop {
            match node.find_key(key) {
                Ok(index) => return Some(&node.items[index]),
                Err(_) if node.is_leaf() => return None,
                Err(index) => node = &node.children[index],
            }
        }
    }

    /// Look up the value stored under `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(Item::value)
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Insert or update a key.
    ///
    /// Updating an existing key replaces its item and changes nothing else.
    /// Returns the previous value if the key was already present.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let (position, path) = self.locate(&key);
        let node = self.root.descend_mut(path.as_slice());

        match position {
            Ok(index) => {
                let previous = node.replace_item(index, Item::new(key, value));
                return Some(previous.into_value());
            }
            Err(index) => node.insert_item(index, Item::new(key, value)),
        }
        self.len += 1;

        self.split_overpopulated(&path);
        if self.root.is_overpopulated(self.capacity) {
            self.grow();
        }

        None
    }

    /// Remove a key, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::KeyNotFound`] if the key is absent. The tree is
    /// not modified in that case.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, TreeError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (position, mut path) = self.locate(key);
        let Ok(index) = position else {
            tracing::debug!("remove of a missing key");
            return Err(TreeError::KeyNotFound);
        };

        let node = self.root.descend_mut(path.as_slice());
        let removed = if node.is_leaf() {
            node.remove_item(index)
        } else {
            let (removed, trail) = node.remove_internal_item(index);
            path.extend(trail);
            removed
        };
        self.len -= 1;

        self.rebalance_underpopulated(&path);
        if self.root.items.is_empty() {
            self.shrink();
        }

        Ok(removed.into_value())
    }

    /// Descend from the root towards `key`.
    ///
    /// Returns the node search result at the last node visited (an exact
    /// match, or the insertion point in a leaf) and the path to that node.
    fn locate<Q>(&self, key: &Q) -> (Result<usize, usize>, Breadcrumbs)
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut path = Breadcrumbs::new();
        let mut node = &self.root;
        loop {
            match node.find_key(key) {
                Ok(index) => return (Ok(index), path),
                Err(index) if node.is_leaf() => return (Err(index), path),
                Err(index) => {
                    path.push(index);
                    node = &node.children[index];
                }
            }
        }
    }

    /// Split every over-capacity node on `path`, deepest first.
    fn split_overpopulated(&mut self, path: &Breadcrumbs) {
        let capacity = self.capacity;
        for (parent_path, child_index) in path.ascending() {
            let parent = self.root.descend_mut(parent_path);
            if parent.children[child_index].is_overpopulated(capacity) {
                tracing::trace!(depth = parent_path.len() + 1, child_index, "splitting node");
                parent.split_child(child_index, capacity);
            }
        }
    }

    /// Rotate or merge every under-capacity node on `path`, deepest first.
    fn rebalance_underpopulated(&mut self, path: &Breadcrumbs) {
        let capacity = self.capacity;
        for (parent_path, child_index) in path.ascending() {
            let parent = self.root.descend_mut(parent_path);
            if parent.children[child_index].is_underpopulated(capacity) {
                let outcome = parent.rebalance_child(child_index, capacity);
                tracing::trace!(
                    depth = parent_path.len() + 1,
                    child_index,
                    ?outcome,
                    "rebalanced node"
                );
            }
        }
    }

    /// Push the over-capacity root down under a new root and split it.
    fn grow(&mut self) {
        let old_root = mem::take(&mut self.root);
        self.root.insert_child(0, old_root);
        self.root.split_child(0, self.capacity);
        tracing::debug!(height = self.height(), "tree grew a level");
    }

    /// Replace an empty internal root with its only child.
    fn shrink(&mut self) {
        if let Some(child) = self.root.children.pop() {
            self.root = child;
            tracing::debug!(height = self.height(), "tree lost a level");
        }
    }
}

impl<K: Ord, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self {
            root: Node::new(),
            capacity: DEFAULT_CAPACITY,
            len: 0,
        }
    }
}

const DEFAULT_CAPACITY: Capacity = match Capacity::new(DEFAULT_MIN_ITEMS) {
    Some(capacity) => capacity,
    None => panic!("default order must be nonzero"),
};

/// Errors that can occur during tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// The key passed to `remove` is not in the tree.
    KeyNotFound,
    /// The tree order must be at least 1.
    InvalidConfiguration { min_items: usize },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::KeyNotFound => write!(f, "key not found"),
            Self::InvalidConfiguration { min_items } => {
                write!(f, "invalid tree order: min_items is {min_items}, must be at least 1")
            }
        }
    }
}

impl std::error::Error for TreeError {}
