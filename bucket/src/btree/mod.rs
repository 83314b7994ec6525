//! B-tree implementation for the key-value engine.
//!
//! This module provides an in-memory B-tree mapping ordered keys to values.
//!
//! # Structure
//!
//! The B-tree consists of:
//! - Leaf nodes: sorted items, no children
//! - Internal nodes: sorted items and one more child than items
//!
//! Non-root nodes always hold between `min_items` and `2 * min_items` items,
//! and every leaf sits at the same depth.
//!
//! # Usage
//!
//! ```
//! use bucket::btree::{Tree, TreeError};
//!
//! let mut tree = Tree::new(2).unwrap();
//! for i in 0..10 {
//!     tree.put(i.to_string(), i);
//! }
//!
//! assert_eq!(tree.get("7"), Some(&7));
//! assert_eq!(tree.remove("7"), Ok(7));
//! assert!(tree.find("7").is_none());
//! assert_eq!(tree.remove("7"), Err(TreeError::KeyNotFound));
//! ```

mod node;
mod path;
mod tree;

pub use node::{Capacity, DEFAULT_MIN_ITEMS, Item, Node, Rebalance};
pub use path::Breadcrumbs;
pub use tree::{Tree, TreeError};
