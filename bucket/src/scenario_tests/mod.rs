//! Shape tests for the public tree operations.
//!
//! Each test file covers a specific scenario: a tree of order 2 built by hand
//! or by `put`, one operation, and the exact node layout that must result.

#![cfg(test)]

mod helpers;

mod test_add_multiple;
mod test_add_single;
mod test_find;
mod test_remove_from_inner_node;
mod test_remove_from_leaf;
mod test_remove_from_root;
mod test_remove_single;
mod test_split;
mod test_split_and_merge;
mod test_update;
