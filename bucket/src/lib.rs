// Life of a mutation:
// 1. Descend from the root, recording the child index taken at each level
// 2. Edit the target node (insert, replace or remove one item)
// 3. Walk the recorded path bottom-up:
//     - put: split any node holding more than max_items
//     - remove: rotate from a sibling or merge any node below min_items
// 4. Fix the root:
//     - put: an over-capacity root moves under a new root and splits
//     - remove: an empty internal root is replaced by its only child
//
// System components:
//  - B-tree engine (node, breadcrumb path, tree)
//  - Environment configuration
//  - Deterministic simulation harness

pub mod btree;
pub mod config;
pub mod simulation;

mod scenario_tests;
#[cfg(test)]
mod testing;

pub use btree::{Item, Tree, TreeError};
pub use config::{ConfigError, TreeConfig};
