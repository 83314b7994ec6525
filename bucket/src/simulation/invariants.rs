//! Invariant checking for deterministic simulation testing.
//!
//! This module verifies the tree's structural invariants after each
//! operation and compares every observable result against a reference
//! model kept in a `BTreeMap`.

use std::collections::BTreeMap;
use std::fmt::Debug;

use crate::btree::{Capacity, Item, Node, Tree};

use super::workload::Operation;

/// Tracks the history of operations and the state the tree should hold.
#[derive(Debug, Default)]
pub struct OperationHistory {
    /// All operations in order.
    operations: Vec<Operation>,
    /// Reference model of what the tree should contain.
    expected_state: BTreeMap<String, u64>,
    inserts: u64,
    updates: u64,
    removes: u64,
    missing_removes: u64,
    finds: u64,
    missing_finds: u64,
}

impl OperationHistory {
    /// Create a new empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value the tree should report for `operation`, taken before the
    /// operation is applied.
    ///
    /// For a put this is the previous value, for a remove the removed value,
    /// and for a find the found value. `None` means the key is absent.
    #[must_use]
    pub fn expected_outcome(&self, operation: &Operation) -> Option<u64> {
        self.expected_state.get(operation.key()).copied()
    }

    /// Apply `operation` to the reference model and record it.
    pub fn record(&mut self, operation: Operation) {
        match &operation {
            Operation::Put { key, value } => {
                if self.expected_state.insert(key.clone(), *value).is_some() {
                    self.updates += 1;
                } else {
                    self.inserts += 1;
                }
            }
            Operation::Remove { key } => {
                if self.expected_state.remove(key).is_some() {
                    self.removes += 1;
                } else {
                    self.missing_removes += 1;
                }
            }
            Operation::Find { key } => {
                if self.expected_state.contains_key(key) {
                    self.finds += 1;
                } else {
                    self.missing_finds += 1;
                }
            }
        }

        self.operations.push(operation);
    }

    /// Get the number of operations.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.operations.len()
    }

    /// Check if history is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Get statistics.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            total_operations: self.operations.len(),
            inserts: self.inserts,
            updates: self.updates,
            removes: self.removes,
            missing_removes: self.missing_removes,
            finds: self.finds,
            missing_finds: self.missing_finds,
            live_keys: self.expected_state.len(),
        }
    }

    /// Get the expected state (for verification).
    #[must_use]
    pub const fn expected_state(&self) -> &BTreeMap<String, u64> {
        &self.expected_state
    }
}

/// Statistics about the operation history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStats {
    /// Total number of operations.
    pub total_operations: usize,
    /// Puts of a key that was absent.
    pub inserts: u64,
    /// Puts of a key that was present.
    pub updates: u64,
    /// Removes of a present key.
    pub removes: u64,
    /// Removes of an absent key.
    pub missing_removes: u64,
    /// Finds of a present key.
    pub finds: u64,
    /// Finds of an absent key.
    pub missing_finds: u64,
    /// Keys in the reference model after the last operation.
    pub live_keys: usize,
}

/// An invariant violation detected during simulation.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violation.
    pub description: String,
    /// Operation index where it was detected.
    pub operation_index: usize,
    /// Additional context.
    pub context: String,
}

/// Checker for tree invariants.
pub struct InvariantChecker {
    /// Detected violations.
    violations: Vec<InvariantViolation>,
}

impl Default for InvariantChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantChecker {
    /// Create a new invariant checker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// Get all violations.
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        &self.violations
    }

    /// Check if any violations were detected.
    #[must_use]
    pub const fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }

    /// Clear all recorded violations.
    pub fn clear(&mut self) {
        self.violations.clear();
    }

    /// Add a violation.
    pub fn add_violation(&mut self, violation: InvariantViolation) {
        self.violations.push(violation);
    }

    fn report(&mut self, description: &str, operation_index: usize, context: String) {
        tracing::warn!(operation_index, %context, "{description}");
        self.violations.push(InvariantViolation {
            description: description.to_string(),
            operation_index,
            context,
        });
    }

    /// Check that an operation returned what the reference model predicted.
    pub fn check_outcome(
        &mut self,
        operation: &Operation,
        expected: Option<u64>,
        actual: Option<u64>,
        operation_index: usize,
    ) {
        if expected != actual {
            self.report(
                "Operation result disagrees with model",
                operation_index,
                format!(
                    "{} of {}: expected {expected:?}, got {actual:?}",
                    operation.kind(),
                    operation.key()
                ),
            );
        }
    }

    /// Check every structural invariant of `tree`.
    ///
    /// - Keys are strictly ascending in an in-order traversal
    /// - All leaves are at the same depth
    /// - Non-root nodes hold between `min_items` and `max_items` items
    /// - The root holds at most `max_items` items and is only empty as a leaf
    /// - Internal nodes have exactly one more child than items
    /// - `len()` matches the number of stored items
    pub fn check_structure<K: Ord + Debug, V>(&mut self, tree: &Tree<K, V>, operation_index: usize) {
        let mut walk = StructureWalk::new(tree.capacity());
        walk.visit(tree.root(), 0);

        if walk.items != tree.len() {
            walk.problems.push((
                "Item count disagrees with len()",
                format!("counted {} items, len() is {}", walk.items, tree.len()),
            ));
        }
        if walk.leaf_depth.is_some_and(|depth| depth + 1 != tree.height()) {
            walk.problems.push((
                "Height disagrees with leaf depth",
                format!("height() is {}, leaves at depth {:?}", tree.height(), walk.leaf_depth),
            ));
        }

        for (description, context) in walk.problems {
            self.report(description, operation_index, context);
        }
    }

    /// Check that the tree holds exactly the reference model's contents.
    pub fn check_contents(
        &mut self,
        tree: &Tree<String, u64>,
        expected: &BTreeMap<String, u64>,
        operation_index: usize,
    ) {
        if tree.len() != expected.len() {
            self.report(
                "Tree size disagrees with model",
                operation_index,
                format!("tree has {}, model has {}", tree.len(), expected.len()),
            );
        }

        for (key, value) in expected {
            let actual = tree.get(key.as_str()).copied();
            if actual != Some(*value) {
                self.report(
                    "Stored value disagrees with model",
                    operation_index,
                    format!("{key}: expected {value}, got {actual:?}"),
                );
            }
        }
    }
}

/// Depth-first, in-order walk that collects structural problems.
struct StructureWalk<'a, K> {
    capacity: Capacity,
    leaf_depth: Option<usize>,
    previous: Option<&'a K>,
    items: usize,
    problems: Vec<(&'static str, String)>,
}

impl<'a, K: Ord + Debug> StructureWalk<'a, K> {
    const fn new(capacity: Capacity) -> Self {
        Self {
            capacity,
            leaf_depth: None,
            previous: None,
            items: 0,
            problems: Vec::new(),
        }
    }

    fn visit<V>(&mut self, node: &'a Node<K, V>, depth: usize) {
        let len = node.len_items();
        self.items += len;

        if depth == 0 {
            if self.capacity.is_overpopulated(len) {
                self.problems.push((
                    "Root over capacity",
                    format!("{len} items, max {}", self.capacity.max_items()),
                ));
            }
            if len == 0 && !node.is_leaf() {
                self.problems
                    .push(("Empty internal root", format!("{} children", node.children().len())));
            }
        } else if self.capacity.is_overpopulated(len) || self.capacity.is_underpopulated(len) {
            self.problems.push((
                "Node outside capacity bounds",
                format!(
                    "depth {depth} holds {len} items, bounds [{}, {}]",
                    self.capacity.min_items(),
                    self.capacity.max_items()
                ),
            ));
        }

        if node.is_leaf() {
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => self.problems.push((
                    "Leaves at unequal depth",
                    format!("leaf at depth {depth}, first leaf at depth {expected}"),
                )),
                Some(_) => {}
            }
            node.items().iter().for_each(|item| self.visit_item(item));
            return;
        }

        if node.children().len() != len + 1 {
            self.problems.push((
                "Internal node has wrong child count",
                format!("{len} items, {} children", node.children().len()),
            ));
        }

        for (index, child) in node.children().iter().enumerate() {
            self.visit(child, depth + 1);
            if let Some(item) = node.items().get(index) {
                self.visit_item(item);
            }
        }
    }

    fn visit_item<V>(&mut self, item: &'a Item<K, V>) {
        if let Some(previous) = self.previous.filter(|previous| *previous >= item.key()) {
            self.problems.push((
                "Keys out of order",
                format!("{previous:?} precedes {:?}", item.key()),
            ));
        }
        self.previous = Some(item.key());
    }
}
