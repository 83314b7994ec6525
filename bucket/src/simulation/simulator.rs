//! Main simulator harness for deterministic simulation testing.
//!
//! This module ties together the workload generator, the reference model
//! and the invariant checker to drive a tree through a seeded operation
//! sequence.

use crate::btree::Tree;

use super::invariants::{HistoryStats, InvariantChecker, InvariantViolation, OperationHistory};
use super::workload::{Operation, WorkloadConfig, WorkloadGenerator};

/// Configuration for the simulator.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Order of the simulated tree.
    pub min_items: usize,
    /// Workload generation configuration.
    pub workload: WorkloadConfig,
}

impl SimulatorConfig {
    /// Tree order used unless overridden.
    pub const DEFAULT_MIN_ITEMS: usize = 2;

    /// Create a new simulator config with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            min_items: Self::DEFAULT_MIN_ITEMS,
            workload: WorkloadConfig::default(),
        }
    }

    /// Set the tree order.
    #[must_use]
    pub const fn with_min_items(mut self, min_items: usize) -> Self {
        self.min_items = min_items;
        self
    }

    /// Set the workload configuration.
    #[must_use]
    pub const fn with_workload(mut self, workload: WorkloadConfig) -> Self {
        self.workload = workload;
        self
    }

    /// Set the remove rate.
    #[must_use]
    pub const fn with_remove_rate(mut self, rate: f64) -> Self {
        self.workload.remove_rate = rate;
        self
    }

    /// Set the number of distinct keys.
    #[must_use]
    pub const fn with_key_pool_size(mut self, size: usize) -> Self {
        self.workload.key_pool_size = size;
        self
    }
}

/// Results from a simulation run.
#[derive(Debug)]
pub struct SimulationResult {
    /// The seed used for this simulation.
    pub seed: u64,
    /// Number of operations applied.
    pub operations_processed: u64,
    /// Counts by operation outcome.
    pub stats: HistoryStats,
    /// Items in the tree at the end of the run.
    pub final_len: usize,
    /// Height of the tree at the end of the run.
    pub final_height: usize,
    /// Tallest the tree grew during the run.
    pub max_height: usize,
    /// Invariant violations detected.
    pub invariant_violations: Vec<InvariantViolation>,
    /// Whether the simulation ran to the end.
    pub completed_successfully: bool,
    /// Error message if simulation failed.
    pub error: Option<String>,
}

impl SimulationResult {
    /// Check if the simulation passed (no invariant violations).
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.completed_successfully && self.invariant_violations.is_empty()
    }
}

/// The main simulator harness.
pub struct Simulator {
    config: SimulatorConfig,
    generator: WorkloadGenerator,
    history: OperationHistory,
    checker: InvariantChecker,
    operations_processed: u64,
}

impl Simulator {
    /// Create a new simulator with the given configuration.
    #[must_use]
    pub fn new(config: SimulatorConfig) -> Self {
        let generator = WorkloadGenerator::with_config(config.seed, config.workload.clone());

        Self {
            config,
            generator,
            history: OperationHistory::new(),
            checker: InvariantChecker::new(),
            operations_processed: 0,
        }
    }

    /// Run the simulation for a given number of operations.
    ///
    /// This creates a fresh tree, applies the generated operations, and
    /// checks invariants after each one. The full contents are compared
    /// against the reference model at the end.
    pub fn run(&mut self, operation_count: usize) -> SimulationResult {
        let mut tree = match Tree::new(self.config.min_items) {
            Ok(tree) => tree,
            Err(e) => {
                return SimulationResult {
                    seed: self.config.seed,
                    operations_processed: 0,
                    stats: HistoryStats::default(),
                    final_len: 0,
                    final_height: 0,
                    max_height: 0,
                    invariant_violations: vec![],
                    completed_successfully: false,
                    error: Some(format!("Failed to create tree: {e}")),
                };
            }
        };

        let mut max_height = tree.height();
        for _ in 0..operation_count {
            let operation = self.generator.next_operation();
            let operation_index = self.history.len();

            let expected = self.history.expected_outcome(&operation);
            let actual = apply(&mut tree, &operation);
            self.checker
                .check_outcome(&operation, expected, actual, operation_index);

            self.history.record(operation);
            self.operations_processed += 1;

            self.checker.check_structure(&tree, operation_index);
            max_height = max_height.max(tree.height());
        }

        self.checker.check_contents(
            &tree,
            self.history.expected_state(),
            self.history.len(),
        );

        tracing::debug!(
            seed = self.config.seed,
            operations = self.operations_processed,
            len = tree.len(),
            height = tree.height(),
            violations = self.checker.violations().len(),
            "simulation finished"
        );

        SimulationResult {
            seed: self.config.seed,
            operations_processed: self.operations_processed,
            stats: self.history.stats(),
            final_len: tree.len(),
            final_height: tree.height(),
            max_height,
            invariant_violations: self.checker.violations().to_vec(),
            completed_successfully: true,
            error: None,
        }
    }

    /// Get the operation history.
    #[must_use]
    pub const fn history(&self) -> &OperationHistory {
        &self.history
    }

    /// Get the invariant checker.
    #[must_use]
    pub const fn checker(&self) -> &InvariantChecker {
        &self.checker
    }
}

/// Apply one operation, returning the value it observed.
fn apply(tree: &mut Tree<String, u64>, operation: &Operation) -> Option<u64> {
    match operation {
        Operation::Put { key, value } => tree.put(key.clone(), *value),
        Operation::Remove { key } => tree.remove(key.as_str()).ok(),
        Operation::Find { key } => tree.get(key.as_str()).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_basic() {
        let config = SimulatorConfig::new(12345);
        let mut simulator = Simulator::new(config);

        let result = simulator.run(100);

        assert!(result.completed_successfully);
        assert_eq!(result.operations_processed, 100);
        assert_eq!(result.stats.total_operations, 100);
        assert_eq!(result.final_len, result.stats.live_keys);
        assert_eq!(simulator.history().len(), 100);
    }

    #[test]
    fn test_simulator_rejects_zero_order() {
        let config = SimulatorConfig::new(1).with_min_items(0);
        let mut simulator = Simulator::new(config);

        let result = simulator.run(10);

        assert!(!result.passed());
        assert_eq!(result.operations_processed, 0);
        assert!(result.error.is_some());
    }

    #[test]
    fn test_simulator_deterministic() {
        let mut sim1 = Simulator::new(SimulatorConfig::new(12345));
        let result1 = sim1.run(500);

        let mut sim2 = Simulator::new(SimulatorConfig::new(12345));
        let result2 = sim2.run(500);

        assert_eq!(result1.stats, result2.stats);
        assert_eq!(result1.final_len, result2.final_len);
        assert_eq!(result1.final_height, result2.final_height);
        assert_eq!(sim1.history().operations(), sim2.history().operations());
    }

    #[test]
    fn test_simulator_no_invariant_violations() {
        for seed in [1, 7, 42, 54321] {
            for min_items in [1, 2, 3, 5] {
                let config = SimulatorConfig::new(seed).with_min_items(min_items);
                let mut simulator = Simulator::new(config);

                let result = simulator.run(1000);

                assert!(
                    result.passed(),
                    "seed {seed}, min_items {min_items}: {:?}",
                    result.invariant_violations
                );
                assert!(!simulator.checker().has_violations());
            }
        }
    }

    #[test]
    fn test_simulator_grows_and_drains() {
        let grow = SimulatorConfig::new(2024)
            .with_remove_rate(0.0)
            .with_key_pool_size(500);
        let mut simulator = Simulator::new(grow);
        let result = simulator.run(2000);
        assert!(result.passed(), "{:?}", result.invariant_violations);
        assert!(result.max_height >= 3);

        let drain = SimulatorConfig::new(2024)
            .with_remove_rate(0.6)
            .with_key_pool_size(50);
        let mut simulator = Simulator::new(drain);
        let result = simulator.run(2000);
        assert!(result.passed(), "{:?}", result.invariant_violations);
        assert!(result.stats.removes > 0);
        assert!(result.stats.missing_removes > 0);
    }

    #[test]
    #[ignore] // Long running test
    fn test_simulator_stress() {
        let config = SimulatorConfig::new(99999).with_key_pool_size(5000);
        let mut simulator = Simulator::new(config);

        let result = simulator.run(100_000);

        assert!(result.completed_successfully);
        assert!(result.passed());
    }
}
