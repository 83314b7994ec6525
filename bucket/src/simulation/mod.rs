//! Deterministic Simulation Testing (DST) infrastructure.
//!
//! This module drives a tree through long, seeded sequences of puts,
//! removes and finds and verifies it after every step:
//! - Reproducible random workload generation
//! - A `BTreeMap` reference model of the expected contents
//! - Structural invariant checking after each operation
//!
//! # Design Principles
//!
//! 1. All randomness is seeded for reproducibility
//! 2. Given the same seed, execution is identical
//! 3. Every observable result is compared against the model
//!
//! # Usage
//!
//! ```
//! use bucket::simulation::{Simulator, SimulatorConfig};
//!
//! let config = SimulatorConfig::new(12345) // seed
//!     .with_min_items(2)
//!     .with_remove_rate(0.3);
//!
//! let mut sim = Simulator::new(config);
//! let result = sim.run(1000); // Run 1000 operations
//!
//! assert!(result.invariant_violations.is_empty());
//! ```

mod invariants;
mod simulator;
mod workload;

pub use invariants::{HistoryStats, InvariantChecker, InvariantViolation, OperationHistory};
pub use simulator::{SimulationResult, Simulator, SimulatorConfig};
pub use workload::{Operation, WorkloadConfig, WorkloadGenerator};
