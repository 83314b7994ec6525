//! Workload generator for deterministic simulation testing.
//!
//! This module generates random but reproducible sequences of tree
//! operations over a bounded key pool, so the same keys are inserted,
//! updated, found and removed many times over a run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Configuration for workload generation.
#[derive(Debug, Clone)]
pub struct WorkloadConfig {
    /// Probability of generating a remove (0.0 - 1.0).
    pub remove_rate: f64,
    /// Probability of generating a find (0.0 - 1.0). Puts fill the rest.
    pub find_rate: f64,
    /// Probability that a remove or find targets a key that is never put.
    pub missing_key_rate: f64,
    /// Number of distinct keys puts draw from.
    pub key_pool_size: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            remove_rate: 0.3,
            find_rate: 0.2,
            missing_key_rate: 0.1,
            key_pool_size: 200,
        }
    }
}

/// A single generated tree operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Insert or update `key`.
    Put { key: String, value: u64 },
    /// Remove `key`, which may be absent.
    Remove { key: String },
    /// Look up `key`, which may be absent.
    Find { key: String },
}

impl Operation {
    /// The key this operation targets.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Put { key, .. } | Self::Remove { key } | Self::Find { key } => key.as_str(),
        }
    }

    /// Short name used in violation reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Put { .. } => "put",
            Self::Remove { .. } => "remove",
            Self::Find { .. } => "find",
        }
    }
}

/// Generator for reproducible operation sequences.
pub struct WorkloadGenerator {
    rng: StdRng,
    config: WorkloadConfig,
    /// Values increase monotonically so every update is distinguishable.
    next_value: u64,
}

impl WorkloadGenerator {
    /// Create a generator with the default configuration.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, WorkloadConfig::default())
    }

    #[must_use]
    pub fn with_config(seed: u64, config: WorkloadConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            config,
            next_value: 0,
        }
    }

    /// Generate the next operation.
    pub fn next_operation(&mut self) -> Operation {
        let roll = self.rng.random::<f64>();

        if roll < self.config.remove_rate {
            Operation::Remove {
                key: self.target_key(),
            }
        } else if roll < self.config.remove_rate + self.config.find_rate {
            Operation::Find {
                key: self.target_key(),
            }
        } else {
            let key = self.pool_key();
            let value = self.next_value;
            self.next_value += 1;
            Operation::Put { key, value }
        }
    }

    /// A key for a remove or find: usually from the pool, sometimes one that
    /// never exists.
    fn target_key(&mut self) -> String {
        if self.rng.random::<f64>() < self.config.missing_key_rate {
            let suffix = self.rng.random_range(0..self.pool_size());
            format!("missing-{suffix:05}")
        } else {
            self.pool_key()
        }
    }

    fn pool_key(&mut self) -> String {
        let index = self.rng.random_range(0..self.pool_size());
        format!("key-{index:05}")
    }

    fn pool_size(&self) -> usize {
        self.config.key_pool_size.max(1)
    }
}
