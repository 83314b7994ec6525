//! Tree configuration module.
//!
//! This module provides configuration loading for the bucket engine from
//! environment variables.
//!
//! # Environment Variables
//!
//! - `BUCKET_MIN_ITEMS`: Minimum items per non-root node (default: `128`)
//! - `BUCKET_SIMULATION_SEED`: Seed for a deterministic simulation run (optional)
//! - `BUCKET_SIMULATION_OPERATIONS`: Operations in that run (default: `1000`)
//!
//! # Invariants
//!
//! - `min_items` is always at least 1
//! - `max_items` is derived as `2 * min_items` by the tree, never configured

use crate::btree::DEFAULT_MIN_ITEMS;

/// Tree configuration.
///
/// # Post-conditions
///
/// When constructed via `from_env()`, `min_items >= 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Minimum number of items in a non-root node.
    pub min_items: usize,
    /// Seed for the demo simulation. No simulation runs when unset.
    pub simulation_seed: Option<u64>,
    /// Number of operations the demo simulation performs.
    pub simulation_operations: usize,
}

/// Error returned when loading configuration fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable has an invalid value.
    InvalidValue { name: String, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { name, message } => {
                write!(f, "invalid value for {name}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            min_items: DEFAULT_MIN_ITEMS,
            simulation_seed: None,
            simulation_operations: Self::DEFAULT_SIMULATION_OPERATIONS,
        }
    }
}

impl TreeConfig {
    /// Default number of simulated operations.
    pub const DEFAULT_SIMULATION_OPERATIONS: usize = 1000;

    const MIN_ITEMS_VAR: &'static str = "BUCKET_MIN_ITEMS";
    const SIMULATION_SEED_VAR: &'static str = "BUCKET_SIMULATION_SEED";
    const SIMULATION_OPERATIONS_VAR: &'static str = "BUCKET_SIMULATION_OPERATIONS";

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `BUCKET_MIN_ITEMS` is set but not an integer of at least 1
    /// - `BUCKET_SIMULATION_SEED` is set but not a valid u64
    /// - `BUCKET_SIMULATION_OPERATIONS` is set but not a valid count
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let min_items = Self::load_min_items(lookup(Self::MIN_ITEMS_VAR))?;
        let simulation_seed = lookup(Self::SIMULATION_SEED_VAR)
            .map(|value| {
                value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                    name: Self::SIMULATION_SEED_VAR.to_string(),
                    message: format!("'{value}' is not a valid seed"),
                })
            })
            .transpose()?;
        let simulation_operations = match lookup(Self::SIMULATION_OPERATIONS_VAR) {
            Some(value) => value.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                name: Self::SIMULATION_OPERATIONS_VAR.to_string(),
                message: format!("'{value}' is not a valid operation count"),
            })?,
            None => Self::DEFAULT_SIMULATION_OPERATIONS,
        };

        Ok(Self {
            min_items,
            simulation_seed,
            simulation_operations,
        })
    }

    /// Parse the tree order.
    ///
    /// Returns the default if not set.
    fn load_min_items(value: Option<String>) -> Result<usize, ConfigError> {
        let Some(value) = value else {
            return Ok(DEFAULT_MIN_ITEMS);
        };

        match value.parse::<usize>() {
            Ok(0) => Err(ConfigError::InvalidValue {
                name: Self::MIN_ITEMS_VAR.to_string(),
                message: "must be at least 1".to_string(),
            }),
            Ok(min_items) => Ok(min_items),
            Err(_) => Err(ConfigError::InvalidValue {
                name: Self::MIN_ITEMS_VAR.to_string(),
                message: format!("'{value}' is not a valid item count"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<TreeConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        TreeConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_default_values() {
        let config = load(&[]).expect("defaults are valid");
        assert_eq!(config, TreeConfig::default());
        assert_eq!(config.min_items, 128);
        assert_eq!(config.simulation_seed, None);
        assert_eq!(config.simulation_operations, 1000);
    }

    #[test]
    fn test_all_values_set() {
        let config = load(&[
            ("BUCKET_MIN_ITEMS", "4"),
            ("BUCKET_SIMULATION_SEED", "42"),
            ("BUCKET_SIMULATION_OPERATIONS", "250"),
        ])
        .expect("valid values");

        assert_eq!(config.min_items, 4);
        assert_eq!(config.simulation_seed, Some(42));
        assert_eq!(config.simulation_operations, 250);
    }

    #[test]
    fn test_zero_min_items_rejected() {
        let error = load(&[("BUCKET_MIN_ITEMS", "0")]).expect_err("zero order");
        assert_eq!(
            error.to_string(),
            "invalid value for BUCKET_MIN_ITEMS: must be at least 1"
        );
    }

    #[test]
    fn test_non_numeric_values_rejected() {
        assert!(load(&[("BUCKET_MIN_ITEMS", "many")]).is_err());
        assert!(load(&[("BUCKET_MIN_ITEMS", "-3")]).is_err());
        assert!(load(&[("BUCKET_SIMULATION_SEED", "seed")]).is_err());
        assert!(load(&[("BUCKET_SIMULATION_OPERATIONS", "1.5")]).is_err());
    }

    #[test]
    fn test_config_error_display_invalid() {
        let error = ConfigError::InvalidValue {
            name: "TEST_VAR".to_string(),
            message: "bad value".to_string(),
        };
        assert_eq!(error.to_string(), "invalid value for TEST_VAR: bad value");
    }
}
