#![cfg_attr(test, allow(clippy::disallowed_methods))]
// Forbid unwrap() in production code to prevent panics from corrupt data.
// Test code is allowed to use unwrap() for convenience.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

use bucket::simulation::{Simulator, SimulatorConfig};
use bucket::{Tree, TreeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bucket=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment variables
    let config = match TreeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "Loaded configuration: min_items={}, simulation_seed={:?}",
        config.min_items,
        config.simulation_seed
    );

    let mut tree: Tree<String, String> = match Tree::with_config(&config) {
        Ok(tree) => tree,
        Err(e) => {
            tracing::error!("Failed to create tree: {e}");
            std::process::exit(1);
        }
    };

    tree.put("0".to_string(), "zero".to_string());
    match tree.find("0") {
        Some(item) => tracing::info!("found {} = {}", item.key(), item.value()),
        None => tracing::warn!("key 0 missing right after put"),
    }

    if let Err(e) = tree.remove("0") {
        tracing::error!("Failed to remove key 0: {e}");
        std::process::exit(1);
    }
    if tree.find("0").is_none() {
        tracing::info!("key 0 absent after remove, {} items left", tree.len());
    }

    let Some(seed) = config.simulation_seed else {
        return;
    };

    let simulator_config = SimulatorConfig::new(seed).with_min_items(config.min_items);
    let mut simulator = Simulator::new(simulator_config);
    let result = simulator.run(config.simulation_operations);

    tracing::info!(
        "Simulation seed={} operations={} final_len={} max_height={}",
        result.seed,
        result.operations_processed,
        result.final_len,
        result.max_height
    );

    if !result.passed() {
        for violation in &result.invariant_violations {
            tracing::error!(
                "Invariant violation at operation {}: {} ({})",
                violation.operation_index,
                violation.description,
                violation.context
            );
        }
        if let Some(error) = &result.error {
            tracing::error!("Simulation failed: {error}");
        }
        std::process::exit(1);
    }
}
