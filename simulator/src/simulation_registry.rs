//! Central registry for all scenario types in the orebalance simulator.
//! Maps menu entries to their display name, entry point and results directory.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::scenarios::{
    run_all_tests::run_all_tests,
    sim_monte_carlo::run_monte_carlo_simulation,
    sim_optimization::run_optimization_simulation,
    sim_risk::run_risk_simulation,
    sim_sensitivity::run_sensitivity_simulation,
    sim_simple::run_simple_simulation,
    sim_sweep_feed_rate::run_sweep_feed_rate_simulation,
};

use super::interface::SimulationType;

pub type SimulationFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;

/// Configuration for a simulation type
pub struct SimulationConfig {
    pub name: &'static str,
    pub run_fn: Box<dyn Fn() -> SimulationFuture + Send + Sync>,
    /// Directory under `simulator/results`; empty when the entry writes nothing itself
    pub results_dir: &'static str,
}

/// Registry that holds all simulation configurations
pub struct SimulationRegistry {
    simulations: HashMap<SimulationType, SimulationConfig>,
}

impl SimulationRegistry {
    pub fn new() -> Self {
        let mut simulations = HashMap::new();

        simulations.insert(SimulationType::Simple, SimulationConfig {
            name: "Simple Simulation",
            run_fn: Box::new(|| Box::pin(async {
                run_simple_simulation().await
                    .map_err(|e| format!("Simple simulation failed: {}", e))
            })),
            results_dir: "sim_simple",
        });

        simulations.insert(SimulationType::MonteCarlo, SimulationConfig {
            name: "Monte Carlo Simulation",
            run_fn: Box::new(|| Box::pin(async {
                run_monte_carlo_simulation().await
                    .map_err(|e| format!("Monte Carlo simulation failed: {}", e))
            })),
            results_dir: "sim_monte_carlo",
        });

        simulations.insert(SimulationType::Sensitivity, SimulationConfig {
            name: "Sensitivity Analysis",
            run_fn: Box::new(|| Box::pin(async {
                run_sensitivity_simulation().await
                    .map_err(|e| format!("Sensitivity analysis failed: {}", e))
            })),
            results_dir: "sim_sensitivity",
        });

        simulations.insert(SimulationType::Optimization, SimulationConfig {
            name: "Process Optimization",
            run_fn: Box::new(|| Box::pin(async {
                run_optimization_simulation().await
                    .map_err(|e| format!("Process optimization failed: {}", e))
            })),
            results_dir: "sim_optimization",
        });

        simulations.insert(SimulationType::Risk, SimulationConfig {
            name: "Risk Analysis",
            run_fn: Box::new(|| Box::pin(async {
                run_risk_simulation().await
                    .map_err(|e| format!("Risk analysis failed: {}", e))
            })),
            results_dir: "sim_risk",
        });

        simulations.insert(SimulationType::SweepFeedRate, SimulationConfig {
            name: "Feed Rate Sweep",
            run_fn: Box::new(|| Box::pin(async {
                run_sweep_feed_rate_simulation().await
                    .map_err(|e| format!("Feed rate sweep failed: {}", e))
            })),
            results_dir: "sim_sweep_feed_rate",
        });

        simulations.insert(SimulationType::RunAllTests, SimulationConfig {
            name: "All Tests",
            run_fn: Box::new(|| Box::pin(async {
                run_all_tests().await
                    .map_err(|e| format!("All tests failed: {}", e))
            })),
            results_dir: "",
        });

        Self { simulations }
    }

    pub fn get(&self, simulation_type: &SimulationType) -> Option<&SimulationConfig> {
        self.simulations.get(simulation_type)
    }

    pub fn get_results_dir(&self, simulation_type: &SimulationType) -> Option<&str> {
        self.simulations.get(simulation_type)
            .map(|config| config.results_dir)
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }
}

impl Default for SimulationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Global registry instance
lazy_static::lazy_static! {
    static ref REGISTRY: Arc<Mutex<SimulationRegistry>> = Arc::new(Mutex::new(SimulationRegistry::new()));
}

/// Get a reference to the global registry
pub async fn get_registry() -> Arc<Mutex<SimulationRegistry>> {
    REGISTRY.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_runnable_menu_entry_is_registered() {
        let registry = get_registry().await;
        let registry = registry.lock().await;
        for simulation_type in SimulationType::RUNNABLE {
            assert!(registry.get(&simulation_type).is_some(), "{:?} missing", simulation_type);
        }
        assert_eq!(registry.len(), SimulationType::RUNNABLE.len());
        assert_eq!(registry.get_results_dir(&SimulationType::MonteCarlo), Some("sim_monte_carlo"));
        assert!(registry.get(&SimulationType::Exit).is_none());
    }
}
