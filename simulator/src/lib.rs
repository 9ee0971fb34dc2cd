pub mod config;
pub mod interface;
pub mod scenarios;
pub mod simulation_registry;
pub mod simulation_results;

pub use config::{Config, SimulatorError};
pub use simulation_results::ResultWriter;
pub use scenarios::sim_monte_carlo::run_parallel_monte_carlo;
pub use scenarios::sweep_runner::{SweepPoint, SweepRunner, SweepSummary};
