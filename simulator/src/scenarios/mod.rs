pub mod sim_simple;
pub mod sim_monte_carlo;
pub mod sim_sensitivity;
pub mod sim_optimization;
pub mod sim_risk;
pub mod sim_sweep_feed_rate;
pub mod run_all_tests;
pub mod sweep_runner;
pub mod utils;
