use std::time::Instant;
use orebalance::utils::logging;
use crate::config::SimulatorError;

/// Runs every scenario one after another
pub async fn run_all_tests() -> Result<(), SimulatorError> {
    let start_time = Instant::now();

    logging::log("SIMULATOR", "=== Starting All Tests Suite ===");

    crate::scenarios::sim_simple::run_with_timing().await?;
    crate::scenarios::sim_monte_carlo::run_with_timing().await?;
    crate::scenarios::sim_sensitivity::run_with_timing().await?;
    crate::scenarios::sim_optimization::run_with_timing().await?;
    crate::scenarios::sim_risk::run_with_timing().await?;
    crate::scenarios::sim_sweep_feed_rate::run_with_timing().await?;

    let total_time = start_time.elapsed();
    logging::log("SIMULATOR", "=== All Tests Completed Successfully ===");
    logging::log("SIMULATOR", &format!("Total execution time: {:.2?}", total_time));

    println!("All tests completed successfully!");
    println!("Total execution time: {:.2?}", total_time);

    Ok(())
}
