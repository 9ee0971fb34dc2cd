use indicatif::ProgressBar;
use orebalance::scenario::{run_trial, summarize, MonteCarloReport, ScenarioError};
use orebalance::types::MetalPrices;
use orebalance::utils::logging;
use orebalance::PlantConfig;
use crate::config::{Config, MonteCarloConfig, SimulatorError, ValidateConfig};
use crate::simulation_results::ResultWriter;
use super::utils::{create_progress_bar, log_plant, run_timed, setup_logging};

const RESULTS_DIR: &str = "sim_monte_carlo";

// ------------------------------------------------------------------------------------------------
// Parallel Execution
// ------------------------------------------------------------------------------------------------

/// Splits the trials into `workers` contiguous chunks on the blocking pool.
///
/// Every trial is seeded from its own index, so the report equals the one
/// `orebalance::scenario::run_monte_carlo` produces sequentially.
pub async fn run_parallel_monte_carlo(
    plant: &PlantConfig,
    prices: &MetalPrices,
    settings: &MonteCarloConfig,
    progress_bar: &ProgressBar,
) -> Result<MonteCarloReport, SimulatorError> {
    settings.validate()?;
    let chunk_size = (settings.trials + settings.workers - 1) / settings.workers;

    let mut handles = Vec::with_capacity(settings.workers);
    for start in (0..settings.trials).step_by(chunk_size) {
        let end = (start + chunk_size).min(settings.trials);
        let plant = plant.clone();
        let prices = *prices;
        let variation = settings.variation;
        let progress_bar = progress_bar.clone();

        handles.push(tokio::task::spawn_blocking(move || {
            let mut outcomes = Vec::with_capacity(end - start);
            for index in start..end {
                outcomes.push(run_trial(&plant, &prices, &variation, index)?);
                progress_bar.inc(1);
            }
            Ok::<_, ScenarioError>(outcomes)
        }));
    }

    let mut outcomes = Vec::with_capacity(settings.trials);
    for handle in handles {
        outcomes.extend(handle.await??);
    }
    Ok(summarize(outcomes, settings.confidence_level)?)
}

// ------------------------------------------------------------------------------------------------
// Simulation Entry Point
// ------------------------------------------------------------------------------------------------

pub async fn run_monte_carlo_simulation() -> Result<(), SimulatorError> {
    setup_logging(RESULTS_DIR);

    let config = Config::load()?;
    let plant = config.plant_config()?;
    let settings = &config.monte_carlo;
    let writer = ResultWriter::new(RESULTS_DIR)?;
    log_plant(&plant);
    logging::log(
        "SIMULATOR",
        &format!(
            "Monte Carlo: {} trials on {} workers, seed {}",
            settings.trials, settings.workers, settings.variation.seed
        ),
    );

    println!("Running Monte Carlo Simulation");
    let progress_bar = create_progress_bar(settings.trials);
    let report = run_parallel_monte_carlo(&plant, config.prices(), settings, &progress_bar).await?;

    let revenue = &report.revenue;
    progress_bar.finish_with_message(format!(
        "Mean revenue {:.0}/h, {}% interval [{:.0}, {:.0}]",
        revenue.mean, revenue.confidence_level, revenue.lower_quantile, revenue.upper_quantile
    ));
    logging::log("SIMULATOR", &format!("Mean revenue: {:.2}", revenue.mean));
    logging::log("SIMULATOR", &format!("Median revenue: {:.2}", revenue.median));
    logging::log("SIMULATOR", &format!("Std dev: {:.2}", revenue.std_dev));
    logging::log("SIMULATOR", &format!("Coefficient of variation: {:.2}%", revenue.coefficient_of_variation));
    logging::log(
        "SIMULATOR",
        &format!("Trials with overloaded stages: {}/{}", report.overloaded_trials, report.trials.len()),
    );

    writer.save_metadata(RESULTS_DIR, &plant, config.prices())?;
    writer.save("monte_carlo_settings.json", &settings.variation)?;
    writer.save("monte_carlo_report.json", &report)?;

    Ok(())
}

pub async fn run_with_timing() -> Result<(), SimulatorError> {
    run_timed(run_monte_carlo_simulation, "Monte Carlo Simulation").await
}
