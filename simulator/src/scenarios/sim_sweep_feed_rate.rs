use orebalance::PlantConfig;
use crate::config::{Config, SimulatorError};
use super::sweep_runner::SweepRunner;
use super::utils::{log_plant, run_timed, setup_logging};

const RESULTS_DIR: &str = "sim_sweep_feed_rate";

/// Sets the feed rate of every active circuit
pub fn with_feed_rate(base: &PlantConfig, feed_rate: &f64) -> Result<PlantConfig, SimulatorError> {
    let mut params = base.parameters().clone();
    let circuits = base.circuits();
    if circuits.includes_oxide() {
        params.oxide_feed_rate = *feed_rate;
    }
    if circuits.includes_sulphide() {
        params.sulphide_feed_rate = *feed_rate;
    }
    Ok(base.with_inputs(*base.feed(), params)?)
}

pub fn feed_rate_runner(feed_rates: Vec<f64>) -> SweepRunner<f64> {
    SweepRunner::new("Feed Rate", RESULTS_DIR, "feed_rate", feed_rates, Box::new(with_feed_rate))
}

pub async fn run_sweep_feed_rate_simulation() -> Result<(), SimulatorError> {
    setup_logging(RESULTS_DIR);

    let config = Config::load()?;
    let plant = config.plant_config()?;
    log_plant(&plant);

    feed_rate_runner(config.sweep.feed_rates()).run(&plant, config.prices())?;
    Ok(())
}

pub async fn run_with_timing() -> Result<(), SimulatorError> {
    run_timed(run_sweep_feed_rate_simulation, "Feed Rate Sweep").await
}
