use orebalance::scenario::{run_optimization, OptimizationOutcome};
use orebalance::utils::logging;
use crate::config::{Config, SimulatorError};
use crate::simulation_results::ResultWriter;
use super::utils::{create_progress_bar, log_plant, run_timed, setup_logging};

const RESULTS_DIR: &str = "sim_optimization";

/// Grid search over feed rate and target recovery
pub async fn run_optimization_simulation() -> Result<(), SimulatorError> {
    setup_logging(RESULTS_DIR);

    let config = Config::load()?;
    let plant = config.plant_config()?;
    let settings = &config.optimization;
    let bounds = settings.bounds(&plant);
    let writer = ResultWriter::new(RESULTS_DIR)?;
    log_plant(&plant);
    logging::log(
        "SIMULATOR",
        &format!(
            "Optimization: {} over feed rate {:?} and target recovery {:?}",
            settings.objective, bounds.feed_rate, bounds.target_recovery
        ),
    );

    println!("Running Process Optimization");
    let progress_bar = create_progress_bar(1);
    let report = run_optimization(&plant, config.prices(), settings.objective, &settings.constraints(), &bounds)?;
    progress_bar.inc(1);

    match &report.outcome {
        OptimizationOutcome::Optimal { point, .. } => {
            let message = format!(
                "Optimum at feed rate {:.1}, target recovery {:.1}%: objective {:.2}",
                point.feed_rate, point.target_recovery, point.objective_value
            );
            logging::log("SIMULATOR", &message);
            progress_bar.finish_with_message(message);
        }
        OptimizationOutcome::Infeasible { evaluated } => {
            let message = format!("No feasible configuration among {} grid points", evaluated);
            logging::log("SIMULATOR", &message);
            progress_bar.finish_with_message(message);
        }
    }

    writer.save_metadata(RESULTS_DIR, &plant, config.prices())?;
    writer.save("optimization_report.json", &report)?;

    Ok(())
}

pub async fn run_with_timing() -> Result<(), SimulatorError> {
    run_timed(run_optimization_simulation, "Process Optimization").await
}
