use orebalance::scenario::capacity_utilization;
use orebalance::utils::logging;
use orebalance::valuation::revenue_breakdown;
use orebalance::run_simulation;
use crate::config::{Config, SimulatorError};
use crate::simulation_results::ResultWriter;
use super::utils::{create_progress_bar, log_plant, run_timed, setup_logging};

const RESULTS_DIR: &str = "sim_simple";

/// Runs the base plant once and records its flows, revenue and capacity usage
pub async fn run_simple_simulation() -> Result<(), SimulatorError> {
    setup_logging(RESULTS_DIR);

    let config = Config::load()?;
    let plant = config.plant_config()?;
    let writer = ResultWriter::new(RESULTS_DIR)?;
    log_plant(&plant);

    println!("Running Simple Simulation");
    let progress_bar = create_progress_bar(1);

    let result = run_simulation(&plant);
    let breakdown = revenue_breakdown(&result, config.prices());
    let utilization = capacity_utilization(&result);

    if logging::is_enabled() {
        for (process, stage) in result.stage_results() {
            logging::log(
                "STAGE",
                &format!(
                    "{} {}: {:.2} of {:.2} t/h ({:.1}%)",
                    process,
                    stage.stage,
                    stage.mass,
                    stage.input_mass,
                    stage.stage_recovery_percent()
                ),
            );
        }
    }
    if !result.has_flow_issues() {
        logging::log("FLOW", "No capacity shortfalls or bottlenecks");
    }
    for warning in &result.warnings {
        logging::log("FLOW", &warning.to_string());
    }
    for bottleneck in &result.bottlenecks {
        logging::log(
            "BOTTLENECK",
            &format!(
                "{} {}: {:.2} against {:.2}, {:.1}% loss (potential gain {:.2})",
                bottleneck.process,
                bottleneck.stage,
                bottleneck.limiting_throughput,
                bottleneck.reference.value(),
                bottleneck.efficiency_loss_percent,
                bottleneck.potential_gain()
            ),
        );
    }
    logging::log("SIMULATOR", &format!("Hourly revenue: {:.2}", breakdown.hourly));
    logging::log("SIMULATOR", &format!("Hourly operating cost: {:.2}", breakdown.operating_cost_hourly));
    logging::log("SIMULATOR", &format!("Hourly margin: {:.2}", breakdown.hourly_margin()));
    logging::log("SIMULATOR", &format!("Average utilization: {:.1}%", utilization.average_utilization_percent));

    writer.save_metadata(RESULTS_DIR, &plant, config.prices())?;
    writer.save("simulation_result.json", &result)?;
    writer.save("revenue_breakdown.json", &breakdown)?;
    writer.save("capacity_utilization.json", &utilization)?;

    progress_bar.inc(1);
    progress_bar.finish_with_message(format!(
        "Revenue {:.0}/h, {} warnings, {} bottlenecks",
        breakdown.hourly,
        result.warnings.len(),
        result.bottlenecks.len()
    ));

    Ok(())
}

pub async fn run_with_timing() -> Result<(), SimulatorError> {
    run_timed(run_simple_simulation, "Simple Simulation").await
}
