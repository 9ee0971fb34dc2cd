use orebalance::scenario::{assess_risk, capacity_utilization};
use orebalance::utils::logging;
use orebalance::run_simulation;
use crate::config::{Config, SimulatorError};
use crate::simulation_results::ResultWriter;
use super::utils::{create_progress_bar, log_plant, run_timed, setup_logging};

const RESULTS_DIR: &str = "sim_risk";

/// Expected losses from equipment failures and supply disruptions, plus stage utilization
pub async fn run_risk_simulation() -> Result<(), SimulatorError> {
    setup_logging(RESULTS_DIR);

    let config = Config::load()?;
    let plant = config.plant_config()?;
    let writer = ResultWriter::new(RESULTS_DIR)?;
    log_plant(&plant);

    println!("Running Risk Analysis");
    let progress_bar = create_progress_bar(2);

    let report = assess_risk(&plant, config.prices(), &config.risk)?;
    for scenario in &report.scenarios {
        logging::log(
            "RISK",
            &format!("{}: revenue {:.2}, impact {:.2}", scenario.event, scenario.revenue, scenario.impact),
        );
    }
    progress_bar.inc(1);

    let utilization = capacity_utilization(&run_simulation(&plant));
    for stage in &utilization.stages {
        logging::log(
            "CAPACITY",
            &format!(
                "{} {}: {:.1}% of {:.1} ({})",
                stage.process, stage.stage, stage.utilization_percent, stage.capacity, stage.status
            ),
        );
    }
    progress_bar.inc(1);

    match report.worst() {
        Some(worst) => progress_bar.finish_with_message(format!("Largest exposure: {} ({:.0}/h)", worst.event, worst.impact)),
        None => progress_bar.finish_with_message("No risk events assessed"),
    }

    writer.save_metadata(RESULTS_DIR, &plant, config.prices())?;
    writer.save("risk_report.json", &report)?;
    writer.save("capacity_utilization.json", &utilization)?;

    Ok(())
}

pub async fn run_with_timing() -> Result<(), SimulatorError> {
    run_timed(run_risk_simulation, "Risk Analysis").await
}
