use orebalance::scenario::run_sensitivity;
use orebalance::utils::logging;
use crate::config::{Config, SimulatorError};
use crate::simulation_results::ResultWriter;
use super::utils::{create_progress_bar, log_plant, run_timed, setup_logging};

const RESULTS_DIR: &str = "sim_sensitivity";

/// One-factor sensitivity sweep for every configured family
pub async fn run_sensitivity_simulation() -> Result<(), SimulatorError> {
    setup_logging(RESULTS_DIR);

    let config = Config::load()?;
    let plant = config.plant_config()?;
    let settings = &config.sensitivity;
    let writer = ResultWriter::new(RESULTS_DIR)?;
    log_plant(&plant);

    println!("Running Sensitivity Analysis");
    let progress_bar = create_progress_bar(settings.families.len());

    let mut reports = Vec::with_capacity(settings.families.len());
    for family in &settings.families {
        let report = run_sensitivity(&plant, config.prices(), *family, settings.range_percent)?;
        logging::log(
            "SIMULATOR",
            &format!("{}: average sensitivity coefficient {:.3}", family, report.average_coefficient),
        );
        for point in &report.points {
            logging::log(
                "SIMULATOR",
                &format!("  {:+.1}% -> revenue {:.2} ({:+.2}%)", point.level, point.revenue, point.change_percent),
            );
        }
        progress_bar.inc(1);
        progress_bar.set_message(format!("{} done", family));
        reports.push(report);
    }

    // Most influential family first
    let mut ranking: Vec<_> = reports.iter().map(|r| (r.family, r.average_coefficient)).collect();
    ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
    if let Some((family, coefficient)) = ranking.first() {
        progress_bar.finish_with_message(format!("Most sensitive: {} ({:.2})", family, coefficient));
    }

    writer.save_metadata(RESULTS_DIR, &plant, config.prices())?;
    writer.save("sensitivity_reports.json", &reports)?;
    writer.save("sensitivity_ranking.json", &ranking)?;

    Ok(())
}

pub async fn run_with_timing() -> Result<(), SimulatorError> {
    run_timed(run_sensitivity_simulation, "Sensitivity Analysis").await
}
