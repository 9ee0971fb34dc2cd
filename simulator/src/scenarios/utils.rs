use std::env;
use std::fs;
use std::time::Instant;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use orebalance::utils::logging;
use orebalance::PlantConfig;
use crate::config::SimulatorError;
use crate::simulation_results::RESULTS_ROOT;

/// Routes `logging::log` output to `simulator/results/<results_dir>/simulation.log`
/// if ENABLE_LOGS environment variable is set
pub fn setup_logging(results_dir: &str) {
    if env::var("ENABLE_LOGS").is_ok() {
        let log_dir = format!("{}/{}", RESULTS_ROOT, results_dir);
        if let Err(e) = fs::create_dir_all(&log_dir) {
            eprintln!("Error creating log directory: {}", e);
            return;
        }
        // Start every run with a fresh log file
        let log_path = format!("{}/simulation.log", log_dir);
        if let Err(e) = fs::remove_file(&log_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        env::set_var("OREBALANCE_LOGGING", "true");
        env::set_var("OREBALANCE_LOG_TO_FILE", "true");
        env::set_var("OREBALANCE_LOG_FILE", log_path);
        logging::init_logging();
    }
}

/// Progress bar shared by every scenario
pub fn create_progress_bar(len: usize) -> ProgressBar {
    let progress_bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {msg}") {
        progress_bar.set_style(style.progress_chars("+>-"));
    }
    progress_bar
}

/// Logs the plant a scenario runs against
pub fn log_plant(plant: &PlantConfig) {
    let params = plant.parameters();
    logging::log("SIMULATOR", "=== Plant Configuration ===");
    logging::log("SIMULATOR", &format!("Start Time: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Circuits: {:?}", plant.circuits()));
    logging::log("SIMULATOR", &format!("Oxide Feed Rate: {}", params.oxide_feed_rate));
    logging::log("SIMULATOR", &format!("Sulphide Feed Rate: {}", params.sulphide_feed_rate));
    for (metal, grade) in plant.feed().grades.iter() {
        logging::log("SIMULATOR", &format!("{} Grade: {}%", metal, grade));
    }
    logging::log("SIMULATOR", &format!("3E Grade: {}%", plant.feed().three_e_grade()));
    logging::log("SIMULATOR", "===========================");
}

/// Runs a scenario, logging its start, completion and wall time
pub async fn run_timed<F, Fut>(simulation_fn: F, simulation_name: &str) -> Result<(), SimulatorError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<(), SimulatorError>>,
{
    let start = Instant::now();
    logging::log("SIMULATOR", &format!("=== Running {} ===", simulation_name));

    simulation_fn().await.map_err(|e| {
        SimulatorError::ValidationError(format!("{} failed: {}", simulation_name, e))
    })?;

    logging::log(
        "SIMULATOR",
        &format!("{} completed successfully in {:.2?}", simulation_name, start.elapsed()),
    );
    Ok(())
}
