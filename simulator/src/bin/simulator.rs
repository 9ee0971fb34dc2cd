use std::env;
use std::fs;
use std::process::ExitCode;
use simulator::interface::{SimulationType, SimulatorInterface};
use simulator::simulation_results::RESULTS_ROOT;

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Runs the scenario named by the first argument (a menu number), or shows the menu
#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = fs::create_dir_all(RESULTS_ROOT) {
        eprintln!("Failed to create results directory: {}", e);
        return ExitCode::FAILURE;
    }

    setup_tracing();

    let interface = SimulatorInterface::new();
    let outcome = match env::args().nth(1) {
        Some(arg) => match SimulationType::from_input(&arg) {
            Some(SimulationType::Exit) => Ok(()),
            Some(simulation_type) => interface.run(simulation_type).await,
            None => Err(format!("Unknown simulation type '{}'\n{}", arg, interface.get_menu_text())),
        },
        None => interface.run_interactive().await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr subscriber for engine diagnostics if ENABLE_LOGS environment variable is set
fn setup_tracing() {
    if env::var("ENABLE_LOGS").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
