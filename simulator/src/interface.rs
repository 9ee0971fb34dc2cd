use std::io::{self, Write};
use crate::simulation_registry::get_registry;

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum SimulationType {
    Simple,
    MonteCarlo,
    Sensitivity,
    Optimization,
    Risk,
    SweepFeedRate,
    RunAllTests,
    Exit,
}

impl SimulationType {
    /// Every entry that runs something, in menu order
    pub const RUNNABLE: [SimulationType; 7] = [
        SimulationType::Simple,
        SimulationType::MonteCarlo,
        SimulationType::Sensitivity,
        SimulationType::Optimization,
        SimulationType::Risk,
        SimulationType::SweepFeedRate,
        SimulationType::RunAllTests,
    ];

    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SimulationType::Simple),
            "2" => Some(SimulationType::MonteCarlo),
            "3" => Some(SimulationType::Sensitivity),
            "4" => Some(SimulationType::Optimization),
            "5" => Some(SimulationType::Risk),
            "6" => Some(SimulationType::SweepFeedRate),
            "7" => Some(SimulationType::RunAllTests),
            "0" => Some(SimulationType::Exit),
            _ => None,
        }
    }
}

pub struct SimulatorInterface;

impl Default for SimulatorInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatorInterface {
    pub fn new() -> Self {
        Self
    }

    pub fn get_menu_text(&self) -> &'static str {
        "Available simulation types:\n  1. Simple simulation\n  2. Monte Carlo simulation\n  3. Sensitivity analysis\n  4. Process optimization\n  5. Risk analysis\n  6. Sweep feed rate\n  7. Run All Tests\n  0. Exit"
    }

    pub fn show_menu(&self) {
        println!("=== Orebalance Simulator ===");
        println!("{}", self.get_menu_text());
    }

    /// Reads one menu choice from stdin; `None` for unreadable or unknown input
    pub fn get_user_choice(&self) -> Option<SimulationType> {
        print!("\nSelect simulation type (0-7): ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        io::stdin().read_line(&mut input).ok()?;

        SimulationType::from_input(&input)
    }

    /// Runs one registered scenario
    pub async fn run(&self, simulation_type: SimulationType) -> Result<(), String> {
        let registry = get_registry().await;
        let registry = registry.lock().await;
        let simulation = registry
            .get(&simulation_type)
            .ok_or_else(|| format!("No simulation registered for {:?}", simulation_type))?;

        (simulation.run_fn)().await?;
        if simulation.results_dir.is_empty() {
            println!("{} completed successfully!", simulation.name);
        } else {
            println!(
                "{} completed successfully! Results in simulator/results/{}",
                simulation.name, simulation.results_dir
            );
        }
        Ok(())
    }

    pub async fn run_interactive(&self) -> Result<(), String> {
        loop {
            self.show_menu();

            match self.get_user_choice() {
                Some(SimulationType::Exit) => {
                    println!("Exiting...");
                    break;
                }
                Some(simulation_type) => {
                    self.run(simulation_type).await?;
                    break;
                }
                None => {
                    println!("Invalid choice. Please enter a number from 1 to 7, or 0 to exit.");
                }
            }
        }

        Ok(())
    }
}
