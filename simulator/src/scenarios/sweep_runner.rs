use indicatif::ProgressBar;
use serde::Serialize;
use orebalance::scenario::capacity_utilization;
use orebalance::types::MetalPrices;
use orebalance::utils::logging;
use orebalance::valuation::{compute_revenue, operating_cost, value_weighted_recovery};
use orebalance::{run_simulation, PlantConfig};
use crate::config::SimulatorError;
use crate::simulation_results::ResultWriter;
use super::utils::create_progress_bar;

/// Builds the plant for one parameter value from the base plant
pub type ConfigModifier<T> = Box<dyn Fn(&PlantConfig, &T) -> Result<PlantConfig, SimulatorError> + Send + Sync>;

/// Outcome of one run of a sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint<T> {
    pub parameter: T,
    pub revenue: f64,
    pub operating_cost: f64,
    pub recovery_percent: f64,
    pub warnings: usize,
    pub bottlenecks: usize,
    pub average_utilization_percent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary<T> {
    pub sweep_name: String,
    pub parameter_name: String,
    pub num_simulations: usize,
    pub points: Vec<SweepPoint<T>>,
}

/// Generic one-parameter sweep over the base plant
pub struct SweepRunner<T> {
    sweep_name: String,
    results_dir: String,
    parameter_name: String,
    parameter_values: Vec<T>,
    config_modifier: ConfigModifier<T>,
}

impl<T: std::fmt::Debug + Clone + Serialize> SweepRunner<T> {
    pub fn new(
        sweep_name: &str,
        results_dir: &str,
        parameter_name: &str,
        parameter_values: Vec<T>,
        config_modifier: ConfigModifier<T>,
    ) -> Self {
        Self {
            sweep_name: sweep_name.to_string(),
            results_dir: results_dir.to_string(),
            parameter_name: parameter_name.to_string(),
            parameter_values,
            config_modifier,
        }
    }

    /// Runs every parameter value in order and collects the points
    pub fn sweep(
        &self,
        base: &PlantConfig,
        prices: &MetalPrices,
        progress_bar: &ProgressBar,
    ) -> Result<SweepSummary<T>, SimulatorError> {
        let total = self.parameter_values.len();
        let mut points = Vec::with_capacity(total);

        for (sim_index, value) in self.parameter_values.iter().enumerate() {
            logging::log(
                "SIMULATOR",
                &format!("Running simulation {}/{} with {}: {:?}", sim_index + 1, total, self.parameter_name, value),
            );

            let plant = (self.config_modifier)(base, value).map_err(|e| {
                SimulatorError::ValidationError(format!(
                    "Sweep '{}' failed during simulation {}/{} with {}: {:?}. Error: {}",
                    self.sweep_name,
                    sim_index + 1,
                    total,
                    self.parameter_name,
                    value,
                    e
                ))
            })?;
            let result = run_simulation(&plant);

            points.push(SweepPoint {
                parameter: value.clone(),
                revenue: compute_revenue(&result, prices),
                operating_cost: operating_cost(&result),
                recovery_percent: value_weighted_recovery(&result, prices),
                warnings: result.warnings.len(),
                bottlenecks: result.bottlenecks.len(),
                average_utilization_percent: capacity_utilization(&result).average_utilization_percent,
            });

            progress_bar.inc(1);
            progress_bar.set_message(self.format_progress_message(sim_index, total, value));
        }

        Ok(SweepSummary {
            sweep_name: self.sweep_name.clone(),
            parameter_name: self.parameter_name.clone(),
            num_simulations: points.len(),
            points,
        })
    }

    /// Runs the sweep with a progress bar and saves the combined results
    pub fn run(&self, base: &PlantConfig, prices: &MetalPrices) -> Result<SweepSummary<T>, SimulatorError> {
        let writer = ResultWriter::new(&self.results_dir)?;

        logging::log("SIMULATOR", &format!("=== Sweep {} Simulation ===", self.sweep_name));
        logging::log("SIMULATOR", &format!("Number of simulations: {}", self.parameter_values.len()));
        logging::log("SIMULATOR", &format!("{} values: {:?}", self.parameter_name, self.parameter_values));

        println!("Running Sweep: {}", self.sweep_name);
        let progress_bar = create_progress_bar(self.parameter_values.len());
        let summary = self.sweep(base, prices, &progress_bar)?;
        progress_bar.finish_with_message(format!("{} simulations complete", summary.num_simulations));

        writer.save_metadata(&self.results_dir, base, prices)?;
        writer.save("sweep_results.json", &summary)?;

        logging::log("SIMULATOR", "=== Sweep Simulation Complete ===");
        logging::log("SIMULATOR", &format!("Total simulations completed: {}", summary.num_simulations));

        Ok(summary)
    }

    fn format_progress_message(&self, sim_index: usize, total_sims: usize, value: &T) -> String {
        format!("Simulation {}/{} with {}: {:?}", sim_index + 1, total_sims, self.parameter_name, value)
    }
}
