mod monte_carlo;
mod optimization;
mod risk;

use crate::config::PlantConfig;
use crate::plant::run_simulation;
use crate::types::MetalPrices;
use crate::valuation::compute_revenue;

fn baseline_revenue(config: &PlantConfig) -> f64 {
    compute_revenue(&run_simulation(config), &MetalPrices::default())
}
