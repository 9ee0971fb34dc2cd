use serde::{Deserialize, Serialize};
use crate::types::constants::{HOURS_PER_DAY, HOURS_PER_YEAR, OPERATING_COST_PER_TONNE};
use crate::types::{MetalAmounts, MetalPrices, SimulationResult};

/// Revenue of the recovered metal per unit time
pub fn compute_revenue(result: &SimulationResult, prices: &MetalPrices) -> f64 {
    result.final_recovered.weighted_sum(&prices.0)
}

/// Cost of processing the feed of every circuit that ran, per unit time
pub fn operating_cost(result: &SimulationResult) -> f64 {
    result.feed_mass() * OPERATING_COST_PER_TONNE
}

/// Recovered value over the value contained in the feed, in percent
pub fn value_weighted_recovery(result: &SimulationResult, prices: &MetalPrices) -> f64 {
    let contained = result.feed_metal().weighted_sum(&prices.0);
    if contained > 0.0 {
        compute_revenue(result, prices) / contained * 100.0
    } else {
        0.0
    }
}

/// Revenue split by circuit and metal, with time projections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueBreakdown {
    /// Revenue per metal from the oxide circuit, per hour
    pub oxide: MetalAmounts,
    /// Revenue per metal from the sulphide circuit, per hour
    pub sulphide: MetalAmounts,
    pub hourly: f64,
    pub daily: f64,
    pub annual: f64,
    pub operating_cost_hourly: f64,
}

impl RevenueBreakdown {
    pub fn oxide_total(&self) -> f64 {
        self.oxide.total()
    }

    pub fn sulphide_total(&self) -> f64 {
        self.sulphide.total()
    }

    pub fn hourly_margin(&self) -> f64 {
        self.hourly - self.operating_cost_hourly
    }
}

pub fn revenue_breakdown(result: &SimulationResult, prices: &MetalPrices) -> RevenueBreakdown {
    let value = |metals: MetalAmounts| metals.map(|metal, amount| amount * prices.price(metal));
    let hourly = compute_revenue(result, prices);
    RevenueBreakdown {
        oxide: value(result.oxide_recovered()),
        sulphide: value(result.sulphide_recovered()),
        hourly,
        daily: hourly * HOURS_PER_DAY,
        annual: hourly * HOURS_PER_YEAR,
        operating_cost_hourly: operating_cost(result),
    }
}
