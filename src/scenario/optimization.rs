use serde::{Deserialize, Serialize};
use std::fmt;
use crate::config::PlantConfig;
use crate::plant::run_simulation;
use crate::types::{MetalPrices, ProcessParameters};
use crate::valuation::{compute_revenue, operating_cost, value_weighted_recovery};
use super::stats::linspace;
use super::ScenarioError;

/// Upper end of the default target-recovery axis, in percent
const MAX_TARGET_RECOVERY: f64 = 95.0;

/// Quantity the grid search maximizes
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    Revenue,
    TotalRecovery,
    /// Cost per unit revenue, negated so larger is better
    CostPerUnitRevenue,
    ProfitMargin,
}

impl Objective {
    pub fn evaluate(&self, revenue: f64, cost: f64, recovery_percent: f64) -> f64 {
        let guarded_revenue = revenue.max(1.0);
        match self {
            Objective::Revenue => revenue,
            Objective::TotalRecovery => recovery_percent,
            Objective::CostPerUnitRevenue => -cost / guarded_revenue * 1000.0,
            Objective::ProfitMargin => (revenue - cost) / guarded_revenue * 100.0,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Objective::Revenue => "Maximize Revenue",
            Objective::TotalRecovery => "Maximize Metal Recovery",
            Objective::CostPerUnitRevenue => "Minimize Cost per Unit",
            Objective::ProfitMargin => "Maximize Profit Margin",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// Highest acceptable operating cost per unit time
    pub max_operating_cost: f64,
    /// Lowest acceptable value-weighted recovery, in percent
    pub min_recovery_percent: f64,
    /// Lowest acceptable feed 3E grade, in percent
    pub min_three_e_grade: Option<f64>,
}

/// Axes of the search grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchBounds {
    pub feed_rate: (f64, f64),
    pub target_recovery: (f64, f64),
    pub feed_rate_steps: usize,
    pub recovery_steps: usize,
}

impl SearchBounds {
    /// Feed rate from 80% of the largest active feed rate up to `max_feed_rate`
    /// in 10 steps; target recovery from `min_recovery` to 95% in 8 steps.
    pub fn around(base: &PlantConfig, max_feed_rate: f64, min_recovery: f64) -> Self {
        let params = base.parameters();
        let circuits = base.circuits();
        let mut largest: f64 = 0.0;
        if circuits.includes_oxide() {
            largest = largest.max(params.oxide_feed_rate);
        }
        if circuits.includes_sulphide() {
            largest = largest.max(params.sulphide_feed_rate);
        }
        Self {
            feed_rate: (largest * 0.8, max_feed_rate),
            target_recovery: (min_recovery, MAX_TARGET_RECOVERY),
            feed_rate_steps: 10,
            recovery_steps: 8,
        }
    }

    fn validate(&self) -> Result<(), ScenarioError> {
        let (feed_low, feed_high) = self.feed_rate;
        if !(feed_low.is_finite() && feed_high.is_finite()) || feed_low <= 0.0 || feed_low > feed_high {
            return Err(ScenarioError::InvalidBounds(format!(
                "feed rate range ({}, {}) must be positive and ascending",
                feed_low, feed_high
            )));
        }
        let (rec_low, rec_high) = self.target_recovery;
        if !(0.0..=100.0).contains(&rec_low) || !(0.0..=100.0).contains(&rec_high) || rec_low > rec_high {
            return Err(ScenarioError::InvalidBounds(format!(
                "target recovery range ({}, {}) must be ascending within [0, 100]",
                rec_low, rec_high
            )));
        }
        if self.feed_rate_steps == 0 || self.recovery_steps == 0 {
            return Err(ScenarioError::InvalidBounds("grid needs at least one step per axis".to_string()));
        }
        Ok(())
    }
}

/// One evaluated grid point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub feed_rate: f64,
    pub target_recovery: f64,
    pub revenue: f64,
    pub operating_cost: f64,
    pub recovery_percent: f64,
    pub objective_value: f64,
    pub feasible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OptimizationOutcome {
    Optimal { point: GridPoint, parameters: ProcessParameters },
    /// No grid point met the constraints
    Infeasible { evaluated: usize },
}

impl OptimizationOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, OptimizationOutcome::Optimal { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub objective: Objective,
    pub outcome: OptimizationOutcome,
    /// Every point in evaluation order, feed rate outer, recovery inner
    pub grid: Vec<GridPoint>,
}

/// Applies one grid point to the active circuits
fn grid_parameters(base: &PlantConfig, feed_rate: f64, target_recovery: f64) -> ProcessParameters {
    let mut params = base.parameters().clone();
    let circuits = base.circuits();
    if circuits.includes_oxide() {
        params.oxide_feed_rate = feed_rate;
        params.oxide_pd_recovery = target_recovery;
    }
    if circuits.includes_sulphide() {
        params.sulphide_feed_rate = feed_rate;
        params.final_cu_recovery = target_recovery;
        params.final_pd_recovery = target_recovery;
    }
    params
}

/// Grid search over feed rate × target recovery.
///
/// Keeps the first point with a strictly better objective among the feasible
/// ones, and reports [`OptimizationOutcome::Infeasible`] when there are none.
pub fn run_optimization(
    base: &PlantConfig,
    prices: &MetalPrices,
    objective: Objective,
    constraints: &Constraints,
    bounds: &SearchBounds,
) -> Result<OptimizationReport, ScenarioError> {
    bounds.validate()?;

    let grade_ok = constraints
        .min_three_e_grade
        .map_or(true, |min| base.feed().three_e_grade() >= min);

    let feed_rates = linspace(bounds.feed_rate.0, bounds.feed_rate.1, bounds.feed_rate_steps);
    let recoveries = linspace(bounds.target_recovery.0, bounds.target_recovery.1, bounds.recovery_steps);

    let mut grid = Vec::with_capacity(feed_rates.len() * recoveries.len());
    let mut best: Option<(GridPoint, ProcessParameters)> = None;

    for &feed_rate in &feed_rates {
        for &target_recovery in &recoveries {
            let params = grid_parameters(base, feed_rate, target_recovery);
            let config = base.with_inputs(*base.feed(), params.clone())?;
            let result = run_simulation(&config);

            let revenue = compute_revenue(&result, prices);
            let cost = operating_cost(&result);
            let recovery_percent = value_weighted_recovery(&result, prices);
            let feasible = grade_ok
                && cost <= constraints.max_operating_cost
                && recovery_percent >= constraints.min_recovery_percent;

            let point = GridPoint {
                feed_rate,
                target_recovery,
                revenue,
                operating_cost: cost,
                recovery_percent,
                objective_value: objective.evaluate(revenue, cost, recovery_percent),
                feasible,
            };

            if feasible {
                let improves = best
                    .as_ref()
                    .map_or(true, |(current, _)| point.objective_value > current.objective_value);
                if improves {
                    best = Some((point.clone(), params));
                }
            }
            grid.push(point);
        }
    }

    let outcome = match best {
        Some((point, parameters)) => OptimizationOutcome::Optimal { point, parameters },
        None => {
            tracing::warn!(evaluated = grid.len(), objective = %objective, "no feasible grid point");
            OptimizationOutcome::Infeasible { evaluated: grid.len() }
        }
    };

    Ok(OptimizationReport { objective, outcome, grid })
}
