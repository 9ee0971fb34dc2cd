use serde::{Deserialize, Serialize};
use std::fmt;
use crate::config::PlantConfig;
use crate::plant::run_simulation;
use crate::types::{Metal, MetalPrices, ParameterFamily, ProcessParameters, SimulationResult};
use crate::valuation::compute_revenue;
use super::ScenarioError;

/// Inputs swept together in a one-factor sensitivity run
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityFamily {
    FeedRate,
    FeedGrades,
    RecoveryRates,
    ProcessEfficiencies,
    /// Re-values the baseline run; the plant is not re-simulated
    MetalPrices,
}

impl SensitivityFamily {
    pub const ALL: [SensitivityFamily; 5] = [
        SensitivityFamily::FeedRate,
        SensitivityFamily::FeedGrades,
        SensitivityFamily::RecoveryRates,
        SensitivityFamily::ProcessEfficiencies,
        SensitivityFamily::MetalPrices,
    ];
}

impl fmt::Display for SensitivityFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SensitivityFamily::FeedRate => "Feed Rate",
            SensitivityFamily::FeedGrades => "Feed Grades",
            SensitivityFamily::RecoveryRates => "Recovery Rates",
            SensitivityFamily::ProcessEfficiencies => "Process Efficiencies",
            SensitivityFamily::MetalPrices => "Metal Prices",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    /// Relative change applied to the family, in percent
    pub level: f64,
    pub revenue: f64,
    /// Revenue change against the baseline, in percent
    pub change_percent: f64,
    /// |change_percent| / |level|; absent at the zero level
    pub coefficient: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityReport {
    pub family: SensitivityFamily,
    pub base_revenue: f64,
    pub points: Vec<SensitivityPoint>,
    /// Mean coefficient over the non-zero levels
    pub average_coefficient: f64,
}

fn scale_family(params: &mut ProcessParameters, family: ParameterFamily, factor: f64) {
    for parameter in ProcessParameters::family_members(family) {
        let mut value = params.get(parameter) * factor;
        if parameter.is_percentage() {
            value = value.clamp(0.0, 100.0);
        }
        params.set(parameter, value);
    }
}

/// Revenue with every member of `family` multiplied by `factor`
fn revenue_at(
    base: &PlantConfig,
    prices: &MetalPrices,
    family: SensitivityFamily,
    factor: f64,
    baseline: &SimulationResult,
) -> Result<f64, ScenarioError> {
    let mut params = base.parameters().clone();
    let mut feed = *base.feed();
    match family {
        SensitivityFamily::MetalPrices => return Ok(compute_revenue(baseline, &prices.scaled(factor))),
        SensitivityFamily::FeedRate => scale_family(&mut params, ParameterFamily::FeedRate, factor),
        SensitivityFamily::RecoveryRates => scale_family(&mut params, ParameterFamily::Recovery, factor),
        SensitivityFamily::ProcessEfficiencies => scale_family(&mut params, ParameterFamily::Efficiency, factor),
        SensitivityFamily::FeedGrades => {
            for metal in Metal::ALL {
                feed.grades.set(metal, (feed.grade(metal) * factor).clamp(0.0, 100.0));
            }
        }
    }
    let config = base.with_inputs(feed, params)?;
    Ok(compute_revenue(&run_simulation(&config), prices))
}

/// Sweeps `family` over {−V, −V/2, 0, V/2, V} percent with everything else at baseline
pub fn run_sensitivity(
    base: &PlantConfig,
    prices: &MetalPrices,
    family: SensitivityFamily,
    range_percent: f64,
) -> Result<SensitivityReport, ScenarioError> {
    if !range_percent.is_finite() || range_percent <= 0.0 || range_percent >= 100.0 {
        return Err(ScenarioError::InvalidRange(range_percent));
    }

    let baseline = run_simulation(base);
    let base_revenue = compute_revenue(&baseline, prices);
    let levels = [-range_percent, -range_percent / 2.0, 0.0, range_percent / 2.0, range_percent];

    let mut points = Vec::with_capacity(levels.len());
    for level in levels {
        // The zero level is the unperturbed baseline
        let revenue = if level == 0.0 {
            base_revenue
        } else {
            revenue_at(base, prices, family, 1.0 + level / 100.0, &baseline)?
        };
        let change_percent = if base_revenue != 0.0 {
            (revenue - base_revenue) / base_revenue * 100.0
        } else {
            0.0
        };
        let coefficient = (level != 0.0).then(|| change_percent.abs() / level.abs());
        points.push(SensitivityPoint { level, revenue, change_percent, coefficient });
    }

    let coefficients: Vec<f64> = points.iter().filter_map(|p| p.coefficient).collect();
    let average_coefficient = coefficients.iter().sum::<f64>() / coefficients.len() as f64;
    tracing::debug!(family = %family, average_coefficient, "sensitivity sweep complete");

    Ok(SensitivityReport { family, base_revenue, points, average_coefficient })
}
