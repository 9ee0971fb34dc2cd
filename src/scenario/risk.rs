use serde::{Deserialize, Serialize};
use std::fmt;
use crate::config::PlantConfig;
use crate::plant::run_simulation;
use crate::types::constants::HOURS_PER_DAY;
use crate::types::MetalPrices;
use crate::valuation::compute_revenue;
use super::ScenarioError;

/// Flotation failures cost less than a full outage
const FLOTATION_IMPACT_FACTOR: f64 = 0.8;

/// Event probabilities and severities, all in percent except downtime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSpec {
    pub crusher_failure_percent: f64,
    pub mill_failure_percent: f64,
    pub flotation_failure_percent: f64,
    pub downtime_hours: f64,
    pub supply_disruption_percent: f64,
    pub grade_reduction_percent: f64,
    pub supply_shortage_percent: f64,
}

impl Default for RiskSpec {
    fn default() -> Self {
        Self {
            crusher_failure_percent: 5.0,
            mill_failure_percent: 3.0,
            flotation_failure_percent: 2.0,
            downtime_hours: 8.0,
            supply_disruption_percent: 10.0,
            grade_reduction_percent: 20.0,
            supply_shortage_percent: 30.0,
        }
    }
}

impl RiskSpec {
    fn validate(&self) -> Result<(), ScenarioError> {
        let percentages = [
            ("crusher_failure_percent", self.crusher_failure_percent),
            ("mill_failure_percent", self.mill_failure_percent),
            ("flotation_failure_percent", self.flotation_failure_percent),
            ("supply_disruption_percent", self.supply_disruption_percent),
            ("grade_reduction_percent", self.grade_reduction_percent),
            ("supply_shortage_percent", self.supply_shortage_percent),
        ];
        for (name, value) in percentages {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ScenarioError::InvalidRisk(format!("{} must lie in [0, 100], got {}", name, value)));
            }
        }
        if !self.downtime_hours.is_finite() || self.downtime_hours < 0.0 {
            return Err(ScenarioError::InvalidRisk(format!(
                "downtime_hours must be non-negative, got {}",
                self.downtime_hours
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskEvent {
    BaseCase,
    CrusherFailure,
    MillFailure,
    FlotationFailure,
    GradeReduction,
    SupplyShortage,
}

impl fmt::Display for RiskEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskEvent::BaseCase => "Base Case",
            RiskEvent::CrusherFailure => "Crusher Failure",
            RiskEvent::MillFailure => "Mill Failure",
            RiskEvent::FlotationFailure => "Flotation Failure",
            RiskEvent::GradeReduction => "Grade Reduction",
            RiskEvent::SupplyShortage => "Supply Shortage",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskScenario {
    pub event: RiskEvent,
    /// Event probability in percent; absent for the base case
    pub probability_percent: Option<f64>,
    /// Expected revenue lost per unit time
    pub impact: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub base_revenue: f64,
    pub scenarios: Vec<RiskScenario>,
}

impl RiskReport {
    /// Event with the largest expected loss, if any event was assessed
    pub fn worst(&self) -> Option<&RiskScenario> {
        self.scenarios
            .iter()
            .filter(|s| s.event != RiskEvent::BaseCase)
            .max_by(|a, b| a.impact.total_cmp(&b.impact))
    }
}

/// Expected revenue impact of equipment failures and supply disruptions.
///
/// Equipment failures only apply when the sulphide circuit runs.
pub fn assess_risk(base: &PlantConfig, prices: &MetalPrices, spec: &RiskSpec) -> Result<RiskReport, ScenarioError> {
    spec.validate()?;
    let base_revenue = compute_revenue(&run_simulation(base), prices);
    let downtime_share = spec.downtime_hours / HOURS_PER_DAY;

    let scenario = |event: RiskEvent, probability: f64, impact: f64| RiskScenario {
        event,
        probability_percent: Some(probability),
        impact,
        revenue: base_revenue - impact,
    };

    let mut scenarios = vec![RiskScenario {
        event: RiskEvent::BaseCase,
        probability_percent: None,
        impact: 0.0,
        revenue: base_revenue,
    }];

    if base.circuits().includes_sulphide() {
        let failures = [
            (RiskEvent::CrusherFailure, spec.crusher_failure_percent, 1.0),
            (RiskEvent::MillFailure, spec.mill_failure_percent, 1.0),
            (RiskEvent::FlotationFailure, spec.flotation_failure_percent, FLOTATION_IMPACT_FACTOR),
        ];
        for (event, probability, factor) in failures {
            let impact = base_revenue * probability / 100.0 * downtime_share * factor;
            scenarios.push(scenario(event, probability, impact));
        }
    }

    let disruption = spec.supply_disruption_percent / 100.0;
    scenarios.push(scenario(
        RiskEvent::GradeReduction,
        spec.supply_disruption_percent,
        base_revenue * disruption * spec.grade_reduction_percent / 100.0,
    ));
    scenarios.push(scenario(
        RiskEvent::SupplyShortage,
        spec.supply_disruption_percent,
        base_revenue * disruption * spec.supply_shortage_percent / 100.0,
    ));

    Ok(RiskReport { base_revenue, scenarios })
}
