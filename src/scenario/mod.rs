use thiserror::Error;
use crate::config::ConfigError;

pub mod stats;
pub mod monte_carlo;
pub mod sensitivity;
pub mod optimization;
pub mod risk;
pub mod utilization;

pub use stats::{DistributionStats, Welford};
pub use monte_carlo::{run_monte_carlo, run_trial, summarize, MonteCarloReport, TrialOutcome, VariationSpec};
pub use sensitivity::{run_sensitivity, SensitivityFamily, SensitivityPoint, SensitivityReport};
pub use optimization::{
    run_optimization, Constraints, GridPoint, Objective, OptimizationOutcome, OptimizationReport, SearchBounds,
};
pub use risk::{assess_risk, RiskEvent, RiskReport, RiskScenario, RiskSpec};
pub use utilization::{capacity_utilization, StageUtilization, UtilizationReport, UtilizationStatus};

#[cfg(test)]
mod tests;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("Trial count must be at least 1")]
    NoTrials,
    #[error("Confidence level must lie strictly between 0 and 100, got {0}")]
    InvalidConfidence(f64),
    #[error("Standard deviation for {family} must be non-negative and finite, got {value}")]
    InvalidVariation { family: &'static str, value: f64 },
    #[error("Variation range must lie strictly between 0 and 100 percent, got {0}")]
    InvalidRange(f64),
    #[error("Invalid search bounds: {0}")]
    InvalidBounds(String),
    #[error("Invalid risk input: {0}")]
    InvalidRisk(String),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
