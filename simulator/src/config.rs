//! Configuration loader and validator for the orebalance simulator.
//! Handles parsing, validation, and access to the plant scenario file.

use serde::Deserialize;
use std::env;
use std::fs;
use thiserror::Error;
use orebalance::config::validate_prices;
use orebalance::scenario::{Constraints, Objective, RiskSpec, SearchBounds, SensitivityFamily, VariationSpec};
use orebalance::types::{ActiveCircuits, FeedComposition, MetalAmounts, MetalPrices, PlantDesign, ProcessParameters};
use orebalance::{ConfigError, PlantConfig, ScenarioError};

/// Location of the scenario file unless `OREBALANCE_CONFIG` points elsewhere
pub const DEFAULT_CONFIG_PATH: &str = "simulator/config/plant.toml";

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Everything a simulator run needs: the plant itself plus one section per analysis.
///
/// Only `[plant]` is mandatory; each analysis section falls back to its defaults.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub plant: PlantSection,
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,
    #[serde(default)]
    pub sensitivity: SensitivityConfig,
    #[serde(default)]
    pub optimization: OptimizationConfig,
    #[serde(default)]
    pub risk: RiskSpec,
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Plant inputs: active circuits, feed grades, process parameters, prices and stage design.
///
/// A metal missing from an explicit `[plant.feed]` or `[plant.prices]` table counts as zero.
#[derive(Debug, Deserialize, Clone)]
pub struct PlantSection {
    pub circuits: ActiveCircuits,
    /// Feed grades in percent of ore mass
    #[serde(default = "default_feed_grades")]
    pub feed: MetalAmounts,
    #[serde(default)]
    pub process: ProcessParameters,
    #[serde(default)]
    pub prices: MetalPrices,
    #[serde(default)]
    pub design: PlantDesign,
}

fn default_feed_grades() -> MetalAmounts {
    FeedComposition::default().grades
}

/// Monte Carlo settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonteCarloConfig {
    pub trials: usize,
    /// Two-sided confidence level in percent
    pub confidence_level: f64,
    /// Number of blocking tasks the trials are split across
    pub workers: usize,
    pub variation: VariationSpec,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            trials: 1000,
            confidence_level: 95.0,
            workers: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(4),
            variation: VariationSpec::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SensitivityConfig {
    /// Largest relative change applied, in percent
    pub range_percent: f64,
    pub families: Vec<SensitivityFamily>,
}

impl Default for SensitivityConfig {
    fn default() -> Self {
        Self {
            range_percent: 20.0,
            families: SensitivityFamily::ALL.to_vec(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OptimizationConfig {
    pub objective: Objective,
    pub max_feed_rate: f64,
    /// Lower end of the target-recovery axis, in percent
    pub min_target_recovery: f64,
    /// Lowest acceptable value-weighted recovery, in percent
    pub min_recovery_percent: f64,
    pub max_operating_cost: f64,
    pub min_three_e_grade: Option<f64>,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            objective: Objective::Revenue,
            max_feed_rate: 180.0,
            min_target_recovery: 80.0,
            min_recovery_percent: 40.0,
            max_operating_cost: 50_000.0,
            min_three_e_grade: None,
        }
    }
}

impl OptimizationConfig {
    pub fn constraints(&self) -> Constraints {
        Constraints {
            max_operating_cost: self.max_operating_cost,
            min_recovery_percent: self.min_recovery_percent,
            min_three_e_grade: self.min_three_e_grade,
        }
    }

    pub fn bounds(&self, plant: &PlantConfig) -> SearchBounds {
        SearchBounds::around(plant, self.max_feed_rate, self.min_target_recovery)
    }
}

/// Feed rate sweep settings.
///
/// Run `i` sets every active circuit's feed rate to `start_feed_rate + i * feed_rate_step`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SweepConfig {
    pub num_simulations: usize,
    pub start_feed_rate: f64,
    pub feed_rate_step: f64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            num_simulations: 10,
            start_feed_rate: 80.0,
            feed_rate_step: 20.0,
        }
    }
}

impl SweepConfig {
    pub fn feed_rates(&self) -> Vec<f64> {
        (0..self.num_simulations)
            .map(|i| self.start_feed_rate + i as f64 * self.feed_rate_step)
            .collect()
    }
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
    #[error("Invalid plant: {0}")]
    Plant(#[from] ConfigError),
    #[error("Analysis failed: {0}")]
    Scenario(#[from] ScenarioError),
    #[error("Failed to serialize results: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error("Worker task failed: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

/// Validation pass run on a section before any simulation starts
pub trait ValidateConfig {
    fn validate(&self) -> Result<(), SimulatorError>;
}

impl ValidateConfig for PlantSection {
    fn validate(&self) -> Result<(), SimulatorError> {
        validate_prices(&self.prices)?;
        self.plant_config()?;
        Ok(())
    }
}

impl ValidateConfig for MonteCarloConfig {
    fn validate(&self) -> Result<(), SimulatorError> {
        if self.trials == 0 {
            return Err(ScenarioError::NoTrials.into());
        }
        if self.workers == 0 {
            return Err(SimulatorError::ValidationError("Monte Carlo workers must be positive".into()));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 100.0) {
            return Err(ScenarioError::InvalidConfidence(self.confidence_level).into());
        }
        self.variation.validate()?;
        Ok(())
    }
}

impl ValidateConfig for SensitivityConfig {
    fn validate(&self) -> Result<(), SimulatorError> {
        if !(self.range_percent > 0.0 && self.range_percent < 100.0) {
            return Err(ScenarioError::InvalidRange(self.range_percent).into());
        }
        if self.families.is_empty() {
            return Err(SimulatorError::ValidationError("Sensitivity needs at least one family".into()));
        }
        Ok(())
    }
}

impl ValidateConfig for OptimizationConfig {
    fn validate(&self) -> Result<(), SimulatorError> {
        if !self.max_feed_rate.is_finite() || self.max_feed_rate <= 0.0 {
            return Err(SimulatorError::ValidationError("Maximum feed rate must be positive".into()));
        }
        if !(0.0..=100.0).contains(&self.min_recovery_percent) {
            return Err(SimulatorError::ValidationError("Minimum recovery must lie in [0, 100]".into()));
        }
        if !(0.0..=95.0).contains(&self.min_target_recovery) {
            return Err(SimulatorError::ValidationError("Minimum target recovery must lie in [0, 95]".into()));
        }
        if self.max_operating_cost < 0.0 {
            return Err(SimulatorError::ValidationError("Maximum operating cost must be non-negative".into()));
        }
        Ok(())
    }
}

impl ValidateConfig for SweepConfig {
    fn validate(&self) -> Result<(), SimulatorError> {
        if self.num_simulations == 0 {
            return Err(SimulatorError::ValidationError("Number of simulations must be positive".into()));
        }
        if !self.start_feed_rate.is_finite() || self.start_feed_rate <= 0.0 {
            return Err(SimulatorError::ValidationError("Start feed rate must be positive".into()));
        }
        if !self.feed_rate_step.is_finite() || self.feed_rate_step < 0.0 {
            return Err(SimulatorError::ValidationError("Feed rate step must be non-negative".into()));
        }
        Ok(())
    }
}

impl ValidateConfig for Config {
    fn validate(&self) -> Result<(), SimulatorError> {
        self.plant.validate()?;
        self.monte_carlo.validate()?;
        self.sensitivity.validate()?;
        self.optimization.validate()?;
        self.sweep.validate()?;
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Configuration Implementation Methods
// ------------------------------------------------------------------------------------------------

impl PlantSection {
    /// Builds the validated engine configuration
    pub fn plant_config(&self) -> Result<PlantConfig, ConfigError> {
        PlantConfig::with_design(
            FeedComposition::new(self.feed),
            self.process.clone(),
            self.circuits,
            self.design.clone(),
        )
    }
}

impl Config {
    /// Loads from `OREBALANCE_CONFIG` if set, otherwise from the default path
    pub fn load() -> Result<Self, SimulatorError> {
        let path = env::var("OREBALANCE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, SimulatorError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self, SimulatorError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn plant_config(&self) -> Result<PlantConfig, SimulatorError> {
        Ok(self.plant.plant_config()?)
    }

    pub fn prices(&self) -> &MetalPrices {
        &self.plant.prices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orebalance::scenario::run_optimization;
    use orebalance::types::Metal;

    const MINIMAL: &str = r#"
[plant]
circuits = "both"
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.plant.circuits, ActiveCircuits::Both);
        assert_eq!(config.plant.feed, FeedComposition::default().grades);
        assert_eq!(config.plant.process, ProcessParameters::default());
        assert_eq!(config.monte_carlo.trials, 1000);
        assert_eq!(config.sensitivity.families.len(), 5);
        assert_eq!(config.sweep.feed_rates().len(), 10);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::from_toml(
            r#"
[plant]
circuits = "oxide"

[plant.feed]
cu = 2.0
pd = 1.0

[plant.process]
oxide_feed_rate = 120.0

[plant.prices]
pd = 30000.0

[monte_carlo]
trials = 50
workers = 2

[monte_carlo.variation]
grade = 0.0

[optimization]
objective = "profit_margin"

[sweep]
num_simulations = 3
start_feed_rate = 100.0
feed_rate_step = 50.0
"#,
        )
        .unwrap();

        assert_eq!(config.plant.feed.get(Metal::Cu), 2.0);
        // Unlisted metals in an explicit table are zero
        assert_eq!(config.plant.feed.get(Metal::Ni), 0.0);
        assert_eq!(config.plant.process.oxide_feed_rate, 120.0);
        assert_eq!(config.plant.process.sulphide_feed_rate, 150.0);
        assert_eq!(config.prices().price(Metal::Pd), 30000.0);
        assert_eq!(config.monte_carlo.trials, 50);
        assert_eq!(config.monte_carlo.variation.grade, 0.0);
        assert_eq!(config.monte_carlo.variation.feed_rate, 10.0);
        assert_eq!(config.optimization.objective, Objective::ProfitMargin);
        assert_eq!(config.sweep.feed_rates(), vec![100.0, 150.0, 200.0]);
    }

    #[test]
    fn test_invalid_plant_is_rejected() {
        let err = Config::from_toml(
            r#"
[plant]
circuits = "sulphide"

[plant.process]
final_cu_recovery = 120.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, SimulatorError::Plant(ConfigError::InvalidPercentage { .. })));
    }

    #[test]
    fn test_invalid_analysis_sections_are_rejected() {
        let zero_trials = format!("{}\n[monte_carlo]\ntrials = 0\n", MINIMAL);
        assert!(matches!(
            Config::from_toml(&zero_trials),
            Err(SimulatorError::Scenario(ScenarioError::NoTrials))
        ));

        let bad_range = format!("{}\n[sensitivity]\nrange_percent = 100.0\n", MINIMAL);
        assert!(matches!(
            Config::from_toml(&bad_range),
            Err(SimulatorError::Scenario(ScenarioError::InvalidRange(_)))
        ));

        let empty_sweep = format!("{}\n[sweep]\nnum_simulations = 0\n", MINIMAL);
        assert!(matches!(Config::from_toml(&empty_sweep), Err(SimulatorError::ValidationError(_))));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = Config::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config/plant.toml")).unwrap();
        assert_eq!(config.plant.circuits, ActiveCircuits::Both);
        assert_eq!(config.plant.process, ProcessParameters::default());
        assert_eq!(config.plant.prices, MetalPrices::default());
        assert_eq!(config.monte_carlo.workers, 4);
        assert_eq!(config.optimization.min_three_e_grade, Some(0.5));
        assert_eq!(config.optimization.min_target_recovery, 80.0);
        assert_eq!(config.optimization.min_recovery_percent, 40.0);
        assert_eq!(config.risk, RiskSpec::default());
    }

    #[test]
    fn test_shipped_optimization_finds_a_feasible_point() {
        let config = Config::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config/plant.toml")).unwrap();
        let plant = config.plant_config().unwrap();
        let settings = &config.optimization;
        let bounds = settings.bounds(&plant);
        assert_eq!(bounds.target_recovery, (80.0, 95.0));

        let report = run_optimization(&plant, config.prices(), settings.objective, &settings.constraints(), &bounds)
            .unwrap();
        assert!(report.outcome.is_feasible(), "shipped constraints admit no grid point");
        assert!(report.grid.iter().any(|p| p.feasible));
    }

    #[test]
    fn test_recovery_axis_is_independent_of_constraint() {
        let config = Config::from_toml(&format!(
            "{}\n[optimization]\nmin_target_recovery = 60.0\nmin_recovery_percent = 30.0\n",
            MINIMAL
        ))
        .unwrap();
        let plant = config.plant_config().unwrap();
        assert_eq!(config.optimization.bounds(&plant).target_recovery, (60.0, 95.0));
        assert_eq!(config.optimization.constraints().min_recovery_percent, 30.0);

        let above_axis = format!("{}\n[optimization]\nmin_target_recovery = 99.0\n", MINIMAL);
        assert!(matches!(Config::from_toml(&above_axis), Err(SimulatorError::ValidationError(_))));
    }

    #[test]
    fn test_unknown_circuit_fails_to_parse() {
        let err = Config::from_toml("[plant]\ncircuits = \"heap_leach\"\n").unwrap_err();
        assert!(matches!(err, SimulatorError::ParseError(_)));
    }
}
