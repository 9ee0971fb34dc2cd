use serde::Serialize;
use thiserror::Error;
use crate::types::{ActiveCircuits, FeedComposition, Metal, MetalPrices, Parameter, PlantDesign, ProcessParameters};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Feed rate {parameter} must be positive and finite, got {value}")]
    InvalidFeedRate { parameter: Parameter, value: f64 },
    #[error("Percentage {parameter} must lie in [0, 100], got {value}")]
    InvalidPercentage { parameter: Parameter, value: f64 },
    #[error("Grade of {metal} must lie in [0, 100], got {value}")]
    InvalidGrade { metal: Metal, value: f64 },
    #[error("Capacity multiplier of {stage} must be positive and finite, got {value}")]
    InvalidCapacityMultiplier { stage: String, value: f64 },
    #[error("Degradation factor of {stage} must lie in (0, 1], got {value}")]
    InvalidDegradationFactor { stage: String, value: f64 },
    #[error("Design ratio {name} must lie in [0, 1], got {value}")]
    InvalidDesignRatio { name: String, value: f64 },
    #[error("Price of {metal} must be non-negative and finite, got {value}")]
    InvalidPrice { metal: Metal, value: f64 },
}

/// A feed, parameter set and stage design that passed validation.
///
/// The fields are private so every `PlantConfig` in existence is known to be
/// valid; build variants with [`PlantConfig::with_inputs`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantConfig {
    feed: FeedComposition,
    parameters: ProcessParameters,
    circuits: ActiveCircuits,
    design: PlantDesign,
}

impl PlantConfig {
    /// Validates the inputs against the default stage design
    pub fn new(feed: FeedComposition, parameters: ProcessParameters, circuits: ActiveCircuits) -> Result<Self, ConfigError> {
        Self::with_design(feed, parameters, circuits, PlantDesign::default())
    }

    pub fn with_design(
        feed: FeedComposition,
        parameters: ProcessParameters,
        circuits: ActiveCircuits,
        design: PlantDesign,
    ) -> Result<Self, ConfigError> {
        validate_feed(&feed)?;
        validate_parameters(&parameters)?;
        validate_design(&design)?;
        Ok(Self { feed, parameters, circuits, design })
    }

    /// Same circuits and design with a different feed and parameter set
    pub fn with_inputs(&self, feed: FeedComposition, parameters: ProcessParameters) -> Result<Self, ConfigError> {
        validate_feed(&feed)?;
        validate_parameters(&parameters)?;
        Ok(Self { feed, parameters, circuits: self.circuits, design: self.design.clone() })
    }

    pub fn feed(&self) -> &FeedComposition {
        &self.feed
    }

    pub fn parameters(&self) -> &ProcessParameters {
        &self.parameters
    }

    pub fn circuits(&self) -> ActiveCircuits {
        self.circuits
    }

    pub fn design(&self) -> &PlantDesign {
        &self.design
    }

    /// Feed mass entering the active circuits (mass/time)
    pub fn processed_feed_rate(&self) -> f64 {
        let mut total = 0.0;
        if self.circuits.includes_oxide() {
            total += self.parameters.oxide_feed_rate;
        }
        if self.circuits.includes_sulphide() {
            total += self.parameters.sulphide_feed_rate;
        }
        total
    }
}

impl Default for PlantConfig {
    fn default() -> Self {
        Self {
            feed: FeedComposition::default(),
            parameters: ProcessParameters::default(),
            circuits: ActiveCircuits::Both,
            design: PlantDesign::default(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Validation
// ------------------------------------------------------------------------------------------------

fn validate_feed(feed: &FeedComposition) -> Result<(), ConfigError> {
    for (metal, value) in feed.grades.iter() {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ConfigError::InvalidGrade { metal, value });
        }
    }
    Ok(())
}

fn validate_parameters(parameters: &ProcessParameters) -> Result<(), ConfigError> {
    for parameter in Parameter::ALL {
        let value = parameters.get(parameter);
        if parameter.is_percentage() {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::InvalidPercentage { parameter, value });
            }
        } else if !value.is_finite() || value <= 0.0 {
            return Err(ConfigError::InvalidFeedRate { parameter, value });
        }
    }
    Ok(())
}

fn validate_design(design: &PlantDesign) -> Result<(), ConfigError> {
    for (stage, policy) in design.policies() {
        if !policy.capacity_multiplier.is_finite() || policy.capacity_multiplier <= 0.0 {
            return Err(ConfigError::InvalidCapacityMultiplier {
                stage: stage.to_string(),
                value: policy.capacity_multiplier,
            });
        }
        if !policy.degradation_factor.is_finite() || policy.degradation_factor <= 0.0 || policy.degradation_factor > 1.0 {
            return Err(ConfigError::InvalidDegradationFactor {
                stage: stage.to_string(),
                value: policy.degradation_factor,
            });
        }
    }
    let ratios = [
        ("cu_concentrate_yield", design.cu_concentrate_yield),
        ("ni_concentrate_yield", design.ni_concentrate_yield),
        ("oxide_bottleneck_ratio", design.oxide_bottleneck_ratio),
        ("grinding_bottleneck_ratio", design.grinding_bottleneck_ratio),
        ("expected_concentrate_yield", design.expected_concentrate_yield),
    ];
    for (name, value) in ratios {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidDesignRatio { name: name.to_string(), value });
        }
    }
    Ok(())
}

/// Rejects negative or non-finite prices
pub fn validate_prices(prices: &MetalPrices) -> Result<(), ConfigError> {
    for (metal, value) in prices.0.iter() {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::InvalidPrice { metal, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetalAmounts;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlantConfig::new(FeedComposition::default(), ProcessParameters::default(), ActiveCircuits::Both);
        assert!(config.is_ok(), "default inputs should validate: {:?}", config.err());
        assert!(validate_prices(&MetalPrices::default()).is_ok());
    }

    #[test]
    fn test_rejects_efficiency_above_hundred() {
        let mut params = ProcessParameters::default();
        params.leaching_efficiency = 101.0;
        let err = PlantConfig::new(FeedComposition::default(), params, ActiveCircuits::Both).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPercentage { parameter: Parameter::LeachingEfficiency, value: 101.0 });
    }

    #[test]
    fn test_rejects_non_positive_feed_rate() {
        let mut params = ProcessParameters::default();
        params.sulphide_feed_rate = 0.0;
        assert!(matches!(
            PlantConfig::new(FeedComposition::default(), params, ActiveCircuits::Both),
            Err(ConfigError::InvalidFeedRate { parameter: Parameter::SulphideFeedRate, .. })
        ));

        let mut params = ProcessParameters::default();
        params.oxide_feed_rate = f64::NAN;
        assert!(matches!(
            PlantConfig::new(FeedComposition::default(), params, ActiveCircuits::Oxide),
            Err(ConfigError::InvalidFeedRate { parameter: Parameter::OxideFeedRate, .. })
        ));
    }

    #[test]
    fn test_rejects_negative_grade() {
        let feed = FeedComposition::new(MetalAmounts::new(1.5, -0.1, 0.6, 0.3, 1.2, 0.4));
        assert!(matches!(
            PlantConfig::new(feed, ProcessParameters::default(), ActiveCircuits::Both),
            Err(ConfigError::InvalidGrade { metal: Metal::Pd, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_stage_policy() {
        let mut design = PlantDesign::default();
        design.crushing.capacity_multiplier = 0.0;
        assert!(matches!(
            PlantConfig::with_design(FeedComposition::default(), ProcessParameters::default(), ActiveCircuits::Both, design),
            Err(ConfigError::InvalidCapacityMultiplier { .. })
        ));

        let mut design = PlantDesign::default();
        design.sulphide_grinding.degradation_factor = 1.5;
        assert!(matches!(
            PlantConfig::with_design(FeedComposition::default(), ProcessParameters::default(), ActiveCircuits::Both, design),
            Err(ConfigError::InvalidDegradationFactor { .. })
        ));
    }

    #[test]
    fn test_processed_feed_rate_follows_circuits() {
        let params = ProcessParameters::default();
        let oxide = PlantConfig::new(FeedComposition::default(), params.clone(), ActiveCircuits::Oxide).unwrap();
        let both = PlantConfig::new(FeedComposition::default(), params, ActiveCircuits::Both).unwrap();
        assert_eq!(oxide.processed_feed_rate(), 100.0);
        assert_eq!(both.processed_feed_rate(), 250.0);
    }
}
