use serde::{Deserialize, Serialize};

/// Capacity and overload behaviour of one stage.
///
/// Capacity is `capacity_multiplier` times the stage's own nominal input.
/// When the nominal input exceeds it, the stage efficiency is multiplied by
/// `degradation_factor` (1.0 means no degradation).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StagePolicy {
    pub capacity_multiplier: f64,
    pub degradation_factor: f64,
    /// Whether an overloaded stage only accepts up to its capacity
    pub clamp_on_overload: bool,
}

impl StagePolicy {
    pub const fn new(capacity_multiplier: f64, degradation_factor: f64, clamp_on_overload: bool) -> Self {
        Self { capacity_multiplier, degradation_factor, clamp_on_overload }
    }

    pub fn capacity_for(&self, nominal_input: f64) -> f64 {
        nominal_input * self.capacity_multiplier
    }

    /// Efficiency after applying the overload penalty, if any
    pub fn efficiency(&self, base: f64, overloaded: bool) -> f64 {
        if overloaded {
            base * self.degradation_factor
        } else {
            base
        }
    }
}

/// Declarative stage policy table for the whole plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantDesign {
    pub sizing: StagePolicy,
    pub oxide_grinding: StagePolicy,
    pub leaching: StagePolicy,
    pub crushing: StagePolicy,
    pub sulphide_grinding: StagePolicy,
    pub cu_flotation: StagePolicy,
    pub ni_flotation: StagePolicy,
    pub pressure_oxidation: StagePolicy,

    /// Fraction of effective copper-flotation feed reporting to the Cu concentrate
    pub cu_concentrate_yield: f64,
    /// Fraction of effective nickel-flotation feed reporting to the Ni concentrate
    pub ni_concentrate_yield: f64,

    /// Oxide: lowest stage output below `feed × this` is a bottleneck
    pub oxide_bottleneck_ratio: f64,
    /// Sulphide: grinding output below `crushing output × this` is a bottleneck
    pub grinding_bottleneck_ratio: f64,
    /// Sulphide: combined concentrate below `grinding output × this` is a bottleneck
    pub expected_concentrate_yield: f64,
}

impl Default for PlantDesign {
    fn default() -> Self {
        Self {
            sizing: StagePolicy::new(1.20, 1.0, true),
            oxide_grinding: StagePolicy::new(1.10, 0.95, true),
            leaching: StagePolicy::new(1.05, 1.0, true),
            crushing: StagePolicy::new(1.30, 1.0, true),
            sulphide_grinding: StagePolicy::new(0.95, 0.92, true),
            cu_flotation: StagePolicy::new(1.10, 1.0, true),
            ni_flotation: StagePolicy::new(1.05, 1.0, true),
            pressure_oxidation: StagePolicy::new(1.02, 0.95, false),
            cu_concentrate_yield: 0.15,
            ni_concentrate_yield: 0.20,
            oxide_bottleneck_ratio: 0.8,
            grinding_bottleneck_ratio: 0.9,
            expected_concentrate_yield: 0.3,
        }
    }
}

impl PlantDesign {
    /// Every stage policy with a label, for validation and reporting
    pub fn policies(&self) -> [(&'static str, &StagePolicy); 8] {
        [
            ("sizing", &self.sizing),
            ("oxide_grinding", &self.oxide_grinding),
            ("leaching", &self.leaching),
            ("crushing", &self.crushing),
            ("sulphide_grinding", &self.sulphide_grinding),
            ("cu_flotation", &self.cu_flotation),
            ("ni_flotation", &self.ni_flotation),
            ("pressure_oxidation", &self.pressure_oxidation),
        ]
    }
}
