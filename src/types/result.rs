use serde::{Deserialize, Serialize};
use super::{Bottleneck, FlowWarning, Metal, MetalAmounts, ProcessType, StageResult};

// ------------------------------------------------------------------------------------------------
// Per-circuit records
// ------------------------------------------------------------------------------------------------

/// Stage-by-stage record of the oxide circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OxideStages {
    pub feed: StageResult,
    pub sizing: StageResult,
    pub grinding: StageResult,
    /// Leach solution mass with the recovered metal
    pub leaching: StageResult,
    pub tailings: StageResult,
}

impl OxideStages {
    pub fn stages(&self) -> [&StageResult; 5] {
        [&self.feed, &self.sizing, &self.grinding, &self.leaching, &self.tailings]
    }

    pub fn recovered(&self) -> MetalAmounts {
        self.leaching.metals
    }
}

/// Metal carried by each concentrate stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcentrateStreams {
    pub cu_concentrate: MetalAmounts,
    pub ni_concentrate: MetalAmounts,
}

impl ConcentrateStreams {
    pub fn combined(&self) -> MetalAmounts {
        self.cu_concentrate + self.ni_concentrate
    }
}

/// Stage-by-stage record of the sulphide circuit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SulphideStages {
    pub feed: StageResult,
    pub crushing: StageResult,
    pub grinding: StageResult,
    /// Cu concentrate mass and metal
    pub cu_flotation: StageResult,
    /// Ni concentrate mass and metal
    pub ni_flotation: StageResult,
    /// Combined concentrate after pressure oxidation
    pub pressure_oxidation: StageResult,
    /// Concentrate streams leaving pressure oxidation, kept apart for final recovery
    pub oxidized_streams: ConcentrateStreams,
    /// Recovered metal; mass is the sum of recovered metal flows
    pub final_recovery: StageResult,
    /// Flotation tailings
    pub tailings: StageResult,
}

impl SulphideStages {
    pub fn stages(&self) -> [&StageResult; 8] {
        [
            &self.feed,
            &self.crushing,
            &self.grinding,
            &self.cu_flotation,
            &self.ni_flotation,
            &self.pressure_oxidation,
            &self.final_recovery,
            &self.tailings,
        ]
    }

    pub fn recovered(&self) -> MetalAmounts {
        self.final_recovery.metals
    }

    pub fn concentrate_mass(&self) -> f64 {
        self.cu_flotation.mass + self.ni_flotation.mass
    }
}

// ------------------------------------------------------------------------------------------------
// Run result
// ------------------------------------------------------------------------------------------------

/// Everything one simulation run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub oxide: Option<OxideStages>,
    pub sulphide: Option<SulphideStages>,
    /// Capacity shortfalls in the order stages were evaluated
    pub warnings: Vec<FlowWarning>,
    pub bottlenecks: Vec<Bottleneck>,
    /// Recovered metal summed over both circuits (mass/time)
    pub final_recovered: MetalAmounts,
    /// Tailings mass summed over both circuits (mass/time)
    pub tailings_mass: f64,
}

impl SimulationResult {
    pub fn oxide_recovered(&self) -> MetalAmounts {
        self.oxide.as_ref().map(|o| o.recovered()).unwrap_or_default()
    }

    pub fn sulphide_recovered(&self) -> MetalAmounts {
        self.sulphide.as_ref().map(|s| s.recovered()).unwrap_or_default()
    }

    /// Metal contained in the feed of the circuits that ran
    pub fn feed_metal(&self) -> MetalAmounts {
        let oxide = self.oxide.as_ref().map(|o| o.feed.metals).unwrap_or_default();
        let sulphide = self.sulphide.as_ref().map(|s| s.feed.metals).unwrap_or_default();
        oxide + sulphide
    }

    /// Mass fed to the circuits that ran
    pub fn feed_mass(&self) -> f64 {
        self.oxide.as_ref().map(|o| o.feed.mass).unwrap_or(0.0)
            + self.sulphide.as_ref().map(|s| s.feed.mass).unwrap_or(0.0)
    }

    /// Recovered over fed metal, in percent; 0 when the feed carries none of it
    pub fn metal_recovery_percent(&self, metal: Metal) -> f64 {
        let fed = self.feed_metal().get(metal);
        if fed > 0.0 {
            self.final_recovered.get(metal) / fed * 100.0
        } else {
            0.0
        }
    }

    /// All stage records in circuit order, oxide first
    pub fn stage_results(&self) -> Vec<(ProcessType, &StageResult)> {
        let mut stages = Vec::new();
        if let Some(oxide) = &self.oxide {
            stages.extend(oxide.stages().into_iter().map(|s| (ProcessType::Oxide, s)));
        }
        if let Some(sulphide) = &self.sulphide {
            stages.extend(sulphide.stages().into_iter().map(|s| (ProcessType::Sulphide, s)));
        }
        stages
    }

    pub fn has_flow_issues(&self) -> bool {
        !self.warnings.is_empty() || !self.bottlenecks.is_empty()
    }
}
