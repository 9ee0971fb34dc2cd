use serde::{Deserialize, Serialize};
use std::fmt;
use super::MetalAmounts;

/// The two processing circuits
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessType {
    Oxide,
    Sulphide,
}

impl fmt::Display for ProcessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessType::Oxide => write!(f, "Oxide"),
            ProcessType::Sulphide => write!(f, "Sulphide"),
        }
    }
}

/// A processing stage of either circuit
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageName {
    Feed,
    Sizing,
    Grinding,
    Leaching,
    Crushing,
    CuFlotation,
    NiFlotation,
    PressureOxidation,
    FinalRecovery,
    Tailings,
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageName::Feed => "Feed",
            StageName::Sizing => "Sizing",
            StageName::Grinding => "Grinding",
            StageName::Leaching => "Leaching",
            StageName::Crushing => "Crushing",
            StageName::CuFlotation => "Cu Flotation",
            StageName::NiFlotation => "Ni Flotation",
            StageName::PressureOxidation => "Pressure Oxidation",
            StageName::FinalRecovery => "Final Recovery",
            StageName::Tailings => "Tailings",
        };
        write!(f, "{}", name)
    }
}

/// Outcome of one stage in one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageResult {
    pub stage: StageName,
    /// Mass offered to the stage by the previous one (mass/time)
    pub input_mass: f64,
    /// Mass actually accepted after capacity clamping (mass/time)
    pub effective_input_mass: f64,
    /// Primary product mass flow (mass/time)
    pub mass: f64,
    /// Metal carried in the primary product (mass/time)
    pub metals: MetalAmounts,
    /// Nominal input not accounted for by any product of the stage (mass/time)
    pub losses: f64,
    /// Design capacity, for capacity-bounded stages (mass/time)
    pub capacity: Option<f64>,
    /// Whether the nominal input exceeded capacity
    pub overloaded: bool,
}

impl StageResult {
    /// A stage with no capacity bound that passes its input through unchanged
    pub fn pass_through(stage: StageName, mass: f64, metals: MetalAmounts) -> Self {
        Self {
            stage,
            input_mass: mass,
            effective_input_mass: mass,
            mass,
            metals,
            losses: 0.0,
            capacity: None,
            overloaded: false,
        }
    }

    /// Output over nominal input, in percent; 0 when nothing entered
    pub fn stage_recovery_percent(&self) -> f64 {
        if self.input_mass > 0.0 {
            self.mass / self.input_mass * 100.0
        } else {
            0.0
        }
    }
}
