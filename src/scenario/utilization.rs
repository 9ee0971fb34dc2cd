use serde::{Deserialize, Serialize};
use std::fmt;
use crate::types::{ProcessType, SimulationResult, StageName};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationStatus {
    Normal,
    /// Above 90%
    Critical,
    /// Above 100%
    Overloaded,
}

impl UtilizationStatus {
    pub fn from_percent(utilization_percent: f64) -> Self {
        if utilization_percent > 100.0 {
            UtilizationStatus::Overloaded
        } else if utilization_percent > 90.0 {
            UtilizationStatus::Critical
        } else {
            UtilizationStatus::Normal
        }
    }
}

impl fmt::Display for UtilizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UtilizationStatus::Normal => write!(f, "Normal"),
            UtilizationStatus::Critical => write!(f, "Critical"),
            UtilizationStatus::Overloaded => write!(f, "Overloaded"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageUtilization {
    pub process: ProcessType,
    pub stage: StageName,
    /// Nominal input offered to the stage
    pub required: f64,
    pub capacity: f64,
    pub utilization_percent: f64,
    pub status: UtilizationStatus,
}

impl StageUtilization {
    /// Unused capacity; 0 for an overloaded stage
    pub fn spare_capacity(&self) -> f64 {
        (self.capacity - self.required).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationReport {
    pub stages: Vec<StageUtilization>,
    pub average_utilization_percent: f64,
    pub overloaded_count: usize,
    pub critical_count: usize,
    pub total_spare_capacity: f64,
}

/// Required input over design capacity for every capacity-bounded stage of a run
pub fn capacity_utilization(result: &SimulationResult) -> UtilizationReport {
    let stages: Vec<StageUtilization> = result
        .stage_results()
        .into_iter()
        .filter_map(|(process, stage)| {
            let capacity = stage.capacity.filter(|c| *c > 0.0)?;
            let utilization_percent = stage.input_mass / capacity * 100.0;
            Some(StageUtilization {
                process,
                stage: stage.stage,
                required: stage.input_mass,
                capacity,
                utilization_percent,
                status: UtilizationStatus::from_percent(utilization_percent),
            })
        })
        .collect();

    let average_utilization_percent = if stages.is_empty() {
        0.0
    } else {
        stages.iter().map(|s| s.utilization_percent).sum::<f64>() / stages.len() as f64
    };
    let count = |status: UtilizationStatus| stages.iter().filter(|s| s.status == status).count();

    UtilizationReport {
        average_utilization_percent,
        overloaded_count: count(UtilizationStatus::Overloaded),
        critical_count: count(UtilizationStatus::Critical),
        total_spare_capacity: stages.iter().map(StageUtilization::spare_capacity).sum(),
        stages,
    }
}
