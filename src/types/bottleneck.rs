use serde::{Deserialize, Serialize};
use std::fmt;
use super::ProcessType;

/// Stage (or stage group) that limits circuit throughput
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitingStage {
    Sizing,
    Grinding,
    Leaching,
    /// Copper and nickel flotation taken together
    Flotation,
}

impl fmt::Display for LimitingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitingStage::Sizing => write!(f, "sizing"),
            LimitingStage::Grinding => write!(f, "grinding"),
            LimitingStage::Leaching => write!(f, "leaching"),
            LimitingStage::Flotation => write!(f, "flotation"),
        }
    }
}

/// Throughput the limiting stage is measured against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceThroughput {
    UpstreamCapacity(f64),
    FeedRate(f64),
}

impl ReferenceThroughput {
    pub fn value(&self) -> f64 {
        match self {
            ReferenceThroughput::UpstreamCapacity(v) | ReferenceThroughput::FeedRate(v) => *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bottleneck {
    pub process: ProcessType,
    pub stage: LimitingStage,
    pub limiting_throughput: f64,
    pub reference: ReferenceThroughput,
    pub efficiency_loss_percent: f64,
}

impl Bottleneck {
    pub fn new(process: ProcessType, stage: LimitingStage, limiting_throughput: f64, reference: ReferenceThroughput) -> Self {
        let reference_value = reference.value();
        let efficiency_loss_percent = if reference_value > 0.0 {
            (1.0 - limiting_throughput / reference_value) * 100.0
        } else {
            0.0
        };
        Self {
            process,
            stage,
            limiting_throughput,
            reference,
            efficiency_loss_percent,
        }
    }

    /// Throughput recoverable if the limiting stage matched its reference
    pub fn potential_gain(&self) -> f64 {
        self.reference.value() - self.limiting_throughput
    }
}
