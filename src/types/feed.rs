use serde::{Deserialize, Serialize};
use super::{Metal, MetalAmounts};

/// Circuits that receive feed in a run
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveCircuits {
    Oxide,
    Sulphide,
    Both,
}

impl ActiveCircuits {
    pub fn includes_oxide(&self) -> bool {
        matches!(self, ActiveCircuits::Oxide | ActiveCircuits::Both)
    }

    pub fn includes_sulphide(&self) -> bool {
        matches!(self, ActiveCircuits::Sulphide | ActiveCircuits::Both)
    }
}

/// Feed grades, each a percentage of ore mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedComposition {
    pub grades: MetalAmounts,
}

impl FeedComposition {
    pub fn new(grades: MetalAmounts) -> Self {
        Self { grades }
    }

    pub fn grade(&self, metal: Metal) -> f64 {
        self.grades.get(metal)
    }

    /// Contained metal flow of a stream of `mass` (same unit as `mass`)
    pub fn contained_metal(&self, mass: f64) -> MetalAmounts {
        self.grades.scale(mass / 100.0)
    }

    /// Combined Pd + Pt + Au grade
    pub fn three_e_grade(&self) -> f64 {
        Metal::PGM.iter().map(|m| self.grade(*m)).sum()
    }
}

impl Default for FeedComposition {
    fn default() -> Self {
        Self {
            grades: MetalAmounts::new(1.5, 0.8, 0.6, 0.3, 1.2, 0.4),
        }
    }
}
