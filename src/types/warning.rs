use serde::{Deserialize, Serialize};
use std::fmt;
use super::{ProcessType, StageName};

/// How far a stage falls short of the material it is asked to take
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Moderate,
    High,
    Critical,
}

impl Severity {
    /// Classifies a shortage percentage: > 50 Critical, > 25 High, otherwise Moderate
    pub fn from_shortage_percent(shortage_percent: f64) -> Self {
        if shortage_percent > 50.0 {
            Severity::Critical
        } else if shortage_percent > 25.0 {
            Severity::High
        } else {
            Severity::Moderate
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Moderate => write!(f, "Moderate"),
            Severity::High => write!(f, "High"),
            Severity::Critical => write!(f, "Critical"),
        }
    }
}

/// A stage that was offered more material than its capacity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowWarning {
    pub process_type: ProcessType,
    pub stage: StageName,
    pub required_mass: f64,
    pub available_mass: f64,
    pub shortage: f64,
    pub shortage_percent: f64,
    pub severity: Severity,
}

impl FlowWarning {
    pub fn new(process_type: ProcessType, stage: StageName, required_mass: f64, available_mass: f64) -> Self {
        let shortage = required_mass - available_mass;
        let shortage_percent = if required_mass > 0.0 {
            shortage / required_mass * 100.0
        } else {
            0.0
        };
        Self {
            process_type,
            stage,
            required_mass,
            available_mass,
            shortage,
            shortage_percent,
            severity: Severity::from_shortage_percent(shortage_percent),
        }
    }
}

impl fmt::Display for FlowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} {} capacity: required {:.1}, available {:.1}, short {:.1} ({:.1}%)",
            self.severity, self.process_type, self.stage,
            self.required_mass, self.available_mass, self.shortage, self.shortage_percent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_boundaries() {
        assert_eq!(Severity::from_shortage_percent(0.0), Severity::Moderate);
        assert_eq!(Severity::from_shortage_percent(25.0), Severity::Moderate);
        assert_eq!(Severity::from_shortage_percent(25.0001), Severity::High);
        assert_eq!(Severity::from_shortage_percent(50.0), Severity::High);
        assert_eq!(Severity::from_shortage_percent(50.0001), Severity::Critical);
        assert_eq!(Severity::from_shortage_percent(100.0), Severity::Critical);
    }

    #[test]
    fn test_warning_shortage_fields() {
        let warning = FlowWarning::new(ProcessType::Sulphide, StageName::Grinding, 200.0, 190.0);
        assert_eq!(warning.shortage, 10.0);
        assert!((warning.shortage_percent - 5.0).abs() < 1e-12);
        assert_eq!(warning.severity, Severity::Moderate);
    }
}
