use crate::types::{FlowWarning, ProcessType, StageName};

/// Capacity check shared by every capacity-bounded stage of a run.
///
/// Each run owns one validator; the warnings it collects become the run's
/// warning sequence.
#[derive(Debug, Default)]
pub struct FlowValidator {
    warnings: Vec<FlowWarning>,
}

impl FlowValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true iff `required` fits in `available`. Otherwise records a
    /// warning and returns false; the calling stage decides how to respond.
    pub fn validate(&mut self, stage: StageName, required: f64, available: f64, process: ProcessType) -> bool {
        if required <= available {
            return true;
        }
        let warning = FlowWarning::new(process, stage, required, available);
        tracing::warn!(
            process = %process,
            stage = %stage,
            required,
            available,
            shortage_percent = warning.shortage_percent,
            severity = %warning.severity,
            "stage capacity exceeded"
        );
        self.warnings.push(warning);
        false
    }

    pub fn warnings(&self) -> &[FlowWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<FlowWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    #[test]
    fn test_within_capacity_records_nothing() {
        let mut validator = FlowValidator::new();
        assert!(validator.validate(StageName::Sizing, 100.0, 120.0, ProcessType::Oxide));
        assert!(validator.validate(StageName::Sizing, 120.0, 120.0, ProcessType::Oxide), "equal to capacity is not a shortfall");
        assert!(validator.warnings().is_empty());
    }

    #[test]
    fn test_shortfall_records_warning_in_order() {
        let mut validator = FlowValidator::new();
        assert!(!validator.validate(StageName::Grinding, 200.0, 190.0, ProcessType::Sulphide));
        assert!(!validator.validate(StageName::Crushing, 100.0, 40.0, ProcessType::Sulphide));

        let warnings = validator.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].stage, StageName::Grinding);
        assert_eq!(warnings[0].severity, Severity::Moderate);
        assert_eq!(warnings[1].stage, StageName::Crushing);
        assert_eq!(warnings[1].severity, Severity::Critical);
    }
}
