use serde::{Deserialize, Serialize};
use std::fmt;

/// Process parameters for both circuits.
///
/// Feed rates are mass/time; every other field is a percentage. The struct is
/// plain data: range checks happen when a [`crate::config::PlantConfig`] is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessParameters {
    /// Oxide circuit feed rate (mass/time)
    pub oxide_feed_rate: f64,
    /// Sulphide circuit feed rate (mass/time)
    pub sulphide_feed_rate: f64,

    pub sizing_efficiency: f64,
    pub oxide_grinding_efficiency: f64,
    pub leaching_efficiency: f64,
    pub crushing_efficiency: f64,
    pub sulphide_grinding_efficiency: f64,
    pub pressure_ox_efficiency: f64,

    /// Leach recovery of palladium entering the leach
    pub oxide_pd_recovery: f64,
    /// Leach recovery of gold entering the leach
    pub oxide_au_recovery: f64,
    pub cu_flotation_recovery: f64,
    pub ni_flotation_recovery: f64,
    pub co_flotation_recovery: f64,
    pub final_cu_recovery: f64,
    pub final_pd_recovery: f64,
    pub final_pt_recovery: f64,
    pub final_au_recovery: f64,
    pub final_ni_recovery: f64,
    pub final_co_recovery: f64,

    /// Share of Pd/Pt/Au entering copper flotation that reports to the Cu concentrate
    pub pgm_to_cu_concentrate: f64,
    /// Share of Pd/Pt/Au entering nickel flotation that reports to the Ni concentrate
    pub pgm_to_ni_concentrate: f64,
}

impl Default for ProcessParameters {
    fn default() -> Self {
        Self {
            oxide_feed_rate: 100.0,
            sulphide_feed_rate: 150.0,
            sizing_efficiency: 98.0,
            oxide_grinding_efficiency: 95.0,
            leaching_efficiency: 92.0,
            crushing_efficiency: 98.0,
            sulphide_grinding_efficiency: 95.0,
            pressure_ox_efficiency: 95.0,
            oxide_pd_recovery: 75.0,
            oxide_au_recovery: 90.0,
            cu_flotation_recovery: 88.0,
            ni_flotation_recovery: 80.0,
            co_flotation_recovery: 75.0,
            final_cu_recovery: 95.0,
            final_pd_recovery: 90.0,
            final_pt_recovery: 88.0,
            final_au_recovery: 92.0,
            final_ni_recovery: 92.0,
            final_co_recovery: 92.0,
            pgm_to_cu_concentrate: 60.0,
            pgm_to_ni_concentrate: 25.0,
        }
    }
}

/// Groups of parameters that are perturbed or swept together
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterFamily {
    FeedRate,
    Efficiency,
    Recovery,
    Distribution,
}

/// Every tunable field of [`ProcessParameters`]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    OxideFeedRate,
    SulphideFeedRate,
    SizingEfficiency,
    OxideGrindingEfficiency,
    LeachingEfficiency,
    CrushingEfficiency,
    SulphideGrindingEfficiency,
    PressureOxEfficiency,
    OxidePdRecovery,
    OxideAuRecovery,
    CuFlotationRecovery,
    NiFlotationRecovery,
    CoFlotationRecovery,
    FinalCuRecovery,
    FinalPdRecovery,
    FinalPtRecovery,
    FinalAuRecovery,
    FinalNiRecovery,
    FinalCoRecovery,
    PgmToCuConcentrate,
    PgmToNiConcentrate,
}

impl Parameter {
    pub const ALL: [Parameter; 21] = [
        Parameter::OxideFeedRate,
        Parameter::SulphideFeedRate,
        Parameter::SizingEfficiency,
        Parameter::OxideGrindingEfficiency,
        Parameter::LeachingEfficiency,
        Parameter::CrushingEfficiency,
        Parameter::SulphideGrindingEfficiency,
        Parameter::PressureOxEfficiency,
        Parameter::OxidePdRecovery,
        Parameter::OxideAuRecovery,
        Parameter::CuFlotationRecovery,
        Parameter::NiFlotationRecovery,
        Parameter::CoFlotationRecovery,
        Parameter::FinalCuRecovery,
        Parameter::FinalPdRecovery,
        Parameter::FinalPtRecovery,
        Parameter::FinalAuRecovery,
        Parameter::FinalNiRecovery,
        Parameter::FinalCoRecovery,
        Parameter::PgmToCuConcentrate,
        Parameter::PgmToNiConcentrate,
    ];

    pub fn family(&self) -> ParameterFamily {
        match self {
            Parameter::OxideFeedRate | Parameter::SulphideFeedRate => ParameterFamily::FeedRate,
            Parameter::SizingEfficiency
            | Parameter::OxideGrindingEfficiency
            | Parameter::LeachingEfficiency
            | Parameter::CrushingEfficiency
            | Parameter::SulphideGrindingEfficiency
            | Parameter::PressureOxEfficiency => ParameterFamily::Efficiency,
            Parameter::PgmToCuConcentrate | Parameter::PgmToNiConcentrate => ParameterFamily::Distribution,
            _ => ParameterFamily::Recovery,
        }
    }

    /// Range a randomly perturbed value is clamped into
    pub fn perturbation_range(&self) -> (f64, f64) {
        match self {
            Parameter::OxidePdRecovery => (60.0, 90.0),
            Parameter::FinalCuRecovery => (70.0, 98.0),
            _ => match self.family() {
                ParameterFamily::FeedRate => (f64::MIN_POSITIVE, f64::MAX),
                ParameterFamily::Efficiency => (80.0, 99.0),
                ParameterFamily::Recovery => (60.0, 98.0),
                ParameterFamily::Distribution => (0.0, 100.0),
            },
        }
    }

    /// Whether the value is a percentage bounded to [0, 100]
    pub fn is_percentage(&self) -> bool {
        self.family() != ParameterFamily::FeedRate
    }

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::OxideFeedRate => "oxide_feed_rate",
            Parameter::SulphideFeedRate => "sulphide_feed_rate",
            Parameter::SizingEfficiency => "sizing_efficiency",
            Parameter::OxideGrindingEfficiency => "oxide_grinding_efficiency",
            Parameter::LeachingEfficiency => "leaching_efficiency",
            Parameter::CrushingEfficiency => "crushing_efficiency",
            Parameter::SulphideGrindingEfficiency => "sulphide_grinding_efficiency",
            Parameter::PressureOxEfficiency => "pressure_ox_efficiency",
            Parameter::OxidePdRecovery => "oxide_pd_recovery",
            Parameter::OxideAuRecovery => "oxide_au_recovery",
            Parameter::CuFlotationRecovery => "cu_flotation_recovery",
            Parameter::NiFlotationRecovery => "ni_flotation_recovery",
            Parameter::CoFlotationRecovery => "co_flotation_recovery",
            Parameter::FinalCuRecovery => "final_cu_recovery",
            Parameter::FinalPdRecovery => "final_pd_recovery",
            Parameter::FinalPtRecovery => "final_pt_recovery",
            Parameter::FinalAuRecovery => "final_au_recovery",
            Parameter::FinalNiRecovery => "final_ni_recovery",
            Parameter::FinalCoRecovery => "final_co_recovery",
            Parameter::PgmToCuConcentrate => "pgm_to_cu_concentrate",
            Parameter::PgmToNiConcentrate => "pgm_to_ni_concentrate",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl ProcessParameters {
    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::OxideFeedRate => self.oxide_feed_rate,
            Parameter::SulphideFeedRate => self.sulphide_feed_rate,
            Parameter::SizingEfficiency => self.sizing_efficiency,
            Parameter::OxideGrindingEfficiency => self.oxide_grinding_efficiency,
            Parameter::LeachingEfficiency => self.leaching_efficiency,
            Parameter::CrushingEfficiency => self.crushing_efficiency,
            Parameter::SulphideGrindingEfficiency => self.sulphide_grinding_efficiency,
            Parameter::PressureOxEfficiency => self.pressure_ox_efficiency,
            Parameter::OxidePdRecovery => self.oxide_pd_recovery,
            Parameter::OxideAuRecovery => self.oxide_au_recovery,
            Parameter::CuFlotationRecovery => self.cu_flotation_recovery,
            Parameter::NiFlotationRecovery => self.ni_flotation_recovery,
            Parameter::CoFlotationRecovery => self.co_flotation_recovery,
            Parameter::FinalCuRecovery => self.final_cu_recovery,
            Parameter::FinalPdRecovery => self.final_pd_recovery,
            Parameter::FinalPtRecovery => self.final_pt_recovery,
            Parameter::FinalAuRecovery => self.final_au_recovery,
            Parameter::FinalNiRecovery => self.final_ni_recovery,
            Parameter::FinalCoRecovery => self.final_co_recovery,
            Parameter::PgmToCuConcentrate => self.pgm_to_cu_concentrate,
            Parameter::PgmToNiConcentrate => self.pgm_to_ni_concentrate,
        }
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        let field = match parameter {
            Parameter::OxideFeedRate => &mut self.oxide_feed_rate,
            Parameter::SulphideFeedRate => &mut self.sulphide_feed_rate,
            Parameter::SizingEfficiency => &mut self.sizing_efficiency,
            Parameter::OxideGrindingEfficiency => &mut self.oxide_grinding_efficiency,
            Parameter::LeachingEfficiency => &mut self.leaching_efficiency,
            Parameter::CrushingEfficiency => &mut self.crushing_efficiency,
            Parameter::SulphideGrindingEfficiency => &mut self.sulphide_grinding_efficiency,
            Parameter::PressureOxEfficiency => &mut self.pressure_ox_efficiency,
            Parameter::OxidePdRecovery => &mut self.oxide_pd_recovery,
            Parameter::OxideAuRecovery => &mut self.oxide_au_recovery,
            Parameter::CuFlotationRecovery => &mut self.cu_flotation_recovery,
            Parameter::NiFlotationRecovery => &mut self.ni_flotation_recovery,
            Parameter::CoFlotationRecovery => &mut self.co_flotation_recovery,
            Parameter::FinalCuRecovery => &mut self.final_cu_recovery,
            Parameter::FinalPdRecovery => &mut self.final_pd_recovery,
            Parameter::FinalPtRecovery => &mut self.final_pt_recovery,
            Parameter::FinalAuRecovery => &mut self.final_au_recovery,
            Parameter::FinalNiRecovery => &mut self.final_ni_recovery,
            Parameter::FinalCoRecovery => &mut self.final_co_recovery,
            Parameter::PgmToCuConcentrate => &mut self.pgm_to_cu_concentrate,
            Parameter::PgmToNiConcentrate => &mut self.pgm_to_ni_concentrate,
        };
        *field = value;
    }

    /// Parameters belonging to `family`, in declaration order
    pub fn family_members(family: ParameterFamily) -> impl Iterator<Item = Parameter> {
        Parameter::ALL.into_iter().filter(move |p| p.family() == family)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_covers_every_parameter() {
        let mut params = ProcessParameters::default();
        for (i, parameter) in Parameter::ALL.iter().enumerate() {
            params.set(*parameter, i as f64);
        }
        for (i, parameter) in Parameter::ALL.iter().enumerate() {
            assert_eq!(params.get(*parameter), i as f64, "{} not stored", parameter);
        }
    }

    #[test]
    fn test_family_membership() {
        let feed: Vec<_> = ProcessParameters::family_members(ParameterFamily::FeedRate).collect();
        assert_eq!(feed, vec![Parameter::OxideFeedRate, Parameter::SulphideFeedRate]);
        assert_eq!(ProcessParameters::family_members(ParameterFamily::Efficiency).count(), 6);
        assert_eq!(ProcessParameters::family_members(ParameterFamily::Recovery).count(), 11);
        assert_eq!(ProcessParameters::family_members(ParameterFamily::Distribution).count(), 2);
    }

    #[test]
    fn test_specific_perturbation_ranges_override_family() {
        assert_eq!(Parameter::OxidePdRecovery.perturbation_range(), (60.0, 90.0));
        assert_eq!(Parameter::FinalCuRecovery.perturbation_range(), (70.0, 98.0));
        assert_eq!(Parameter::FinalPdRecovery.perturbation_range(), (60.0, 98.0));
        assert_eq!(Parameter::SizingEfficiency.perturbation_range(), (80.0, 99.0));
    }
}
