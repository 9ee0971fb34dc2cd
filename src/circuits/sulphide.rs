use crate::flow::FlowValidator;
use crate::types::{
    ConcentrateStreams, Metal, MetalAmounts, ProcessParameters, ProcessType, StageName, StagePolicy, StageResult,
    SulphideStages,
};
use super::{size_reduction, Admission, Circuit, CircuitInputs};

/// Feed → Crushing → Grinding → Cu Flotation → Ni Flotation → Pressure Oxidation
/// → Final Recovery → Tailings
pub struct SulphideCircuit<'a> {
    inputs: CircuitInputs<'a>,
}

/// Concentrate and residual leaving one flotation stage
struct FlotationSplit {
    concentrate: StageResult,
    residual_mass: f64,
    residual_metals: MetalAmounts,
}

impl<'a> SulphideCircuit<'a> {
    pub fn new(inputs: CircuitInputs<'a>) -> Self {
        Self { inputs }
    }

    /// Routes `yield_fraction` of the accepted mass to concentrate and each
    /// metal by the fraction `recovery` gives for it; the rest is residual.
    fn flotation<F>(
        &self,
        validator: &mut FlowValidator,
        stage: StageName,
        policy: &StagePolicy,
        yield_fraction: f64,
        mass: f64,
        metals: MetalAmounts,
        recovery: F,
    ) -> FlotationSplit
    where
        F: Fn(Metal) -> f64,
    {
        let admission = Admission::evaluate(validator, ProcessType::Sulphide, stage, policy, mass);
        let entering = metals.scale(admission.ratio());
        let concentrate_metals = entering.map(|metal, value| value * recovery(metal) / 100.0);
        let concentrate_mass = admission.effective * yield_fraction;
        let residual_mass = admission.effective - concentrate_mass;

        FlotationSplit {
            concentrate: StageResult {
                stage,
                input_mass: admission.nominal,
                effective_input_mass: admission.effective,
                mass: concentrate_mass,
                metals: concentrate_metals,
                losses: admission.nominal - admission.effective,
                capacity: Some(admission.capacity),
                overloaded: admission.overloaded,
            },
            residual_mass,
            residual_metals: entering - concentrate_metals,
        }
    }
}

fn cu_flotation_recovery(params: &ProcessParameters, metal: Metal) -> f64 {
    match metal {
        Metal::Cu => params.cu_flotation_recovery,
        Metal::Pd | Metal::Pt | Metal::Au => params.pgm_to_cu_concentrate,
        Metal::Ni | Metal::Co => 0.0,
    }
}

fn ni_flotation_recovery(params: &ProcessParameters, metal: Metal) -> f64 {
    match metal {
        Metal::Ni => params.ni_flotation_recovery,
        Metal::Co => params.co_flotation_recovery,
        Metal::Pd | Metal::Pt | Metal::Au => params.pgm_to_ni_concentrate,
        Metal::Cu => 0.0,
    }
}

fn final_recovery(params: &ProcessParameters, metal: Metal) -> f64 {
    match metal {
        Metal::Cu => params.final_cu_recovery,
        Metal::Pd => params.final_pd_recovery,
        Metal::Pt => params.final_pt_recovery,
        Metal::Au => params.final_au_recovery,
        Metal::Ni => params.final_ni_recovery,
        Metal::Co => params.final_co_recovery,
    }
}

impl Circuit for SulphideCircuit<'_> {
    type Stages = SulphideStages;

    fn run(&self, validator: &mut FlowValidator) -> SulphideStages {
        let CircuitInputs { feed, params, design } = self.inputs;

        let feed_mass = params.sulphide_feed_rate;
        let feed_stage = StageResult::pass_through(StageName::Feed, feed_mass, feed.contained_metal(feed_mass));

        let crushing = size_reduction(validator, ProcessType::Sulphide, StageName::Crushing, &design.crushing, params.crushing_efficiency, &feed_stage);
        let grinding = size_reduction(
            validator,
            ProcessType::Sulphide,
            StageName::Grinding,
            &design.sulphide_grinding,
            params.sulphide_grinding_efficiency,
            &crushing,
        );

        let cu = self.flotation(
            validator,
            StageName::CuFlotation,
            &design.cu_flotation,
            design.cu_concentrate_yield,
            grinding.mass,
            grinding.metals,
            |metal| cu_flotation_recovery(params, metal),
        );
        let ni = self.flotation(
            validator,
            StageName::NiFlotation,
            &design.ni_flotation,
            design.ni_concentrate_yield,
            cu.residual_mass,
            cu.residual_metals,
            |metal| ni_flotation_recovery(params, metal),
        );

        // Pressure oxidation never clamps; overload only degrades its efficiency
        let policy = &design.pressure_oxidation;
        let concentrate_mass = cu.concentrate.mass + ni.concentrate.mass;
        let admission = Admission::evaluate(validator, ProcessType::Sulphide, StageName::PressureOxidation, policy, concentrate_mass);
        let factor = admission.efficiency(policy, params.pressure_ox_efficiency);
        let oxidized_streams = ConcentrateStreams {
            cu_concentrate: cu.concentrate.metals.scale(admission.ratio() * factor),
            ni_concentrate: ni.concentrate.metals.scale(admission.ratio() * factor),
        };
        let oxidized_mass = admission.effective * factor;
        let pressure_oxidation = StageResult {
            stage: StageName::PressureOxidation,
            input_mass: admission.nominal,
            effective_input_mass: admission.effective,
            mass: oxidized_mass,
            metals: oxidized_streams.combined(),
            losses: admission.nominal - oxidized_mass,
            capacity: Some(admission.capacity),
            overloaded: admission.overloaded,
        };

        // Each final metal is the sum of both concentrate streams times its final fraction
        let recovered = oxidized_streams
            .combined()
            .map(|metal, value| value * final_recovery(params, metal) / 100.0);
        let recovered_mass = recovered.total();
        let final_recovery_stage = StageResult {
            stage: StageName::FinalRecovery,
            input_mass: oxidized_mass,
            effective_input_mass: oxidized_mass,
            mass: recovered_mass,
            metals: recovered,
            losses: oxidized_mass - recovered_mass,
            capacity: None,
            overloaded: false,
        };

        let tailings = StageResult::pass_through(StageName::Tailings, ni.residual_mass, ni.residual_metals);

        SulphideStages {
            feed: feed_stage,
            crushing,
            grinding,
            cu_flotation: cu.concentrate,
            ni_flotation: ni.concentrate,
            pressure_oxidation,
            oxidized_streams,
            final_recovery: final_recovery_stage,
            tailings,
        }
    }
}
