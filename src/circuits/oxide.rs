use crate::flow::FlowValidator;
use crate::types::{Metal, MetalAmounts, OxideStages, ProcessType, StageName, StageResult};
use super::{size_reduction, Admission, Circuit, CircuitInputs};

/// Feed → Sizing → Grinding → Leaching → Tailings
pub struct OxideCircuit<'a> {
    inputs: CircuitInputs<'a>,
}

impl<'a> OxideCircuit<'a> {
    pub fn new(inputs: CircuitInputs<'a>) -> Self {
        Self { inputs }
    }
}

impl Circuit for OxideCircuit<'_> {
    type Stages = OxideStages;

    fn run(&self, validator: &mut FlowValidator) -> OxideStages {
        let CircuitInputs { feed, params, design } = self.inputs;

        let feed_mass = params.oxide_feed_rate;
        let feed_stage = StageResult::pass_through(StageName::Feed, feed_mass, feed.contained_metal(feed_mass));

        let sizing = size_reduction(validator, ProcessType::Oxide, StageName::Sizing, &design.sizing, params.sizing_efficiency, &feed_stage);
        let grinding = size_reduction(
            validator,
            ProcessType::Oxide,
            StageName::Grinding,
            &design.oxide_grinding,
            params.oxide_grinding_efficiency,
            &sizing,
        );

        // Leaching splits the ground stream into leach solution and tailings
        let admission = Admission::evaluate(validator, ProcessType::Oxide, StageName::Leaching, &design.leaching, grinding.mass);
        let efficiency = admission.efficiency(&design.leaching, params.leaching_efficiency);
        let entering = grinding.metals.scale(admission.ratio());

        let mut recovered = MetalAmounts::zero();
        recovered.set(Metal::Pd, entering.pd * efficiency * params.oxide_pd_recovery / 100.0);
        recovered.set(Metal::Au, entering.au * efficiency * params.oxide_au_recovery / 100.0);

        let leach_mass = admission.effective * efficiency;
        let tailings_mass = admission.effective - leach_mass;

        let leaching = StageResult {
            stage: StageName::Leaching,
            input_mass: admission.nominal,
            effective_input_mass: admission.effective,
            mass: leach_mass,
            metals: recovered,
            losses: admission.nominal - leach_mass - tailings_mass,
            capacity: Some(admission.capacity),
            overloaded: admission.overloaded,
        };
        let tailings = StageResult::pass_through(StageName::Tailings, tailings_mass, entering - recovered);

        OxideStages {
            feed: feed_stage,
            sizing,
            grinding,
            leaching,
            tailings,
        }
    }
}
