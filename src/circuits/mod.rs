use crate::flow::FlowValidator;
use crate::types::{FeedComposition, PlantDesign, ProcessParameters, ProcessType, StageName, StagePolicy, StageResult};

pub mod oxide;
pub mod sulphide;

pub use oxide::OxideCircuit;
pub use sulphide::SulphideCircuit;

#[cfg(test)]
mod tests;

/// One processing circuit, run as a pure function of its inputs
pub trait Circuit {
    /// Per-stage record the circuit produces
    type Stages;

    /// Runs every stage in order, reporting capacity shortfalls to `validator`
    fn run(&self, validator: &mut FlowValidator) -> Self::Stages;
}

/// Inputs shared by both circuits
#[derive(Debug, Clone, Copy)]
pub struct CircuitInputs<'a> {
    pub feed: &'a FeedComposition,
    pub params: &'a ProcessParameters,
    pub design: &'a PlantDesign,
}

/// How much of a stage's nominal input it accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Admission {
    pub nominal: f64,
    pub capacity: f64,
    pub effective: f64,
    pub overloaded: bool,
}

impl Admission {
    /// Checks `nominal` against the stage capacity and clamps it if the policy says so
    pub fn evaluate(
        validator: &mut FlowValidator,
        process: ProcessType,
        stage: StageName,
        policy: &StagePolicy,
        nominal: f64,
    ) -> Self {
        let capacity = policy.capacity_for(nominal);
        let overloaded = !validator.validate(stage, nominal, capacity, process);
        let effective = if overloaded && policy.clamp_on_overload {
            tracing::debug!(%process, %stage, nominal, capacity, "clamping stage input to capacity");
            capacity
        } else {
            nominal
        };
        Self { nominal, capacity, effective, overloaded }
    }

    /// Share of the nominal input that was accepted
    pub fn ratio(&self) -> f64 {
        if self.nominal > 0.0 {
            self.effective / self.nominal
        } else {
            0.0
        }
    }

    /// Stage efficiency as a fraction, degraded when overloaded
    pub fn efficiency(&self, policy: &StagePolicy, base_percent: f64) -> f64 {
        let efficiency = policy.efficiency(base_percent, self.overloaded);
        if self.overloaded && policy.degradation_factor < 1.0 {
            tracing::debug!(base_percent, degraded_percent = efficiency, "stage efficiency degraded by overload");
        }
        efficiency / 100.0
    }
}

/// A stage that keeps `base_efficiency` percent of the mass and metal it accepts
pub(crate) fn size_reduction(
    validator: &mut FlowValidator,
    process: ProcessType,
    stage: StageName,
    policy: &StagePolicy,
    base_efficiency: f64,
    upstream: &StageResult,
) -> StageResult {
    let admission = Admission::evaluate(validator, process, stage, policy, upstream.mass);
    let efficiency = admission.efficiency(policy, base_efficiency);
    let mass = admission.effective * efficiency;
    StageResult {
        stage,
        input_mass: admission.nominal,
        effective_input_mass: admission.effective,
        mass,
        metals: upstream.metals.scale(admission.ratio() * efficiency),
        losses: admission.nominal - mass,
        capacity: Some(admission.capacity),
        overloaded: admission.overloaded,
    }
}
