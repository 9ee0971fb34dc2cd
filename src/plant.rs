use crate::bottleneck::detect_bottlenecks;
use crate::circuits::{Circuit, CircuitInputs, OxideCircuit, SulphideCircuit};
use crate::config::{ConfigError, PlantConfig};
use crate::flow::FlowValidator;
use crate::types::{ActiveCircuits, FeedComposition, MetalAmounts, ProcessParameters, SimulationResult};

/// Runs the active circuits once and collects their stages, warnings and bottlenecks.
///
/// Pure with respect to `config`: every run owns its validator, so repeated
/// or concurrent runs never share state.
pub fn run_simulation(config: &PlantConfig) -> SimulationResult {
    let inputs = CircuitInputs {
        feed: config.feed(),
        params: config.parameters(),
        design: config.design(),
    };
    let circuits = config.circuits();
    let mut validator = FlowValidator::new();

    let oxide = circuits
        .includes_oxide()
        .then(|| OxideCircuit::new(inputs).run(&mut validator));
    let sulphide = circuits
        .includes_sulphide()
        .then(|| SulphideCircuit::new(inputs).run(&mut validator));

    let bottlenecks = detect_bottlenecks(oxide.as_ref(), sulphide.as_ref(), config.design());

    let mut final_recovered = MetalAmounts::zero();
    let mut tailings_mass = 0.0;
    if let Some(stages) = &oxide {
        final_recovered = final_recovered + stages.recovered();
        tailings_mass += stages.tailings.mass;
    }
    if let Some(stages) = &sulphide {
        final_recovered = final_recovered + stages.recovered();
        tailings_mass += stages.tailings.mass;
    }

    let warnings = validator.into_warnings();
    tracing::debug!(
        warnings = warnings.len(),
        bottlenecks = bottlenecks.len(),
        recovered = final_recovered.total(),
        "simulation run complete"
    );

    SimulationResult {
        oxide,
        sulphide,
        warnings,
        bottlenecks,
        final_recovered,
        tailings_mass,
    }
}

/// Validates the inputs with the default stage design, then runs once
pub fn simulate(
    feed: FeedComposition,
    parameters: ProcessParameters,
    circuits: ActiveCircuits,
) -> Result<SimulationResult, ConfigError> {
    let config = PlantConfig::new(feed, parameters, circuits)?;
    Ok(run_simulation(&config))
}
