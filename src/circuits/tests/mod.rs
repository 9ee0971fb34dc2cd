mod oxide_stages;

use crate::circuits::{Circuit, CircuitInputs, OxideCircuit, SulphideCircuit};
use crate::flow::FlowValidator;
use crate::types::{FeedComposition, FlowWarning, OxideStages, PlantDesign, ProcessParameters, SulphideStages};

const TOLERANCE: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE * a.abs().max(b.abs()).max(1.0)
}

fn run_oxide(params: &ProcessParameters) -> (OxideStages, Vec<FlowWarning>) {
    let feed = FeedComposition::default();
    let design = PlantDesign::default();
    let mut validator = FlowValidator::new();
    let stages = OxideCircuit::new(CircuitInputs { feed: &feed, params, design: &design }).run(&mut validator);
    (stages, validator.into_warnings())
}

fn run_sulphide_with(params: &ProcessParameters, design: &PlantDesign) -> (SulphideStages, Vec<FlowWarning>) {
    let feed = FeedComposition::default();
    let mut validator = FlowValidator::new();
    let stages = SulphideCircuit::new(CircuitInputs { feed: &feed, params, design }).run(&mut validator);
    (stages, validator.into_warnings())
}

fn run_sulphide(params: &ProcessParameters) -> (SulphideStages, Vec<FlowWarning>) {
    run_sulphide_with(params, &PlantDesign::default())
}
