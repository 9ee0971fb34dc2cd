use crate::types::{Metal, PlantDesign, ProcessParameters, StageName, StagePolicy};
use super::{approx_eq, run_oxide};
use crate::circuits::{Circuit, CircuitInputs, OxideCircuit};
use crate::flow::FlowValidator;
use crate::types::{FeedComposition, ProcessType};

/// Feed 100, sizing efficiency 98%: capacity 120 is not exceeded and 98 leaves sizing
#[test]
fn test_sizing_example_without_warning() {
    let (stages, warnings) = run_oxide(&ProcessParameters::default());

    assert_eq!(stages.sizing.capacity, Some(120.0));
    assert!(!stages.sizing.overloaded);
    assert!(approx_eq(stages.sizing.mass, 98.0), "sized mass was {}", stages.sizing.mass);
    assert!(approx_eq(stages.sizing.metals.pd, 0.8 * 0.98));
    assert!(approx_eq(stages.sizing.metals.au, 0.3 * 0.98));
    assert!(warnings.is_empty(), "default oxide circuit should not warn: {:?}", warnings);
}

#[test]
fn test_leaching_recovers_only_pd_and_au() {
    let params = ProcessParameters::default();
    let (stages, _) = run_oxide(&params);

    let ground_pd = stages.grinding.metals.pd;
    let expected_pd = ground_pd * 0.92 * 0.75;
    assert!(approx_eq(stages.leaching.metals.pd, expected_pd));
    assert!(approx_eq(stages.leaching.metals.au, stages.grinding.metals.au * 0.92 * 0.90));
    for metal in [Metal::Cu, Metal::Pt, Metal::Ni, Metal::Co] {
        assert_eq!(stages.leaching.metals.get(metal), 0.0, "{} should not be leached", metal);
        assert!(approx_eq(stages.tailings.metals.get(metal), stages.grinding.metals.get(metal)));
    }
    assert!(approx_eq(stages.tailings.metals.pd, ground_pd - expected_pd));
}

#[test]
fn test_tailings_mass_is_ground_minus_leached() {
    let (stages, _) = run_oxide(&ProcessParameters::default());
    assert!(approx_eq(stages.leaching.mass, 93.1 * 0.92));
    assert!(approx_eq(stages.tailings.mass, stages.grinding.mass - stages.leaching.mass));
    assert!(approx_eq(stages.leaching.losses, 0.0));
}

#[test]
fn test_output_never_exceeds_effective_input() {
    let mut params = ProcessParameters::default();
    params.oxide_feed_rate = 1234.5;
    params.sizing_efficiency = 100.0;
    let (stages, _) = run_oxide(&params);
    for stage in [&stages.sizing, &stages.grinding, &stages.leaching] {
        assert!(
            stage.mass <= stage.effective_input_mass,
            "{} produced {} from {}", stage.stage, stage.mass, stage.effective_input_mass
        );
        assert!(stage.effective_input_mass <= stage.input_mass);
    }
}

#[test]
fn test_overloaded_grinding_clamps_and_degrades() {
    let feed = FeedComposition::default();
    let params = ProcessParameters::default();
    let mut design = PlantDesign::default();
    design.oxide_grinding = StagePolicy::new(0.5, 0.95, true);

    let mut validator = FlowValidator::new();
    let stages = OxideCircuit::new(CircuitInputs { feed: &feed, params: &params, design: &design }).run(&mut validator);
    let warnings = validator.into_warnings();

    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].process_type, ProcessType::Oxide);
    assert_eq!(warnings[0].stage, StageName::Grinding);
    assert!(stages.grinding.overloaded);
    assert!(approx_eq(stages.grinding.effective_input_mass, 49.0));
    assert!(approx_eq(stages.grinding.mass, 49.0 * 0.95 * 0.95));
    // Metal scales by accepted share, then by degraded efficiency
    assert!(approx_eq(stages.grinding.metals.cu, stages.sizing.metals.cu * 0.5 * 0.95 * 0.95));
    assert!(approx_eq(stages.grinding.losses, 98.0 - 49.0 * 0.95 * 0.95));
}
