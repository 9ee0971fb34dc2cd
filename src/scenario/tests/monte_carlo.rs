use rand::rngs::StdRng;
use rand::SeedableRng;
use crate::config::PlantConfig;
use crate::scenario::monte_carlo::vary_inputs;
use crate::scenario::{run_monte_carlo, run_trial, summarize, ScenarioError, VariationSpec};
use crate::types::constants::MIN_PERTURBED_GRADE;
use crate::types::{
    ActiveCircuits, FeedComposition, Metal, MetalAmounts, MetalPrices, ParameterFamily, ProcessParameters,
};
use super::baseline_revenue;

#[test]
fn test_zero_variation_reproduces_baseline_exactly() {
    let config = PlantConfig::default();
    let prices = MetalPrices::default();
    let report = run_monte_carlo(&config, &prices, 25, &VariationSpec::none(), 95.0).unwrap();

    let expected = baseline_revenue(&config);
    assert_eq!(report.revenue.mean, expected, "mean of identical trials must equal the single run");
    assert_eq!(report.revenue.std_dev, 0.0);
    assert_eq!(report.revenue.min, expected);
    assert_eq!(report.revenue.max, expected);
    assert_eq!(report.trials.len(), 25);
}

#[test]
fn test_seeded_runs_are_deterministic() {
    let config = PlantConfig::default();
    let prices = MetalPrices::default();
    let variation = VariationSpec::default();
    let first = run_monte_carlo(&config, &prices, 40, &variation, 95.0).unwrap();
    let second = run_monte_carlo(&config, &prices, 40, &variation, 95.0).unwrap();
    assert_eq!(first, second);

    let reseeded = VariationSpec { seed: variation.seed + 1000, ..variation };
    let third = run_monte_carlo(&config, &prices, 40, &reseeded, 95.0).unwrap();
    assert_ne!(first.revenue.mean, third.revenue.mean);
}

#[test]
fn test_partitioned_trials_match_sequential_run() {
    let config = PlantConfig::default();
    let prices = MetalPrices::default();
    let variation = VariationSpec::default();
    let sequential = run_monte_carlo(&config, &prices, 30, &variation, 90.0).unwrap();

    // Evaluate the indices out of order, as parallel workers would
    let mut outcomes = Vec::new();
    for chunk in [(20..30), (0..10), (10..20)] {
        for index in chunk {
            outcomes.push(run_trial(&config, &prices, &variation, index).unwrap());
        }
    }
    let merged = summarize(outcomes, 90.0).unwrap();
    assert_eq!(sequential, merged);
}

#[test]
fn test_variation_spreads_revenue_around_baseline() {
    let config = PlantConfig::default();
    let prices = MetalPrices::default();
    let report = run_monte_carlo(&config, &prices, 400, &VariationSpec::default(), 95.0).unwrap();
    let baseline = baseline_revenue(&config);

    assert!(report.revenue.std_dev > 0.0);
    assert!(report.revenue.lower_quantile <= report.revenue.median);
    assert!(report.revenue.median <= report.revenue.upper_quantile);
    assert!(report.revenue.min <= report.revenue.lower_quantile);
    assert!(report.revenue.upper_quantile <= report.revenue.max);
    // Symmetric perturbations keep the sample mean near the deterministic run
    let relative_gap = (report.revenue.mean - baseline).abs() / baseline;
    assert!(relative_gap < 0.1, "mean {} drifted from baseline {}", report.revenue.mean, baseline);
    assert!(report.revenue.coefficient_of_variation > 0.0);
}

#[test]
fn test_rejects_bad_inputs() {
    let config = PlantConfig::default();
    let prices = MetalPrices::default();
    assert_eq!(
        run_monte_carlo(&config, &prices, 0, &VariationSpec::default(), 95.0).unwrap_err(),
        ScenarioError::NoTrials
    );
    assert!(matches!(
        run_monte_carlo(&config, &prices, 10, &VariationSpec::default(), 100.0),
        Err(ScenarioError::InvalidConfidence(_))
    ));
    let negative = VariationSpec { grade: -1.0, ..VariationSpec::default() };
    assert!(matches!(
        run_monte_carlo(&config, &prices, 10, &negative, 95.0),
        Err(ScenarioError::InvalidVariation { family: "grade", .. })
    ));
}

#[test]
fn test_absent_metal_stays_absent_under_grade_noise() {
    let feed = FeedComposition::new(MetalAmounts::new(1.5, 0.8, 0.6, 0.0, 1.2, 0.4));
    let config = PlantConfig::new(feed, ProcessParameters::default(), ActiveCircuits::Oxide).unwrap();
    let variation = VariationSpec { grade: 10.0, ..VariationSpec::none() };

    let trial = run_trial(&config, &MetalPrices::default(), &variation, 0).unwrap();
    assert_eq!(trial.recovered.au, 0.0);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (varied, _) = vary_inputs(&config, &variation, &mut rng).unwrap();
        assert_eq!(varied.grade(Metal::Au), 0.0);
        assert!(varied.grade(Metal::Pd) >= MIN_PERTURBED_GRADE);
    }
}

#[test]
fn test_extreme_variation_stays_inside_parameter_ranges() {
    let config = PlantConfig::default();
    let variation = VariationSpec { feed_rate: 200.0, efficiency: 200.0, grade: 200.0, recovery: 200.0, seed: 0 };
    let families = [ParameterFamily::FeedRate, ParameterFamily::Efficiency, ParameterFamily::Recovery];

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (feed, params) = vary_inputs(&config, &variation, &mut rng).unwrap();

        for family in families {
            for parameter in ProcessParameters::family_members(family) {
                let (low, high) = parameter.perturbation_range();
                let value = params.get(parameter);
                assert!(
                    (low..=high).contains(&value),
                    "{} = {} outside [{}, {}] for seed {}",
                    parameter.name(),
                    value,
                    low,
                    high,
                    seed
                );
            }
        }
        assert!(params.oxide_feed_rate > 0.0);
        assert!(params.sulphide_feed_rate > 0.0);

        for metal in Metal::ALL {
            let grade = feed.grade(metal);
            assert!((MIN_PERTURBED_GRADE..=100.0).contains(&grade), "{:?} grade {} for seed {}", metal, grade, seed);
        }
        // Perturbed inputs must still form a valid plant
        assert!(config.with_inputs(feed, params).is_ok());
    }
}
