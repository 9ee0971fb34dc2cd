use crate::config::PlantConfig;
use crate::scenario::{run_optimization, Constraints, Objective, OptimizationOutcome, ScenarioError, SearchBounds};
use crate::types::MetalPrices;

fn relaxed() -> Constraints {
    Constraints { max_operating_cost: f64::MAX, min_recovery_percent: 0.0, min_three_e_grade: None }
}

#[test]
fn test_infeasible_when_cost_cap_below_every_point() {
    let config = PlantConfig::default();
    let bounds = SearchBounds::around(&config, 200.0, 40.0);
    let constraints = Constraints { max_operating_cost: 1.0, ..relaxed() };

    let report = run_optimization(&config, &MetalPrices::default(), Objective::Revenue, &constraints, &bounds).unwrap();
    assert_eq!(report.outcome, OptimizationOutcome::Infeasible { evaluated: 80 });
    assert_eq!(report.grid.len(), 80);
    assert!(report.grid.iter().all(|p| !p.feasible));
}

#[test]
fn test_grid_is_row_major_over_feed_rate() {
    let config = PlantConfig::default();
    let bounds = SearchBounds::around(&config, 200.0, 40.0);
    let report = run_optimization(&config, &MetalPrices::default(), Objective::Revenue, &relaxed(), &bounds).unwrap();

    assert!((report.grid[0].feed_rate - 120.0).abs() < 1e-9);
    assert_eq!(report.grid[0].target_recovery, 40.0);
    assert_eq!(report.grid[1].feed_rate, report.grid[0].feed_rate);
    assert_eq!(report.grid[7].target_recovery, 95.0);
    assert_eq!(report.grid[8].feed_rate, report.grid[9].feed_rate);
    assert!(report.grid[8].feed_rate > report.grid[0].feed_rate);
    assert_eq!(report.grid[79].feed_rate, 200.0);
}

#[test]
fn test_revenue_objective_picks_largest_feed_and_recovery() {
    let config = PlantConfig::default();
    let bounds = SearchBounds::around(&config, 200.0, 40.0);
    let report = run_optimization(&config, &MetalPrices::default(), Objective::Revenue, &relaxed(), &bounds).unwrap();

    match report.outcome {
        OptimizationOutcome::Optimal { point, parameters } => {
            assert_eq!(point.feed_rate, 200.0);
            assert_eq!(point.target_recovery, 95.0);
            assert_eq!(parameters.oxide_feed_rate, 200.0);
            assert_eq!(parameters.final_pd_recovery, 95.0);
            let best = report.grid.iter().map(|p| p.revenue).fold(f64::MIN, f64::max);
            assert_eq!(point.revenue, best);
        }
        OptimizationOutcome::Infeasible { .. } => panic!("relaxed constraints must admit a point"),
    }
}

#[test]
fn test_ties_keep_first_point() {
    // A grade constraint the feed already meets leaves the choice unchanged
    let config = PlantConfig::default();
    let bounds = SearchBounds::around(&config, 200.0, 40.0);
    let constraints = Constraints { min_three_e_grade: Some(0.5), ..relaxed() };
    let with_grade = run_optimization(&config, &MetalPrices::default(), Objective::ProfitMargin, &constraints, &bounds).unwrap();
    let without = run_optimization(&config, &MetalPrices::default(), Objective::ProfitMargin, &relaxed(), &bounds).unwrap();
    assert_eq!(with_grade.outcome, without.outcome);

    let single = SearchBounds { feed_rate: (150.0, 150.0), target_recovery: (80.0, 80.0), feed_rate_steps: 3, recovery_steps: 2 };
    let report = run_optimization(&config, &MetalPrices::default(), Objective::Revenue, &relaxed(), &single).unwrap();
    assert_eq!(report.grid.len(), 6);
    match report.outcome {
        OptimizationOutcome::Optimal { point, .. } => assert_eq!(&point, &report.grid[0]),
        OptimizationOutcome::Infeasible { .. } => panic!("identical points are all feasible"),
    }
}

#[test]
fn test_grade_constraint_can_make_search_infeasible() {
    let config = PlantConfig::default();
    let bounds = SearchBounds::around(&config, 200.0, 40.0);
    let constraints = Constraints { min_three_e_grade: Some(5.0), ..relaxed() };
    let report = run_optimization(&config, &MetalPrices::default(), Objective::Revenue, &constraints, &bounds).unwrap();
    assert!(!report.outcome.is_feasible());
}

#[test]
fn test_rejects_inverted_bounds() {
    let config = PlantConfig::default();
    let bounds = SearchBounds { feed_rate: (200.0, 100.0), target_recovery: (40.0, 95.0), feed_rate_steps: 10, recovery_steps: 8 };
    assert!(matches!(
        run_optimization(&config, &MetalPrices::default(), Objective::Revenue, &relaxed(), &bounds),
        Err(ScenarioError::InvalidBounds(_))
    ));
}
