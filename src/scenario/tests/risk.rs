use crate::config::PlantConfig;
use crate::plant::run_simulation;
use crate::scenario::{assess_risk, capacity_utilization, RiskEvent, RiskSpec, UtilizationStatus};
use crate::types::{ActiveCircuits, FeedComposition, MetalPrices, ProcessParameters, StageName};
use super::baseline_revenue;

#[test]
fn test_risk_impacts_follow_probabilities() {
    let config = PlantConfig::default();
    let report = assess_risk(&config, &MetalPrices::default(), &RiskSpec::default()).unwrap();
    let base = baseline_revenue(&config);

    let events: Vec<RiskEvent> = report.scenarios.iter().map(|s| s.event).collect();
    assert_eq!(events, vec![
        RiskEvent::BaseCase,
        RiskEvent::CrusherFailure,
        RiskEvent::MillFailure,
        RiskEvent::FlotationFailure,
        RiskEvent::GradeReduction,
        RiskEvent::SupplyShortage,
    ]);

    let impact = |event: RiskEvent| report.scenarios.iter().find(|s| s.event == event).map(|s| s.impact).unwrap();
    assert!((impact(RiskEvent::CrusherFailure) - base * 0.05 * 8.0 / 24.0).abs() < 1e-6);
    assert!((impact(RiskEvent::FlotationFailure) - base * 0.02 * 8.0 / 24.0 * 0.8).abs() < 1e-6);
    assert!((impact(RiskEvent::SupplyShortage) - base * 0.10 * 0.30).abs() < 1e-6);
    assert_eq!(report.worst().map(|s| s.event), Some(RiskEvent::SupplyShortage));
}

#[test]
fn test_oxide_only_plant_has_no_equipment_failures() {
    let config = PlantConfig::new(FeedComposition::default(), ProcessParameters::default(), ActiveCircuits::Oxide).unwrap();
    let report = assess_risk(&config, &MetalPrices::default(), &RiskSpec::default()).unwrap();
    assert_eq!(report.scenarios.len(), 3);
}

#[test]
fn test_default_plant_utilization() {
    let result = run_simulation(&PlantConfig::default());
    let report = capacity_utilization(&result);

    // Sizing, grinding, leaching plus crushing, grinding, two flotations, pressure oxidation
    assert_eq!(report.stages.len(), 8);
    assert_eq!(report.overloaded_count, 1);
    let overloaded = report.stages.iter().find(|s| s.status == UtilizationStatus::Overloaded).unwrap();
    assert_eq!(overloaded.stage, StageName::Grinding);
    assert!((overloaded.utilization_percent - 100.0 / 0.95).abs() < 1e-9);
    assert_eq!(overloaded.spare_capacity(), 0.0);
    assert!(report.average_utilization_percent > 0.0);
}
