use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use crate::config::PlantConfig;
use crate::plant::run_simulation;
use crate::types::constants::{DEFAULT_SEED, MIN_PERTURBED_GRADE};
use crate::types::{FeedComposition, Metal, MetalAmounts, MetalPrices, ParameterFamily, ProcessParameters};
use crate::valuation::compute_revenue;
use super::stats::DistributionStats;
use super::ScenarioError;

/// Standard deviation of the relative perturbation per parameter family, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationSpec {
    pub feed_rate: f64,
    pub efficiency: f64,
    pub grade: f64,
    pub recovery: f64,
    /// Trial `i` draws from a generator seeded with `seed + i`
    pub seed: u64,
}

impl Default for VariationSpec {
    fn default() -> Self {
        Self {
            feed_rate: 10.0,
            efficiency: 5.0,
            grade: 10.0,
            recovery: 7.0,
            seed: DEFAULT_SEED,
        }
    }
}

impl VariationSpec {
    /// No perturbation at all; every trial reproduces the baseline
    pub fn none() -> Self {
        Self { feed_rate: 0.0, efficiency: 0.0, grade: 0.0, recovery: 0.0, seed: DEFAULT_SEED }
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        let families = [
            ("feed_rate", self.feed_rate),
            ("efficiency", self.efficiency),
            ("grade", self.grade),
            ("recovery", self.recovery),
        ];
        for (family, value) in families {
            if !value.is_finite() || value < 0.0 {
                return Err(ScenarioError::InvalidVariation { family, value });
            }
        }
        Ok(())
    }
}

/// What one randomized trial produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub index: usize,
    pub revenue: f64,
    pub recovered: MetalAmounts,
    /// Whether any stage ran over capacity
    pub overloaded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloReport {
    pub revenue: DistributionStats,
    pub mean_recovered: MetalAmounts,
    /// Trials in which at least one stage ran over capacity
    pub overloaded_trials: usize,
    pub trials: Vec<TrialOutcome>,
}

fn validate_confidence(confidence_level: f64) -> Result<(), ScenarioError> {
    if confidence_level.is_finite() && confidence_level > 0.0 && confidence_level < 100.0 {
        Ok(())
    } else {
        Err(ScenarioError::InvalidConfidence(confidence_level))
    }
}

/// Multiplies `value` by `1 + N(0, σ/100)`
fn perturb(value: f64, noise: &Option<Normal<f64>>, rng: &mut StdRng) -> f64 {
    match noise {
        Some(normal) => value * (1.0 + normal.sample(rng)),
        None => value,
    }
}

fn noise_for(sigma_percent: f64, family: &'static str) -> Result<Option<Normal<f64>>, ScenarioError> {
    if sigma_percent == 0.0 {
        return Ok(None);
    }
    Normal::new(0.0, sigma_percent / 100.0)
        .map(Some)
        .map_err(|_| ScenarioError::InvalidVariation { family, value: sigma_percent })
}

/// Draws one varied copy of the baseline inputs. Families with zero
/// deviation keep their baseline values untouched, as do metals absent
/// from the baseline feed.
pub(crate) fn vary_inputs(
    base: &PlantConfig,
    variation: &VariationSpec,
    rng: &mut StdRng,
) -> Result<(FeedComposition, ProcessParameters), ScenarioError> {
    let mut params = base.parameters().clone();
    let mut feed = *base.feed();

    let families = [
        (ParameterFamily::FeedRate, noise_for(variation.feed_rate, "feed_rate")?),
        (ParameterFamily::Efficiency, noise_for(variation.efficiency, "efficiency")?),
    ];
    for (family, noise) in &families {
        if noise.is_none() {
            continue;
        }
        for parameter in ProcessParameters::family_members(*family) {
            let (low, high) = parameter.perturbation_range();
            let value = perturb(params.get(parameter), noise, rng).clamp(low, high);
            params.set(parameter, value);
        }
    }

    let grade_noise = noise_for(variation.grade, "grade")?;
    if grade_noise.is_some() {
        for metal in Metal::ALL {
            if feed.grade(metal) <= 0.0 {
                continue;
            }
            let grade = perturb(feed.grade(metal), &grade_noise, rng).clamp(MIN_PERTURBED_GRADE, 100.0);
            feed.grades.set(metal, grade);
        }
    }

    let recovery_noise = noise_for(variation.recovery, "recovery")?;
    if recovery_noise.is_some() {
        for parameter in ProcessParameters::family_members(ParameterFamily::Recovery) {
            let (low, high) = parameter.perturbation_range();
            let value = perturb(params.get(parameter), &recovery_noise, rng).clamp(low, high);
            params.set(parameter, value);
        }
    }

    Ok((feed, params))
}

/// Runs trial `index` on its own generator, seeded `variation.seed + index`
pub fn run_trial(
    base: &PlantConfig,
    prices: &MetalPrices,
    variation: &VariationSpec,
    index: usize,
) -> Result<TrialOutcome, ScenarioError> {
    let mut rng = StdRng::seed_from_u64(variation.seed.wrapping_add(index as u64));
    let (feed, params) = vary_inputs(base, variation, &mut rng)?;
    let config = base.with_inputs(feed, params)?;
    let result = run_simulation(&config);
    Ok(TrialOutcome {
        index,
        revenue: compute_revenue(&result, prices),
        recovered: result.final_recovered,
        overloaded: !result.warnings.is_empty(),
    })
}

/// Aggregates finished trials; order does not matter beyond the stored sequence
pub fn summarize(mut trials: Vec<TrialOutcome>, confidence_level: f64) -> Result<MonteCarloReport, ScenarioError> {
    validate_confidence(confidence_level)?;
    trials.sort_by_key(|t| t.index);

    let revenues: Vec<f64> = trials.iter().map(|t| t.revenue).collect();
    let revenue = DistributionStats::from_values(&revenues, confidence_level).ok_or(ScenarioError::NoTrials)?;

    let count = trials.len() as f64;
    let mean_recovered = trials
        .iter()
        .fold(MetalAmounts::zero(), |acc, t| acc + t.recovered)
        .scale(1.0 / count);
    let overloaded_trials = trials.iter().filter(|t| t.overloaded).count();

    Ok(MonteCarloReport { revenue, mean_recovered, overloaded_trials, trials })
}

/// Runs `trials` randomized trials one after another and summarizes them.
///
/// Seeding per trial index means any partition of the indices across workers,
/// followed by [`summarize`], yields the same report.
pub fn run_monte_carlo(
    base: &PlantConfig,
    prices: &MetalPrices,
    trials: usize,
    variation: &VariationSpec,
    confidence_level: f64,
) -> Result<MonteCarloReport, ScenarioError> {
    if trials == 0 {
        return Err(ScenarioError::NoTrials);
    }
    validate_confidence(confidence_level)?;
    variation.validate()?;

    let outcomes = (0..trials)
        .map(|index| run_trial(base, prices, variation, index))
        .collect::<Result<Vec<_>, _>>()?;
    let report = summarize(outcomes, confidence_level)?;
    tracing::debug!(
        trials,
        mean = report.revenue.mean,
        cv = report.revenue.coefficient_of_variation,
        "monte carlo complete"
    );
    Ok(report)
}
