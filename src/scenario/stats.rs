use serde::{Deserialize, Serialize};

/// Streaming mean and variance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Welford {
    count: usize,
    mean: f64,
    m2: f64,
}

impl Welford {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance; 0 for fewer than two values
    pub fn sample_variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

/// Summary of a sampled distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Confidence level the quantiles were taken at, in percent
    pub confidence_level: f64,
    pub lower_quantile: f64,
    pub upper_quantile: f64,
    /// std / mean × 100; 0 when the mean is 0
    pub coefficient_of_variation: f64,
}

impl DistributionStats {
    /// Describes `values` at `confidence_level` percent. `None` when empty.
    pub fn from_values(values: &[f64], confidence_level: f64) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut accumulator = Welford::new();
        for value in values {
            accumulator.push(*value);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let tail = (100.0 - confidence_level) / 200.0;
        let mean = accumulator.mean();
        let std_dev = accumulator.sample_std_dev();
        Some(Self {
            count: values.len(),
            mean,
            median: quantile(&sorted, 0.5),
            std_dev,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            confidence_level,
            lower_quantile: quantile(&sorted, tail),
            upper_quantile: quantile(&sorted, 1.0 - tail),
            coefficient_of_variation: if mean != 0.0 { std_dev / mean * 100.0 } else { 0.0 },
        })
    }
}

/// Linear-interpolation quantile of ascending `sorted`, which must be non-empty
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    sorted[lower] + (sorted[upper] - sorted[lower]) * (position - lower as f64)
}

/// `n` evenly spaced values from `start` to `end` inclusive; `[start]` when `n` is 1
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| if i == n - 1 { end } else { start + step * i as f64 }).collect()
        }
    }
}
