/// Operating cost charged per unit of processed feed mass
pub const OPERATING_COST_PER_TONNE: f64 = 15.0;

/// Hours used to project hourly figures to a day
pub const HOURS_PER_DAY: f64 = 24.0;

/// Hours used to project hourly figures to a year
pub const HOURS_PER_YEAR: f64 = 24.0 * 365.0;

/// Base seed for randomized trials; trial `i` uses `DEFAULT_SEED + i`
pub const DEFAULT_SEED: u64 = 42;

/// Lower bound a perturbed feed grade is clamped to
pub const MIN_PERTURBED_GRADE: f64 = 0.001;
