pub mod types;
pub mod config;
pub mod flow;
pub mod circuits;
pub mod bottleneck;
pub mod plant;
pub mod valuation;
pub mod scenario;
pub mod utils;

pub use config::{ConfigError, PlantConfig};
pub use plant::{run_simulation, simulate};
pub use valuation::compute_revenue;
pub use scenario::ScenarioError;
