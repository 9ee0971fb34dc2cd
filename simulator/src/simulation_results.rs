use std::fs;
use std::path::{Path, PathBuf};
use chrono::Local;
use serde::Serialize;
use orebalance::types::MetalPrices;
use orebalance::utils::logging;
use orebalance::PlantConfig;
use crate::config::SimulatorError;

/// Root under which every scenario gets its own results directory
pub const RESULTS_ROOT: &str = "simulator/results";

/// Writes the JSON files of one scenario into `<root>/<scenario>/data/`.
#[derive(Debug, Clone)]
pub struct ResultWriter {
    scenario_dir: PathBuf,
}

impl ResultWriter {
    pub fn new(scenario: &str) -> Result<Self, SimulatorError> {
        Self::with_root(RESULTS_ROOT, scenario)
    }

    pub fn with_root(root: impl AsRef<Path>, scenario: &str) -> Result<Self, SimulatorError> {
        let scenario_dir = root.as_ref().join(scenario);
        fs::create_dir_all(scenario_dir.join("data"))?;
        Ok(Self { scenario_dir })
    }

    pub fn scenario_dir(&self) -> &Path {
        &self.scenario_dir
    }

    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.scenario_dir.join("data").join(file_name)
    }

    /// Serializes `value` as pretty JSON into `data/<file_name>`
    pub fn save<T: Serialize + ?Sized>(&self, file_name: &str, value: &T) -> Result<PathBuf, SimulatorError> {
        let path = self.data_path(file_name);
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        logging::log("SIMULATOR", &format!("Saved {}", path.display()));
        Ok(path)
    }

    /// Records the inputs a scenario ran with next to its results
    pub fn save_metadata(&self, scenario: &str, plant: &PlantConfig, prices: &MetalPrices) -> Result<PathBuf, SimulatorError> {
        let metadata = serde_json::json!({
            "scenario": scenario,
            "generated_at": Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            "plant": plant,
            "prices": prices,
        });
        self.save("metadata.json", &metadata)
    }
}
