use serde::{Deserialize, Serialize};
use super::{Metal, MetalAmounts};

/// Unit price of each metal, per unit of recovered metal mass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetalPrices(pub MetalAmounts);

impl MetalPrices {
    pub fn price(&self, metal: Metal) -> f64 {
        self.0.get(metal)
    }

    /// Copy with every price multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        MetalPrices(self.0.scale(factor))
    }
}

impl Default for MetalPrices {
    fn default() -> Self {
        MetalPrices(MetalAmounts::new(8.5, 32000.0, 28000.0, 65000.0, 18.0, 35.0))
    }
}
