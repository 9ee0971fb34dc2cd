pub mod metal;
pub mod feed;
pub mod params;
pub mod design;
pub mod stage;
pub mod warning;
pub mod bottleneck;
pub mod result;
pub mod prices;
pub mod constants;

pub use metal::{Metal, MetalAmounts};
pub use feed::{ActiveCircuits, FeedComposition};
pub use params::{Parameter, ParameterFamily, ProcessParameters};
pub use design::{PlantDesign, StagePolicy};
pub use stage::{ProcessType, StageName, StageResult};
pub use warning::{FlowWarning, Severity};
pub use bottleneck::{Bottleneck, LimitingStage, ReferenceThroughput};
pub use result::{ConcentrateStreams, OxideStages, SimulationResult, SulphideStages};
pub use prices::MetalPrices;
