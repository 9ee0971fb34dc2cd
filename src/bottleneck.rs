use crate::types::{
    Bottleneck, LimitingStage, OxideStages, PlantDesign, ProcessType, ReferenceThroughput, SulphideStages,
};

/// Flags the stages that hold back each circuit that ran.
///
/// Oxide yields at most one entry, sulphide up to two (grinding and
/// flotation), evaluated independently.
pub fn detect_bottlenecks(
    oxide: Option<&OxideStages>,
    sulphide: Option<&SulphideStages>,
    design: &PlantDesign,
) -> Vec<Bottleneck> {
    let mut bottlenecks = Vec::new();
    if let Some(oxide) = oxide {
        bottlenecks.extend(oxide_bottleneck(oxide, design));
    }
    if let Some(sulphide) = sulphide {
        bottlenecks.extend(sulphide_bottlenecks(sulphide, design));
    }
    for bottleneck in &bottlenecks {
        tracing::debug!(
            process = %bottleneck.process,
            stage = %bottleneck.stage,
            loss_percent = bottleneck.efficiency_loss_percent,
            "bottleneck detected"
        );
    }
    bottlenecks
}

fn oxide_bottleneck(oxide: &OxideStages, design: &PlantDesign) -> Option<Bottleneck> {
    let candidates = [
        (LimitingStage::Sizing, oxide.sizing.mass),
        (LimitingStage::Grinding, oxide.grinding.mass),
        (LimitingStage::Leaching, oxide.leaching.mass),
    ];
    // Ties keep the earliest stage
    let (stage, limiting) = candidates
        .into_iter()
        .reduce(|best, next| if next.1 < best.1 { next } else { best })?;

    let feed = oxide.feed.mass;
    (limiting < feed * design.oxide_bottleneck_ratio)
        .then(|| Bottleneck::new(ProcessType::Oxide, stage, limiting, ReferenceThroughput::FeedRate(feed)))
}

fn sulphide_bottlenecks(sulphide: &SulphideStages, design: &PlantDesign) -> Vec<Bottleneck> {
    let mut found = Vec::new();
    let crushed = sulphide.crushing.mass;
    let ground = sulphide.grinding.mass;

    if ground < crushed * design.grinding_bottleneck_ratio {
        found.push(Bottleneck::new(
            ProcessType::Sulphide,
            LimitingStage::Grinding,
            ground,
            ReferenceThroughput::UpstreamCapacity(crushed),
        ));
    }

    let concentrate = sulphide.concentrate_mass();
    if concentrate < ground * design.expected_concentrate_yield {
        found.push(Bottleneck::new(
            ProcessType::Sulphide,
            LimitingStage::Flotation,
            concentrate,
            ReferenceThroughput::UpstreamCapacity(ground),
        ));
    }
    found
}
