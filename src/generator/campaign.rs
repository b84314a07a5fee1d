//! Marketing campaign stage

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::ids::money;
use super::report::{Stage, StageReport};
use crate::graph::{BulkLink, GraphBackend, Label, NodePattern, PropertyValue};
use crate::schema::{labels, rels, CampaignStatus, CampaignType, EntityKind};
use rand::Rng;
use tracing::info;

/// Create `count` campaigns, then let every (Customer, Campaign) pair engage
/// with probability `engagement_probability`.
///
/// Each engagement edge carries an `engagement_score` in `[0, 1)` and the
/// generation timestamp as `date`.
pub fn generate_campaigns<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
    engagement_probability: f64,
) -> GenerationResult<StageReport> {
    let label = [Label::new(labels::CAMPAIGN)];
    let mut report = StageReport::new(Stage::Campaigns);

    for _ in 0..count {
        let id = ctx.next_id(EntityKind::Campaign);
        let name = format!("Campaign {}", ctx.faker.word(ctx.rng));
        let properties = props([
            ("id", id.into()),
            ("name", name.into()),
            ("type", CampaignType::sample(ctx.rng).as_str().into()),
            ("start_date", ctx.timestamp_this_year()),
            ("budget", money(ctx.rng, 1000.0, 10000.0).into()),
            ("status", CampaignStatus::sample(ctx.rng).as_str().into()),
        ]);
        ctx.backend.create_node(&label, properties)?;
        report.nodes_created += 1;
    }

    let now = PropertyValue::from(ctx.faker.now());
    let mut link = BulkLink::new(rels::ENGAGED_WITH, engagement_probability).with_properties(
        move |rng| {
            props([
                ("engagement_score", rng.gen::<f64>().into()),
                ("date", now.clone()),
            ])
        },
    );
    report.edges_created = ctx.backend.bulk_link(
        &NodePattern::label(labels::CUSTOMER),
        &NodePattern::label(labels::CAMPAIGN),
        &mut link,
        ctx.rng,
    )?;

    info!(
        campaigns = report.nodes_created,
        engagements = report.edges_created,
        "generated campaigns"
    );
    Ok(report)
}
