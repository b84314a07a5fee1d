//! Supplier stage

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::report::{Stage, StageReport};
use crate::graph::{BulkLink, GraphBackend, Label, NodePattern};
use crate::schema::{labels, rels, EntityKind};
use tracing::info;

/// Create `count` suppliers, then link every (Supplier, Product) pair in the
/// store with probability `link_probability`
pub fn generate_suppliers<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
    link_probability: f64,
) -> GenerationResult<StageReport> {
    let label = [Label::new(labels::SUPPLIER)];
    let mut report = StageReport::new(Stage::Suppliers);

    for _ in 0..count {
        let id = ctx.next_id(EntityKind::Supplier);
        let properties = props([
            ("id", id.into()),
            ("name", ctx.faker.company(ctx.rng).into()),
            ("contact", ctx.faker.person_name(ctx.rng).into()),
            ("email", ctx.faker.company_email(ctx.rng).into()),
            ("address", ctx.faker.address(ctx.rng).into()),
        ]);
        ctx.backend.create_node(&label, properties)?;
        report.nodes_created += 1;
    }

    let mut link = BulkLink::new(rels::SUPPLIES, link_probability);
    report.edges_created = ctx.backend.bulk_link(
        &NodePattern::label(labels::SUPPLIER),
        &NodePattern::label(labels::PRODUCT),
        &mut link,
        ctx.rng,
    )?;

    info!(
        suppliers = report.nodes_created,
        supplies = report.edges_created,
        "generated suppliers"
    );
    Ok(report)
}
