//! Category and Product stage

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::ids::money;
use super::pool::{Candidate, CandidatePool};
use super::report::{Stage, StageReport};
use crate::graph::{EdgeType, GraphBackend, Label, NodeSelector, PropertyMap};
use crate::schema::{labels, rels, EntityKind};
use rand::Rng;
use tracing::{debug, info};

const DESCRIPTION_MAX_CHARS: usize = 200;

/// Create-if-absent every category in `names`.
///
/// Returns the categories as a pool keyed by name, ready for product
/// assignment. Categories that already exist are reused and not counted in
/// the report.
pub fn ensure_categories<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    names: &[String],
) -> GenerationResult<(CandidatePool, StageReport)> {
    let label = Label::new(labels::CATEGORY);
    let mut report = StageReport::new(Stage::Categories);
    let mut members = Vec::with_capacity(names.len());

    for name in names {
        let outcome = ctx
            .backend
            .merge_node(&label, "name", name.as_str().into(), PropertyMap::new())?;
        if outcome.created {
            report.nodes_created += 1;
        } else {
            debug!(category = %name, "category already present");
        }
        // A name listed twice resolves to the same node both times
        if !members.iter().any(|c: &Candidate| c.node == outcome.node) {
            members.push(Candidate {
                node: outcome.node,
                key: name.clone(),
            });
        }
    }

    info!(
        categories = members.len(),
        created = report.nodes_created,
        "categories ready"
    );
    Ok((CandidatePool::new(label, members)?, report))
}

/// Create `count` products, each linked to one uniformly chosen category
pub fn generate_products<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
    categories: &CandidatePool,
) -> GenerationResult<StageReport> {
    let label = [Label::new(labels::PRODUCT)];
    let belongs_to = EdgeType::new(rels::BELONGS_TO);
    let mut report = StageReport::new(Stage::Products);

    for _ in 0..count {
        let category = categories.choose(ctx.rng).node;
        let id = ctx.next_id(EntityKind::Product);
        let properties = props([
            ("id", id.into()),
            ("name", ctx.faker.product_name(ctx.rng).into()),
            ("price", money(ctx.rng, 10.0, 1000.0).into()),
            ("description", ctx.faker.text(ctx.rng, DESCRIPTION_MAX_CHARS).into()),
            ("stock", ctx.rng.gen_range(0..=100i64).into()),
        ]);
        let product = ctx.backend.create_node(&label, properties)?;
        report.nodes_created += 1;

        ctx.backend.create_edge(
            &NodeSelector::Ref(product),
            &NodeSelector::Ref(category),
            &belongs_to,
            PropertyMap::new(),
        )?;
        report.edges_created += 1;
    }

    info!(products = report.nodes_created, "generated products");
    Ok(report)
}
