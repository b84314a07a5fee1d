//! Order stage

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::pool::CandidatePool;
use super::report::{Stage, StageReport};
use crate::graph::{EdgeType, GraphBackend, Label, NodeSelector, PropertyMap};
use crate::schema::{labels, rels, EntityKind, OrderStatus};
use rand::Rng;
use tracing::{info, warn};

/// Create `count` orders.
///
/// Each order is placed by one uniformly sampled customer and contains
/// between 1 and `max_products` distinct products sampled without
/// replacement. Endpoints are resolved by their `id`, so every edge points at
/// a node that exists in the store.
pub fn generate_orders<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
    customers: &CandidatePool,
    products: &CandidatePool,
    max_products: usize,
) -> GenerationResult<StageReport> {
    let upper = max_products.clamp(1, products.len());
    if upper < max_products {
        warn!(
            max_products,
            available = products.len(),
            "fewer products than the per-order bound; capping"
        );
    }

    let label = [Label::new(labels::ORDER)];
    let placed = EdgeType::new(rels::PLACED);
    let contains = EdgeType::new(rels::CONTAINS);
    let mut report = StageReport::new(Stage::Orders);

    for _ in 0..count {
        let customer = customers.choose(ctx.rng);
        let amount = ctx.rng.gen_range(1..=upper);
        let basket = products.choose_distinct(ctx.rng, amount);

        let id = ctx.next_id(EntityKind::Order);
        let properties = props([
            ("id", id.into()),
            ("date", ctx.timestamp_this_year()),
            ("status", OrderStatus::sample(ctx.rng).as_str().into()),
        ]);
        let order = NodeSelector::Ref(ctx.backend.create_node(&label, properties)?);
        report.nodes_created += 1;

        ctx.backend.create_edge(
            &NodeSelector::by_key(labels::CUSTOMER, "id", customer.key.as_str()),
            &order,
            &placed,
            PropertyMap::new(),
        )?;
        report.edges_created += 1;

        for product in basket {
            ctx.backend.create_edge(
                &order,
                &NodeSelector::by_key(labels::PRODUCT, "id", product.key.as_str()),
                &contains,
                PropertyMap::new(),
            )?;
            report.edges_created += 1;
        }
    }

    info!(
        orders = report.nodes_created,
        line_items = report.edges_created - report.nodes_created,
        "generated orders"
    );
    Ok(report)
}
