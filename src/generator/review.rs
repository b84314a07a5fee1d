//! Review stage

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::pool::CandidatePool;
use super::report::{Stage, StageReport};
use crate::graph::{EdgeType, GraphBackend, Label, NodeSelector, PropertyMap};
use crate::schema::{labels, rels, EntityKind};
use rand::Rng;
use tracing::info;

const TEXT_MAX_CHARS: usize = 200;

/// Create `count` reviews, each written by one sampled customer about one
/// sampled product. The same customer may review a product more than once.
pub fn generate_reviews<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
    customers: &CandidatePool,
    products: &CandidatePool,
) -> GenerationResult<StageReport> {
    let label = [Label::new(labels::REVIEW)];
    let wrote = EdgeType::new(rels::WROTE);
    let about = EdgeType::new(rels::ABOUT);
    let mut report = StageReport::new(Stage::Reviews);

    for _ in 0..count {
        let customer = customers.choose(ctx.rng);
        let product = products.choose(ctx.rng);

        let id = ctx.next_id(EntityKind::Review);
        let properties = props([
            ("id", id.into()),
            ("rating", ctx.rng.gen_range(1..=5i64).into()),
            ("text", ctx.faker.text(ctx.rng, TEXT_MAX_CHARS).into()),
            ("date", ctx.timestamp_this_year()),
        ]);
        let review = NodeSelector::Ref(ctx.backend.create_node(&label, properties)?);
        report.nodes_created += 1;

        ctx.backend.create_edge(
            &NodeSelector::by_key(labels::CUSTOMER, "id", customer.key.as_str()),
            &review,
            &wrote,
            PropertyMap::new(),
        )?;
        ctx.backend.create_edge(
            &review,
            &NodeSelector::by_key(labels::PRODUCT, "id", product.key.as_str()),
            &about,
            PropertyMap::new(),
        )?;
        report.edges_created += 2;
    }

    info!(reviews = report.nodes_created, "generated reviews");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::faker::EnglishFaker;
    use crate::generator::pool::Candidate;
    use crate::graph::GraphStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_review_edges_and_rating() {
        let mut store = GraphStore::new();
        let mut members = |label: &str, ids: &[&str]| {
            ids.iter()
                .map(|id| {
                    let node = store
                        .create_node(&[Label::new(label)], props([("id", (*id).into())]))
                        .unwrap();
                    Candidate {
                        node,
                        key: id.to_string(),
                    }
                })
                .collect::<Vec<_>>()
        };
        let customers =
            CandidatePool::new(labels::CUSTOMER, members(labels::CUSTOMER, &["C1", "C2"])).unwrap();
        let products =
            CandidatePool::new(labels::PRODUCT, members(labels::PRODUCT, &["P1"])).unwrap();

        let mut rng = StdRng::seed_from_u64(4);
        let faker = EnglishFaker::new();
        let mut ctx = GenContext::new(&mut store, &mut rng, &faker);
        let report = generate_reviews(&mut ctx, 12, &customers, &products).unwrap();
        assert_eq!(report.nodes_created, 12);
        assert_eq!(report.edges_created, 24);

        for review in store.get_nodes_by_label(&Label::new(labels::REVIEW)) {
            let rating = review.get_property("rating").and_then(|v| v.as_integer()).unwrap();
            assert!((1..=5).contains(&rating));

            let writer = store.get_incoming_edges(review.id);
            assert_eq!(writer.len(), 1);
            assert_eq!(writer[0].edge_type.as_str(), rels::WROTE);

            let subject = store.get_outgoing_edges(review.id);
            assert_eq!(subject.len(), 1);
            assert_eq!(store.get_node(subject[0].target).unwrap().get_str("id"), Some("P1"));
        }
    }
}
