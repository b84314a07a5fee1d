//! Customer stage

use super::context::{props, GenContext};
use super::error::GenerationResult;
use super::ids::risk_score;
use super::report::{Stage, StageReport};
use crate::graph::{GraphBackend, Label};
use crate::schema::{labels, EntityKind, Segment};
use tracing::info;

/// Create `count` Customer nodes with independently sampled attributes
pub fn generate_customers<B: GraphBackend + ?Sized>(
    ctx: &mut GenContext<'_, B>,
    count: usize,
) -> GenerationResult<StageReport> {
    let label = [Label::new(labels::CUSTOMER)];
    let mut report = StageReport::new(Stage::Customers);

    for _ in 0..count {
        let id = ctx.next_id(EntityKind::Customer);
        let properties = props([
            ("id", id.into()),
            ("name", ctx.faker.person_name(ctx.rng).into()),
            ("email", ctx.faker.email(ctx.rng).into()),
            ("phone", ctx.faker.phone_number(ctx.rng).into()),
            ("address", ctx.faker.address(ctx.rng).into()),
            ("created_at", ctx.timestamp_this_year()),
            ("risk_score", risk_score(ctx.rng).into()),
            ("segment", Segment::sample(ctx.rng).as_str().into()),
        ]);
        ctx.backend.create_node(&label, properties)?;
        report.nodes_created += 1;
    }

    info!(customers = report.nodes_created, "generated customers");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::faker::EnglishFaker;
    use crate::graph::GraphStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_generates_requested_customers() {
        let mut store = GraphStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let faker = EnglishFaker::new();
        let mut ctx = GenContext::new(&mut store, &mut rng, &faker);

        let report = generate_customers(&mut ctx, 25).unwrap();
        assert_eq!(report.nodes_created, 25);
        assert_eq!(report.edges_created, 0);

        let customers = store.get_nodes_by_label(&Label::new(labels::CUSTOMER));
        assert_eq!(customers.len(), 25);

        let ids: HashSet<_> = customers.iter().filter_map(|c| c.get_str("id")).collect();
        assert_eq!(ids.len(), 25);

        for customer in customers {
            assert!(customer.get_str("id").unwrap().starts_with('C'));
            let score = customer.get_property("risk_score").and_then(|v| v.as_float()).unwrap();
            assert!((0.0..=1.0).contains(&score));
            let segment = customer.get_str("segment").unwrap();
            assert!(Segment::ALL.iter().any(|s| s.as_str() == segment));
            assert!(customer.get_property("created_at").and_then(|v| v.as_datetime()).is_some());
        }
    }

    #[test]
    fn test_zero_customers_is_a_no_op() {
        let mut store = GraphStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let faker = EnglishFaker::new();
        let mut ctx = GenContext::new(&mut store, &mut rng, &faker);

        assert_eq!(generate_customers(&mut ctx, 0).unwrap().nodes_created, 0);
        assert_eq!(store.node_count(), 0);
    }
}
