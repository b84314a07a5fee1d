use shopgraph::generator::{GenerationCounts, GeneratorConfig};
use shopgraph::graph::{BulkLink, EdgeType, GraphBackend, GraphStore, Label, NodePattern, PropertyMap};
use shopgraph::schema::{labels, rels};
use shopgraph::{generate_dataset, Stage};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn populate(store: &mut GraphStore, label: &str, n: usize) {
    for _ in 0..n {
        store
            .create_node(&[Label::new(label)], PropertyMap::new())
            .unwrap();
    }
}

#[test]
fn test_supplies_density_matches_probability() {
    // 50 x 100 pairs at p = 0.2: mean 1000, standard deviation ~28.3
    let mut store = GraphStore::new();
    populate(&mut store, labels::SUPPLIER, 50);
    populate(&mut store, labels::PRODUCT, 100);

    let mut rng = StdRng::seed_from_u64(20240601);
    let created = store
        .bulk_link(
            &NodePattern::label(labels::SUPPLIER),
            &NodePattern::label(labels::PRODUCT),
            &mut BulkLink::new(rels::SUPPLIES, 0.2),
            &mut rng,
        )
        .unwrap();

    assert!((850..=1150).contains(&created), "created {} edges", created);
    assert_eq!(
        store.get_edges_by_type(&EdgeType::new(rels::SUPPLIES)).len(),
        created
    );
}

#[test]
fn test_pipeline_supplier_stage_density() {
    let config = GeneratorConfig {
        supplier_link_probability: 0.2,
        ..GeneratorConfig::default()
    }
    .with_seed(31)
    .with_counts(GenerationCounts {
        customers: 0,
        products: 100,
        orders: 0,
        reviews: 0,
        transactions: 0,
        suppliers: 50,
        campaigns: 0,
    });

    let mut store = GraphStore::new();
    let report = generate_dataset(&mut store, &config).unwrap();
    let supplies = report
        .stage(Stage::Suppliers)
        .map(|r| r.edges_created)
        .unwrap_or(0);
    assert!((850..=1150).contains(&supplies), "created {} edges", supplies);

    // Direction is always Supplier -> Product, each pair at most once
    let mut pairs = std::collections::HashSet::new();
    for edge in store.get_edges_by_type(&EdgeType::new(rels::SUPPLIES)) {
        let source = store.get_node(edge.source).unwrap();
        let target = store.get_node(edge.target).unwrap();
        assert!(source.has_label(&Label::new(labels::SUPPLIER)));
        assert!(target.has_label(&Label::new(labels::PRODUCT)));
        assert!(pairs.insert((edge.source, edge.target)));
    }
}

#[test]
fn test_engagement_probability_extremes() {
    let run = |p: f64| {
        let config = GeneratorConfig {
            engagement_probability: p,
            ..GeneratorConfig::default()
        }
        .with_seed(4)
        .with_counts(GenerationCounts {
            customers: 12,
            products: 0,
            orders: 0,
            reviews: 0,
            transactions: 0,
            suppliers: 0,
            campaigns: 3,
        });
        let mut store = GraphStore::new();
        generate_dataset(&mut store, &config).unwrap();
        store
            .get_edges_by_type(&EdgeType::new(rels::ENGAGED_WITH))
            .len()
    };

    assert_eq!(run(0.0), 0);
    assert_eq!(run(1.0), 36);
}
