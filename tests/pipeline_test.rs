use shopgraph::generator::{
    ensure_categories, generate_orders, CandidatePool, EnglishFaker, GenContext,
    GenerationCounts, GenerationError, GeneratorConfig,
};
use shopgraph::graph::{EdgeType, GraphStore, Label};
use shopgraph::schema::{labels, rels};
use shopgraph::{generate_dataset, DatasetGenerator, Stage};
use chrono::{TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn counts(
    customers: usize,
    products: usize,
    orders: usize,
    reviews: usize,
    transactions: usize,
) -> GenerationCounts {
    GenerationCounts {
        customers,
        products,
        orders,
        reviews,
        transactions,
        suppliers: 0,
        campaigns: 0,
    }
}

fn ids_of(store: &GraphStore, label: &str) -> HashSet<String> {
    store
        .get_nodes_by_label(&Label::new(label))
        .iter()
        .filter_map(|n| n.get_str("id").map(str::to_string))
        .collect()
}

fn target_label(store: &GraphStore, node: shopgraph::NodeId) -> String {
    store
        .get_node(node)
        .and_then(|n| n.primary_label())
        .map(|l| l.to_string())
        .unwrap_or_default()
}

#[test]
fn test_default_pipeline_integrity() {
    let config = GeneratorConfig::default().with_seed(2024);
    let mut store = GraphStore::new();
    let report = generate_dataset(&mut store, &config).unwrap();

    let stats = store.statistics();
    assert_eq!(stats.label_counts.get(labels::CUSTOMER), Some(&100));
    assert_eq!(stats.label_counts.get(labels::CATEGORY), Some(&5));
    assert_eq!(stats.label_counts.get(labels::PRODUCT), Some(&50));
    assert_eq!(stats.label_counts.get(labels::ORDER), Some(&200));
    assert_eq!(stats.label_counts.get(labels::REVIEW), Some(&150));
    assert_eq!(stats.label_counts.get(labels::TRANSACTION), Some(&300));
    assert_eq!(stats.label_counts.get(labels::LOCATION), Some(&300));
    assert_eq!(stats.label_counts.get(labels::SUPPLIER), Some(&10));
    assert_eq!(stats.label_counts.get(labels::CAMPAIGN), Some(&5));

    // 300 transactions with ratio 0.2 draw a pool of 60 devices
    let devices = stats.label_counts.get(labels::DEVICE).copied().unwrap_or(0);
    assert!(devices >= 1 && devices <= 60);

    assert_eq!(report.total_nodes(), stats.node_count);
    assert_eq!(report.total_edges(), stats.edge_count);

    // Every product belongs to exactly one category created before it
    for product in store.get_nodes_by_label(&Label::new(labels::PRODUCT)) {
        let belongs: Vec<_> = store
            .get_outgoing_edges(product.id)
            .into_iter()
            .filter(|e| e.edge_type.as_str() == rels::BELONGS_TO)
            .collect();
        assert_eq!(belongs.len(), 1);
        assert_eq!(target_label(&store, belongs[0].target), labels::CATEGORY);
        assert!(belongs[0].target < product.id);
    }

    // Every order: one placer, 1..=5 distinct products
    for order in store.get_nodes_by_label(&Label::new(labels::ORDER)) {
        let placed = store.get_incoming_edges(order.id);
        assert_eq!(placed.len(), 1);
        assert_eq!(target_label(&store, placed[0].source), labels::CUSTOMER);

        let products: Vec<_> = store
            .get_outgoing_edges(order.id)
            .iter()
            .map(|e| e.target)
            .collect();
        let distinct: HashSet<_> = products.iter().copied().collect();
        assert!((1..=5).contains(&products.len()));
        assert_eq!(distinct.len(), products.len());
    }

    // Every transaction: MADE in, USES and FROM out
    for tx in store.get_nodes_by_label(&Label::new(labels::TRANSACTION)) {
        let incoming = store.get_incoming_edges(tx.id);
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].edge_type.as_str(), rels::MADE);

        let mut out: Vec<_> = store
            .get_outgoing_edges(tx.id)
            .iter()
            .map(|e| (e.edge_type.to_string(), target_label(&store, e.target)))
            .collect();
        out.sort();
        assert_eq!(
            out,
            vec![
                (rels::FROM.to_string(), labels::LOCATION.to_string()),
                (rels::USES.to_string(), labels::DEVICE.to_string()),
            ]
        );
    }

    // Locations are never shared
    for location in store.get_nodes_by_label(&Label::new(labels::LOCATION)) {
        assert_eq!(store.get_incoming_edges(location.id).len(), 1);
    }

    // Generated identifiers are unique within their label
    assert_eq!(ids_of(&store, labels::CUSTOMER).len(), 100);
    assert_eq!(ids_of(&store, labels::ORDER).len(), 200);
}

#[test]
fn test_orders_only_reference_generated_entities() {
    let config = GeneratorConfig::default()
        .with_seed(5)
        .with_counts(counts(10, 5, 20, 0, 0));
    let mut store = GraphStore::new();
    generate_dataset(&mut store, &config).unwrap();

    let customers = ids_of(&store, labels::CUSTOMER);
    let products = ids_of(&store, labels::PRODUCT);
    assert_eq!(customers.len(), 10);
    assert_eq!(products.len(), 5);

    let orders = store.get_nodes_by_label(&Label::new(labels::ORDER));
    assert_eq!(orders.len(), 20);
    for order in orders {
        for edge in store.get_incoming_edges(order.id) {
            let id = store.get_node(edge.source).and_then(|n| n.get_str("id")).unwrap();
            assert!(customers.contains(id));
        }
        for edge in store.get_outgoing_edges(order.id) {
            let id = store.get_node(edge.target).and_then(|n| n.get_str("id")).unwrap();
            assert!(products.contains(id));
        }
    }
}

#[test]
fn test_orders_without_customers_fail_before_creating_orders() {
    let config = GeneratorConfig::default()
        .with_seed(5)
        .with_counts(counts(0, 5, 3, 0, 0));
    let mut store = GraphStore::new();

    let err = generate_dataset(&mut store, &config).unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCandidatePool { .. }));
    assert!(err.to_string().contains(labels::CUSTOMER));
    assert!(store.get_nodes_by_label(&Label::new(labels::ORDER)).is_empty());
    // Earlier stages are not rolled back
    assert_eq!(store.get_nodes_by_label(&Label::new(labels::PRODUCT)).len(), 5);
}

#[test]
fn test_reviews_without_customers_fail_before_creating_reviews() {
    let config = GeneratorConfig::default()
        .with_seed(6)
        .with_counts(counts(0, 5, 0, 3, 0));
    let mut store = GraphStore::new();

    let err = generate_dataset(&mut store, &config).unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCandidatePool { .. }));
    assert!(err.to_string().contains(labels::CUSTOMER));
    assert!(store.get_nodes_by_label(&Label::new(labels::REVIEW)).is_empty());
    assert!(store.get_edges_by_type(&EdgeType::new(rels::WROTE)).is_empty());
    assert_eq!(store.get_nodes_by_label(&Label::new(labels::PRODUCT)).len(), 5);
}

#[test]
fn test_reviews_without_products_fail_before_creating_reviews() {
    let config = GeneratorConfig::default()
        .with_seed(6)
        .with_counts(counts(4, 0, 0, 3, 0));
    let mut store = GraphStore::new();

    let err = generate_dataset(&mut store, &config).unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCandidatePool { .. }));
    assert!(err.to_string().contains(labels::PRODUCT));
    assert!(store.get_nodes_by_label(&Label::new(labels::REVIEW)).is_empty());
    assert_eq!(store.get_nodes_by_label(&Label::new(labels::CUSTOMER)).len(), 4);
}

#[test]
fn test_transactions_without_customers_fail_before_creating_transactions() {
    let config = GeneratorConfig::default()
        .with_seed(7)
        .with_counts(counts(0, 5, 0, 0, 4));
    let mut store = GraphStore::new();

    let err = generate_dataset(&mut store, &config).unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCandidatePool { .. }));
    assert!(err.to_string().contains(labels::CUSTOMER));
    for label in [
        labels::REVIEW,
        labels::TRANSACTION,
        labels::DEVICE,
        labels::LOCATION,
    ] {
        assert!(
            store.get_nodes_by_label(&Label::new(label)).is_empty(),
            "{} nodes were created",
            label
        );
    }
    assert!(store.get_edges_by_type(&EdgeType::new(rels::MADE)).is_empty());
}

#[test]
fn test_order_stage_with_explicit_empty_pool() {
    let store = GraphStore::new();
    let err = CandidatePool::load(&store, labels::PRODUCT, "id").unwrap_err();
    assert!(matches!(err, GenerationError::EmptyCandidatePool { .. }));
}

#[test]
fn test_category_creation_twice_creates_no_duplicates() {
    let mut store = GraphStore::new();
    let mut rng = StdRng::seed_from_u64(1);
    let faker = EnglishFaker::new();
    let names: Vec<String> = ["Electronics", "Clothing", "Books", "Home", "Sports"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    {
        let mut ctx = GenContext::new(&mut store, &mut rng, &faker);
        ensure_categories(&mut ctx, &names).unwrap();
        let (_, second) = ensure_categories(&mut ctx, &names).unwrap();
        assert_eq!(second.nodes_created, 0);
    }

    assert_eq!(store.get_nodes_by_label(&Label::new(labels::CATEGORY)).len(), 5);

    // A second full run into the same store reuses the categories
    let config = GeneratorConfig::default()
        .with_seed(3)
        .with_counts(counts(1, 1, 0, 0, 0));
    let report = generate_dataset(&mut store, &config).unwrap();
    assert_eq!(report.stage(Stage::Categories).map(|r| r.nodes_created), Some(0));
    assert_eq!(store.get_nodes_by_label(&Label::new(labels::CATEGORY)).len(), 5);
}

#[test]
fn test_stage_functions_compose() {
    let mut store = GraphStore::new();
    let config = GeneratorConfig::default()
        .with_seed(8)
        .with_counts(counts(4, 3, 0, 0, 0));
    generate_dataset(&mut store, &config).unwrap();

    let customers = CandidatePool::load(&store, labels::CUSTOMER, "id").unwrap();
    let products = CandidatePool::load(&store, labels::PRODUCT, "id").unwrap();
    let mut rng = StdRng::seed_from_u64(9);
    let faker = EnglishFaker::new();
    let mut ctx = GenContext::new(&mut store, &mut rng, &faker);

    let report = generate_orders(&mut ctx, 6, &customers, &products, 2).unwrap();
    assert_eq!(report.nodes_created, 6);
    for order in store.get_nodes_by_label(&Label::new(labels::ORDER)) {
        assert!((1..=2).contains(&store.get_outgoing_edges(order.id).len()));
    }
}

#[test]
fn test_same_seed_same_dataset() {
    let anchor = Utc.with_ymd_and_hms(2026, 9, 30, 23, 59, 59).unwrap();
    let config = GeneratorConfig::default()
        .with_seed(77)
        .with_counts(GenerationCounts {
            customers: 20,
            products: 10,
            orders: 30,
            reviews: 15,
            transactions: 25,
            suppliers: 4,
            campaigns: 3,
        });

    let snapshot = || {
        let generator =
            DatasetGenerator::with_faker(config.clone(), EnglishFaker::anchored_at(anchor)).unwrap();
        let mut store = GraphStore::new();
        let report = generator.run(&mut store).unwrap();
        let nodes: Vec<_> = store
            .nodes()
            .iter()
            .map(|n| (n.labels.clone(), n.properties.clone()))
            .collect();
        let edges: Vec<_> = store
            .edges()
            .iter()
            .map(|e| (e.source, e.target, e.edge_type.clone(), e.properties.clone()))
            .collect();
        (report, nodes, edges)
    };

    let (report_a, nodes_a, edges_a) = snapshot();
    let (report_b, nodes_b, edges_b) = snapshot();
    assert_eq!(report_a, report_b);
    assert_eq!(nodes_a, nodes_b);
    assert_eq!(edges_a, edges_b);

    // All timestamps fall between the start of the anchor's year and the anchor
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap().timestamp_millis();
    for (_, properties) in &nodes_a {
        for value in properties.values() {
            if let Some(ms) = value.as_datetime() {
                assert!(ms >= start && ms <= anchor.timestamp_millis());
            }
        }
    }
}

#[test]
fn test_stored_records_do_not_depend_on_wall_clock() {
    let anchor = Utc.with_ymd_and_hms(2026, 6, 1, 8, 0, 0).unwrap();
    let config = GeneratorConfig::default()
        .with_seed(91)
        .with_counts(counts(3, 2, 2, 1, 2));

    let records = || {
        let generator =
            DatasetGenerator::with_faker(config.clone(), EnglishFaker::anchored_at(anchor)).unwrap();
        let mut store = GraphStore::new();
        generator.run(&mut store).unwrap();
        (
            serde_json::to_value(store.nodes()).unwrap(),
            serde_json::to_value(store.edges()).unwrap(),
        )
    };

    let first = records();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = records();
    assert_eq!(first, second);
}

#[test]
fn test_different_seeds_differ() {
    let run = |seed| {
        let config = GeneratorConfig::default()
            .with_seed(seed)
            .with_counts(counts(5, 0, 0, 0, 0));
        let mut store = GraphStore::new();
        generate_dataset(&mut store, &config).unwrap();
        ids_of(&store, labels::CUSTOMER)
    };
    assert_ne!(run(1), run(2));
}
