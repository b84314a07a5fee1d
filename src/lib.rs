//! Shopgraph
//!
//! Synthesizes an internally consistent e-commerce / fraud-analytics dataset
//! inside a property graph: customers, products, orders, reviews,
//! transactions, devices, locations, suppliers and marketing campaigns,
//! connected by typed relationships.
//!
//! # Layout
//!
//! - [`graph`]: embedded append-only property graph and the [`GraphBackend`]
//!   capability the generator writes through
//! - [`schema`]: labels, relationship types and categorical attribute values
//! - [`generator`]: the staged, seeded dataset pipeline
//! - [`export`]: Cypher script and JSON snapshot writers
//!
//! ## Example Usage
//!
//! ```rust
//! use shopgraph::generator::{generate_dataset, GenerationCounts, GeneratorConfig};
//! use shopgraph::graph::{GraphStore, Label};
//!
//! let config = GeneratorConfig::default()
//!     .with_seed(7)
//!     .with_counts(GenerationCounts {
//!         customers: 10,
//!         products: 5,
//!         orders: 20,
//!         reviews: 5,
//!         transactions: 10,
//!         suppliers: 2,
//!         campaigns: 1,
//!     });
//!
//! let mut store = GraphStore::new();
//! let report = generate_dataset(&mut store, &config).unwrap();
//!
//! assert_eq!(report.seed, 7);
//! assert_eq!(store.get_nodes_by_label(&Label::new("Order")).len(), 20);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod export;
pub mod generator;
pub mod graph;
pub mod schema;

// Re-export main types for convenience
pub use graph::{
    BulkLink, Edge, EdgeId, EdgeType, GraphBackend, GraphError, GraphResult, GraphStatistics,
    GraphStore, Label, MergeOutcome, Node, NodeId, NodePattern, NodeSelector, PropertyMap,
    PropertyValue, Record,
};

pub use generator::{
    generate_dataset, CandidatePool, ConfigError, DatasetGenerator, EnglishFaker, FakeData,
    GenerationCounts, GenerationError, GenerationResult, GeneratorConfig, PipelineReport, Stage,
    StageReport,
};

pub use export::{ExportError, ExportResult, GraphSnapshot};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
