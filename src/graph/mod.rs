//! Embedded property graph
//!
//! This module implements the store side of the generator:
//! - Nodes with labels and properties, directed typed edges with properties
//! - An append-only in-memory store with label, edge-type and property indices
//! - The [`GraphBackend`] capability trait the generator writes through

pub mod backend;
pub mod edge;
pub mod node;
pub mod pattern;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use backend::{BulkLink, EdgePropertyFn, GraphBackend};
pub use edge::Edge;
pub use node::Node;
pub use pattern::{MergeOutcome, NodePattern, NodeSelector, Record};
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};
