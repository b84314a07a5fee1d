//! In-memory, append-only graph storage
//!
//! Nodes and edges live in dense arenas indexed by their handles. Three
//! indices sit on top:
//! - label index: Label -> node handles, in creation order
//! - edge type index: EdgeType -> edge handles, in creation order
//! - property index: (Label, key) -> value -> node handles, built on the
//!   first keyed lookup of that pair and maintained on every insert after

use super::backend::{BulkLink, GraphBackend};
use super::edge::Edge;
use super::node::Node;
use super::pattern::{MergeOutcome, NodePattern, NodeSelector, Record};
use super::property::{IndexKey, PropertyMap, PropertyValue};
use super::types::{EdgeId, EdgeType, Label, NodeId};
use indexmap::IndexMap;
use rand::{Rng, RngCore};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("No {label} node with {key} = {value}")]
    NoMatchingNode {
        label: Label,
        key: String,
        value: String,
    },

    #[error("{count} {label} nodes have {key} = {value}; expected exactly one")]
    AmbiguousMatch {
        label: Label,
        key: String,
        value: String,
        count: usize,
    },

    #[error("Property {key} of type {type_name} cannot be used as a lookup key")]
    UnindexableKey { key: String, type_name: &'static str },

    #[error("Link probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("A node needs at least one label")]
    MissingLabel,
}

pub type GraphResult<T> = Result<T, GraphError>;

type PropertyIndex = HashMap<IndexKey, Vec<NodeId>>;

/// Node and edge totals broken down by label and relationship type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub label_counts: BTreeMap<String, usize>,
    pub edge_type_counts: BTreeMap<String, usize>,
}

/// In-memory graph storage
///
/// The store is append-only: it offers no way to update or delete a node or
/// edge once created, so every handle stays valid for the store's lifetime.
#[derive(Debug, Default)]
pub struct GraphStore {
    /// Node arena, `nodes[i].id == NodeId(i)`
    nodes: Vec<Node>,

    /// Edge arena, `edges[i].id == EdgeId(i)`
    edges: Vec<Edge>,

    /// Outgoing edges for each node (adjacency list)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each node (adjacency list)
    incoming: Vec<Vec<EdgeId>>,

    label_index: IndexMap<Label, Vec<NodeId>>,

    edge_type_index: IndexMap<EdgeType, Vec<EdgeId>>,

    /// Label -> property key -> value -> nodes
    property_index: HashMap<Label, HashMap<String, PropertyIndex>>,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::default()
    }

    fn insert_node(&mut self, labels: &[Label], properties: PropertyMap) -> GraphResult<NodeId> {
        if labels.is_empty() {
            return Err(GraphError::MissingLabel);
        }

        let node_id = NodeId::new(self.nodes.len() as u64);
        let node = Node::new(node_id, labels.iter().cloned(), properties);

        for label in &node.labels {
            self.label_index.entry(label.clone()).or_default().push(node_id);

            if let Some(by_key) = self.property_index.get_mut(label) {
                for (key, index) in by_key.iter_mut() {
                    if let Some(index_key) = node.get_property(key).and_then(IndexKey::from_value) {
                        index.entry(index_key).or_default().push(node_id);
                    }
                }
            }
        }

        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        Ok(node_id)
    }

    /// Build the (label, key) property index if it does not exist yet
    fn ensure_index(&mut self, label: &Label, key: &str) {
        let exists = self
            .property_index
            .get(label)
            .is_some_and(|by_key| by_key.contains_key(key));
        if exists {
            return;
        }

        let mut index = PropertyIndex::new();
        for node_id in self.label_index.get(label).into_iter().flatten() {
            let value = self.nodes[node_id.index()].get_property(key);
            if let Some(index_key) = value.and_then(IndexKey::from_value) {
                index.entry(index_key).or_default().push(*node_id);
            }
        }
        debug!(label = %label, key, entries = index.len(), "built property index");

        self.property_index
            .entry(label.clone())
            .or_default()
            .insert(key.to_string(), index);
    }

    /// Nodes with `label` whose `key` equals `value`, using the property index
    fn lookup(&mut self, label: &Label, key: &str, value: &PropertyValue) -> GraphResult<&[NodeId]> {
        let index_key = IndexKey::from_value(value).ok_or_else(|| GraphError::UnindexableKey {
            key: key.to_string(),
            type_name: value.type_name(),
        })?;
        self.ensure_index(label, key);

        Ok(self
            .property_index
            .get(label)
            .and_then(|by_key| by_key.get(key))
            .and_then(|index| index.get(&index_key))
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    fn resolve(&mut self, selector: &NodeSelector) -> GraphResult<NodeId> {
        match selector {
            NodeSelector::Ref(id) => {
                if self.has_node(*id) {
                    Ok(*id)
                } else {
                    Err(GraphError::NodeNotFound(*id))
                }
            }
            NodeSelector::Match { label, key, value } => match self.lookup(label, key, value)? {
                [single] => Ok(*single),
                [] => Err(GraphError::NoMatchingNode {
                    label: label.clone(),
                    key: key.clone(),
                    value: value.to_string(),
                }),
                many => Err(GraphError::AmbiguousMatch {
                    label: label.clone(),
                    key: key.clone(),
                    value: value.to_string(),
                    count: many.len(),
                }),
            },
        }
    }

    /// Create an edge between two node handles
    pub fn create_edge_between(
        &mut self,
        source: NodeId,
        target: NodeId,
        edge_type: impl Into<EdgeType>,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        // Validate nodes exist
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.edges.len() as u64);
        let edge = Edge::new(edge_id, source, target, edge_type, properties);

        self.outgoing[source.index()].push(edge_id);
        self.incoming[target.index()].push(edge_id);
        self.edge_type_index
            .entry(edge.edge_type.clone())
            .or_default()
            .push(edge_id);

        self.edges.push(edge);
        Ok(edge_id)
    }

    /// Get a node by handle
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Get an edge by handle
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.outgoing
            .get(node_id.index())
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.incoming
            .get(node_id.index())
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Get all nodes with a specific label, in creation order
    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        self.label_index
            .get(label)
            .map(|ids| ids.iter().filter_map(|id| self.get_node(*id)).collect())
            .unwrap_or_default()
    }

    /// Get all edges of a specific type, in creation order
    pub fn get_edges_by_type(&self, edge_type: &EdgeType) -> Vec<&Edge> {
        self.edge_type_index
            .get(edge_type)
            .map(|ids| ids.iter().filter_map(|id| self.get_edge(*id)).collect())
            .unwrap_or_default()
    }

    /// Nodes matching a label and property-equality pattern
    pub fn find_nodes(&self, pattern: &NodePattern) -> Vec<&Node> {
        self.get_nodes_by_label(&pattern.label)
            .into_iter()
            .filter(|node| node.matches_properties(&pattern.filters))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            label_counts: self
                .label_index
                .iter()
                .map(|(label, ids)| (label.to_string(), ids.len()))
                .collect(),
            edge_type_counts: self
                .edge_type_index
                .iter()
                .map(|(edge_type, ids)| (edge_type.to_string(), ids.len()))
                .collect(),
        }
    }
}

impl GraphBackend for GraphStore {
    fn create_node(&mut self, labels: &[Label], properties: PropertyMap) -> GraphResult<NodeId> {
        self.insert_node(labels, properties)
    }

    fn merge_node(
        &mut self,
        label: &Label,
        key: &str,
        value: PropertyValue,
        on_create: PropertyMap,
    ) -> GraphResult<MergeOutcome> {
        let existing = self.lookup(label, key, &value)?.first().copied();
        if let Some(node) = existing {
            return Ok(MergeOutcome {
                node,
                created: false,
            });
        }

        let mut properties = on_create;
        properties.insert(key.to_string(), value);
        let node = self.insert_node(std::slice::from_ref(label), properties)?;
        debug!(label = %label, key, %node, "merge created node");
        Ok(MergeOutcome {
            node,
            created: true,
        })
    }

    fn create_edge(
        &mut self,
        from: &NodeSelector,
        to: &NodeSelector,
        edge_type: &EdgeType,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId> {
        let source = self.resolve(from).map_err(|err| match err {
            GraphError::NodeNotFound(id) => GraphError::InvalidEdgeSource(id),
            other => other,
        })?;
        let target = self.resolve(to).map_err(|err| match err {
            GraphError::NodeNotFound(id) => GraphError::InvalidEdgeTarget(id),
            other => other,
        })?;
        self.create_edge_between(source, target, edge_type.clone(), properties)
    }

    fn query(&self, pattern: &NodePattern) -> GraphResult<Vec<Record>> {
        Ok(self
            .find_nodes(pattern)
            .into_iter()
            .map(|node| Record {
                node: node.id,
                properties: node.properties.clone(),
            })
            .collect())
    }

    fn bulk_link(
        &mut self,
        left: &NodePattern,
        right: &NodePattern,
        link: &mut BulkLink<'_>,
        rng: &mut dyn RngCore,
    ) -> GraphResult<usize> {
        if !(0.0..=1.0).contains(&link.probability) {
            return Err(GraphError::InvalidProbability(link.probability));
        }

        let left_ids: Vec<NodeId> = self.find_nodes(left).iter().map(|n| n.id).collect();
        let right_ids: Vec<NodeId> = self.find_nodes(right).iter().map(|n| n.id).collect();

        let mut created = 0;
        for &source in &left_ids {
            for &target in &right_ids {
                if rng.gen::<f64>() < link.probability {
                    let properties = link.next_properties(rng);
                    self.create_edge_between(source, target, link.edge_type.clone(), properties)?;
                    created += 1;
                }
            }
        }

        debug!(
            edge_type = %link.edge_type,
            pairs = left_ids.len() * right_ids.len(),
            created,
            "bulk link finished"
        );
        Ok(created)
    }
}
