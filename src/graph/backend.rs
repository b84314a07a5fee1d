//! Store capability the generator writes through
//!
//! The generator never touches a concrete store; it only needs the five
//! operations below. [`GraphStore`](super::GraphStore) implements them
//! in-process.

use rand::RngCore;

use super::pattern::{MergeOutcome, NodePattern, NodeSelector, Record};
use super::property::{PropertyMap, PropertyValue};
use super::store::GraphResult;
use super::types::{EdgeId, EdgeType, Label, NodeId};

/// Produces the properties of one edge created by a bulk link
pub type EdgePropertyFn<'a> = dyn FnMut(&mut dyn RngCore) -> PropertyMap + 'a;

/// Parameters of a set-based probabilistic join.
///
/// Every `(left, right)` pair of the join is kept with independent
/// probability `probability`; a kept pair becomes a `left -[edge_type]-> right`
/// edge whose properties come from the optional generator.
pub struct BulkLink<'a> {
    pub edge_type: EdgeType,
    pub probability: f64,
    properties: Option<Box<EdgePropertyFn<'a>>>,
}

impl<'a> BulkLink<'a> {
    pub fn new(edge_type: impl Into<EdgeType>, probability: f64) -> Self {
        Self {
            edge_type: edge_type.into(),
            probability,
            properties: None,
        }
    }

    /// Attach a per-edge property generator
    pub fn with_properties(
        mut self,
        generator: impl FnMut(&mut dyn RngCore) -> PropertyMap + 'a,
    ) -> Self {
        self.properties = Some(Box::new(generator));
        self
    }

    /// Properties for the next kept pair
    pub fn next_properties(&mut self, rng: &mut dyn RngCore) -> PropertyMap {
        match self.properties.as_mut() {
            Some(generator) => generator(rng),
            None => PropertyMap::new(),
        }
    }
}

impl std::fmt::Debug for BulkLink<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BulkLink")
            .field("edge_type", &self.edge_type)
            .field("probability", &self.probability)
            .field("has_properties", &self.properties.is_some())
            .finish()
    }
}

/// Store capability consumed by the dataset generator.
///
/// Implementations must reject edges whose endpoints do not exist, and must
/// give `merge_node` first-write-wins semantics: once a node with the merge
/// key exists, later merges return it untouched.
pub trait GraphBackend {
    /// Create a node unconditionally
    fn create_node(&mut self, labels: &[Label], properties: PropertyMap) -> GraphResult<NodeId>;

    /// Return the node with `label` whose `key` equals `value`, creating it
    /// with `value` plus `on_create` when absent
    fn merge_node(
        &mut self,
        label: &Label,
        key: &str,
        value: PropertyValue,
        on_create: PropertyMap,
    ) -> GraphResult<MergeOutcome>;

    /// Create a directed edge between two existing nodes
    fn create_edge(
        &mut self,
        from: &NodeSelector,
        to: &NodeSelector,
        edge_type: &EdgeType,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId>;

    /// All nodes matching `pattern`, in creation order
    fn query(&self, pattern: &NodePattern) -> GraphResult<Vec<Record>>;

    /// One pass over `left × right`, keeping each pair with `link.probability`.
    /// Returns the number of edges created.
    fn bulk_link(
        &mut self,
        left: &NodePattern,
        right: &NodePattern,
        link: &mut BulkLink<'_>,
        rng: &mut dyn RngCore,
    ) -> GraphResult<usize>;
}
