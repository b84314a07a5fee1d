//! Declarative node patterns and edge-endpoint selectors
//!
//! These are the arguments of the [`GraphBackend`](super::GraphBackend)
//! operations: a [`NodePattern`] stands in for `MATCH (n:Label {k: v})`, a
//! [`NodeSelector`] names one edge endpoint either by handle or by a unique
//! property match.

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};

/// `(n:Label {key: value, ...})`
#[derive(Debug, Clone, PartialEq)]
pub struct NodePattern {
    pub label: Label,
    pub filters: PropertyMap,
}

impl NodePattern {
    /// Match every node carrying `label`
    pub fn label(label: impl Into<Label>) -> Self {
        Self {
            label: label.into(),
            filters: PropertyMap::new(),
        }
    }

    /// Add an equality filter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }
}

/// One endpoint of an edge to be created
#[derive(Debug, Clone, PartialEq)]
pub enum NodeSelector {
    /// A handle returned by an earlier create or merge
    Ref(NodeId),
    /// The single node with `label` whose `key` equals `value`
    Match {
        label: Label,
        key: String,
        value: PropertyValue,
    },
}

impl NodeSelector {
    pub fn by_key(
        label: impl Into<Label>,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        NodeSelector::Match {
            label: label.into(),
            key: key.into(),
            value: value.into(),
        }
    }
}

impl From<NodeId> for NodeSelector {
    fn from(id: NodeId) -> Self {
        NodeSelector::Ref(id)
    }
}

/// One row returned by [`GraphBackend::query`](super::GraphBackend::query)
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub node: NodeId,
    pub properties: PropertyMap,
}

impl Record {
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

/// Result of an idempotent merge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub node: NodeId,
    /// `true` when this call created the node, `false` when it already existed
    pub created: bool,
}
