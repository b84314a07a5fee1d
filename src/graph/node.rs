//! Stored entities

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// A stored entity: labels plus properties
///
/// Nodes are immutable once stored: the store only ever appends. A node
/// carries nothing beyond what the generator wrote, so a seeded run stores
/// identical nodes every time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned handle
    pub id: NodeId,

    /// Labels in declaration order
    pub labels: IndexSet<Label>,

    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node with labels and properties
    pub fn new(id: NodeId, labels: impl IntoIterator<Item = Label>, properties: PropertyMap) -> Self {
        Node {
            id,
            labels: labels.into_iter().collect(),
            properties,
        }
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &Label) -> bool {
        self.labels.contains(label)
    }

    /// First declared label, used as the node's primary type
    pub fn primary_label(&self) -> Option<&Label> {
        self.labels.first()
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Get a string property
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_property(key).and_then(PropertyValue::as_string)
    }

    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Check every `(key, value)` filter against this node's properties
    pub fn matches_properties(&self, filters: &PropertyMap) -> bool {
        filters
            .iter()
            .all(|(key, expected)| self.properties.get(key) == Some(expected))
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
