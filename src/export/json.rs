//! JSON snapshot export

use super::{create_file, ExportResult};
use crate::graph::{GraphStore, PropertyMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// A node in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedNode {
    /// Store handle
    pub id: u64,
    pub labels: Vec<String>,
    pub properties: BTreeMap<String, serde_json::Value>,
}

/// An edge in the snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedEdge {
    pub id: u64,
    /// Handle of the source node
    pub source: u64,
    /// Handle of the target node
    pub target: u64,
    #[serde(rename = "type")]
    pub edge_type: String,
    pub properties: BTreeMap<String, serde_json::Value>,
}

/// Whole-graph snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<ExportedNode>,
    pub edges: Vec<ExportedEdge>,
}

fn json_properties(properties: &PropertyMap) -> BTreeMap<String, serde_json::Value> {
    properties
        .iter()
        .map(|(k, v)| (k.clone(), v.to_json()))
        .collect()
}

impl GraphSnapshot {
    pub fn from_store(store: &GraphStore) -> Self {
        let nodes = store
            .nodes()
            .iter()
            .map(|node| ExportedNode {
                id: node.id.as_u64(),
                labels: node.labels.iter().map(|l| l.to_string()).collect(),
                properties: json_properties(&node.properties),
            })
            .collect();
        let edges = store
            .edges()
            .iter()
            .map(|edge| ExportedEdge {
                id: edge.id.as_u64(),
                source: edge.source.as_u64(),
                target: edge.target.as_u64(),
                edge_type: edge.edge_type.to_string(),
                properties: json_properties(&edge.properties),
            })
            .collect();
        Self { nodes, edges }
    }
}

/// Write `store` as pretty-printed JSON
pub fn write_json<W: Write>(store: &GraphStore, out: &mut W) -> ExportResult<()> {
    let snapshot = GraphSnapshot::from_store(store);
    serde_json::to_writer_pretty(&mut *out, &snapshot)?;
    writeln!(out)?;
    out.flush()?;
    info!(
        nodes = snapshot.nodes.len(),
        edges = snapshot.edges.len(),
        "wrote json snapshot"
    );
    Ok(())
}

pub fn write_json_file(store: &GraphStore, path: impl AsRef<Path>) -> ExportResult<()> {
    let mut out = create_file(path.as_ref())?;
    write_json(store, &mut out)
}
