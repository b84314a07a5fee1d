//! Exporters for a populated [`GraphStore`](crate::graph::GraphStore)
//!
//! - [`cypher`]: a script a Neo4j instance can run to recreate the graph
//! - [`json`]: a `{ "nodes": [...], "edges": [...] }` snapshot

pub mod cypher;
pub mod json;

pub use cypher::{to_cypher_script, write_cypher, write_cypher_file};
pub use json::{write_json, write_json_file, ExportedEdge, ExportedNode, GraphSnapshot};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing an export
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

pub(crate) fn create_file(path: &std::path::Path) -> ExportResult<std::io::BufWriter<std::fs::File>> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(std::io::BufWriter::new(file))
}
