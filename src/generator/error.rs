//! Error types for dataset generation

use crate::graph::{GraphError, Label};
use std::path::PathBuf;
use thiserror::Error;

/// Problems with a generator configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors raised while generating a dataset
#[derive(Error, Debug)]
pub enum GenerationError {
    /// A dependent stage found no candidates to sample from
    #[error("No {label} nodes available to sample from; generate them first")]
    EmptyCandidatePool { label: Label },

    /// The store rejected a write or lookup
    #[error("Graph store error: {0}")]
    Store(#[from] GraphError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
