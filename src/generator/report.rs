//! What a pipeline run created

use serde::Serialize;
use std::fmt;

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Customers,
    Categories,
    Products,
    Orders,
    Reviews,
    Transactions,
    Suppliers,
    Campaigns,
}

impl Stage {
    pub const ALL: [Stage; 8] = [
        Stage::Customers,
        Stage::Categories,
        Stage::Products,
        Stage::Orders,
        Stage::Reviews,
        Stage::Transactions,
        Stage::Suppliers,
        Stage::Campaigns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Customers => "customers",
            Stage::Categories => "categories",
            Stage::Products => "products",
            Stage::Orders => "orders",
            Stage::Reviews => "reviews",
            Stage::Transactions => "transactions",
            Stage::Suppliers => "suppliers",
            Stage::Campaigns => "campaigns",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nodes and edges written by one stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    pub nodes_created: usize,
    pub edges_created: usize,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            nodes_created: 0,
            edges_created: 0,
        }
    }

    /// Report for a stage whose target count was zero
    pub fn skipped(stage: Stage) -> Self {
        Self::new(stage)
    }
}

/// Summary of one [`DatasetGenerator::run`](super::DatasetGenerator::run)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Seed of the random source, recorded so the run can be repeated
    pub seed: u64,
    pub stages: Vec<StageReport>,
}

impl PipelineReport {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stages: Vec::with_capacity(Stage::ALL.len()),
        }
    }

    pub fn push(&mut self, report: StageReport) {
        self.stages.push(report);
    }

    pub fn stage(&self, stage: Stage) -> Option<&StageReport> {
        self.stages.iter().find(|r| r.stage == stage)
    }

    pub fn total_nodes(&self) -> usize {
        self.stages.iter().map(|r| r.nodes_created).sum()
    }

    pub fn total_edges(&self) -> usize {
        self.stages.iter().map(|r| r.edges_created).sum()
    }
}
