//! Error types raised by graph generation, oracle calls and benchmark runs.

use std::io;

use thiserror::Error;

use crate::generator::Topology;
use crate::Node;

/// Failures while building a benchmark graph.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The topology tag did not name a known graph class.
    #[error("unrecognized topology `{tag}`; expected sparse, dense or complete")]
    InvalidTopology {
        /// Raw tag supplied by the caller.
        tag: String,
    },
    /// Weights must be drawn from a non-empty range of positive integers.
    #[error("invalid weight range {low}..={high}; weights must be positive and low <= high")]
    InvalidWeightRange { low: u32, high: u32 },
}

/// Failures reported by the shortest-path oracle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("no path from node {from} to node {to}")]
    NoPathFound { from: Node, to: Node },
    #[error("graph contains a negative cycle reachable from node {from}")]
    NegativeCycle { from: Node },
    /// A point-to-point query was prepared without a goal node.
    #[error("{algorithm} from node {from} needs a target node")]
    MissingTarget { algorithm: &'static str, from: Node },
}

/// Failures that abort a benchmark run.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
    #[error(transparent)]
    Oracle(#[from] OracleError),
    /// A* needs two distinct endpoints.
    #[error("{topology} graph with {node_count} nodes is too small to pick a source and target")]
    TooFewNodes { topology: Topology, node_count: usize },
}

/// Failures while writing a chart or graph document.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}
