//! spbench: shortest-path benchmark harness.
//! Times Dijkstra, Bellman-Ford and A* (via `petgraph`) over random sparse,
//! dense and complete graphs of growing size and reports the timings as a
//! chart per algorithm.
use petgraph::graph::UnGraph;

pub mod config;
pub mod error;
pub mod generator;
pub mod layout;
pub mod logging;
pub mod oracle;
pub mod report;
pub mod runner;

pub use config::BenchConfig;
pub use error::{BenchError, GenerateError, OracleError, ReportError};
pub use generator::{assign_weights, generate, generate_named, Graph, Topology};
pub use oracle::{Algorithm, Heuristic, Outcome, ZeroHeuristic};
pub use report::{visualize, Chart, GraphView, JsonReporter, Reporter, TextReporter};
pub use runner::{benchmark, benchmark_all, run, BenchmarkReport, Measurement, ResultSeries};

pub type Node = usize;
pub type Weight = u32;

/// Undirected graph with integer edge weights; node `i` is `NodeIndex::new(i)`.
pub type WeightedGraph = UnGraph<(), Weight>;
