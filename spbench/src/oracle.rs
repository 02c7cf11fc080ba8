//! Thin adapter over `petgraph`'s shortest-path algorithms.
//!
//! Each benchmark invocation is split into an untimed [`Algorithm::prepare`]
//! step and a timed [`Trial::run`], so per-algorithm setup (such as the float
//! weight view Bellman-Ford needs) never lands inside the measurement.
use std::collections::HashMap;
use std::fmt;

use petgraph::algo::{astar, bellman_ford, dijkstra};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};

use crate::error::OracleError;
use crate::{Node, Weight, WeightedGraph};

/// `petgraph::algo::bellman_ford` only accepts float weights.
pub type FloatGraph = UnGraph<(), f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    Dijkstra,
    BellmanFord,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Dijkstra, Algorithm::BellmanFord, Algorithm::AStar];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra",
            Algorithm::BellmanFord => "Bellman-Ford",
            Algorithm::AStar => "A*",
        }
    }

    /// Whether the algorithm answers a point-to-point query rather than a
    /// single-source one.
    pub fn needs_target(self) -> bool { matches!(self, Algorithm::AStar) }

    /// Build the trial for one timed call. `target` is ignored by the
    /// single-source algorithms and required by A*.
    pub fn prepare<'g, H: Heuristic + ?Sized>(
        self,
        graph: &'g WeightedGraph,
        source: Node,
        target: Option<Node>,
        heuristic: &'g H,
    ) -> Result<Trial<'g, H>, OracleError> {
        let source = NodeIndex::new(source);
        Ok(match self {
            Algorithm::Dijkstra => Trial::Dijkstra { graph, source },
            Algorithm::BellmanFord => Trial::BellmanFord { graph: float_view(graph), source },
            Algorithm::AStar => {
                let target = target
                    .ok_or(OracleError::MissingTarget { algorithm: self.name(), from: source.index() })?;
                Trial::AStar { graph, source, target: NodeIndex::new(target), heuristic }
            }
        })
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Admissible cost estimate from `node` to `goal` used to guide A*.
pub trait Heuristic {
    fn estimate(&self, node: NodeIndex, goal: NodeIndex) -> Weight;
}

/// Always estimates zero, which makes A* expand nodes in Dijkstra order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _node: NodeIndex, _goal: NodeIndex) -> Weight { 0 }
}

impl<F> Heuristic for F
where
    F: Fn(NodeIndex, NodeIndex) -> Weight,
{
    fn estimate(&self, node: NodeIndex, goal: NodeIndex) -> Weight { self(node, goal) }
}

/// What a single oracle call produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Outcome {
    /// Single-source run: number of nodes with a finite distance, source included.
    Reached { nodes: usize },
    /// Point-to-point run that found a path.
    Path { cost: Weight, hops: usize },
    /// Point-to-point run between disconnected nodes.
    NoPath,
}

/// A prepared oracle invocation.
pub enum Trial<'g, H: ?Sized> {
    Dijkstra { graph: &'g WeightedGraph, source: NodeIndex },
    BellmanFord { graph: FloatGraph, source: NodeIndex },
    AStar { graph: &'g WeightedGraph, source: NodeIndex, target: NodeIndex, heuristic: &'g H },
}

impl<H: Heuristic + ?Sized> Trial<'_, H> {
    pub fn source(&self) -> Node {
        match self {
            Trial::Dijkstra { source, .. }
            | Trial::BellmanFord { source, .. }
            | Trial::AStar { source, .. } => source.index(),
        }
    }

    pub fn target(&self) -> Option<Node> {
        match self {
            Trial::AStar { target, .. } => Some(target.index()),
            _ => None,
        }
    }

    /// Run the underlying algorithm once. This is the call the runner times.
    pub fn run(&self) -> Result<Outcome, OracleError> {
        match self {
            Trial::Dijkstra { graph, source } => {
                let dist = single_source_dijkstra(graph, *source);
                Ok(Outcome::Reached { nodes: dist.len() })
            }
            Trial::BellmanFord { graph, source } => {
                let dist = single_source_bellman_ford(graph, *source)?;
                Ok(Outcome::Reached { nodes: dist.iter().filter(|d| d.is_finite()).count() })
            }
            Trial::AStar { graph, source, target, heuristic } => {
                let (cost, path) = astar_path_length(graph, *source, *target, *heuristic)?;
                Ok(Outcome::Path { cost, hops: path.len().saturating_sub(1) })
            }
        }
    }
}

pub fn float_view(graph: &WeightedGraph) -> FloatGraph {
    graph.map(|_, _| (), |_, &w| f64::from(w))
}

/// Shortest path lengths from `source` to every reachable node.
pub fn single_source_dijkstra(graph: &WeightedGraph, source: NodeIndex) -> HashMap<NodeIndex, Weight> {
    dijkstra(graph, source, None, |e| *e.weight())
}

/// Shortest path lengths indexed by node; unreachable nodes are infinite.
pub fn single_source_bellman_ford(graph: &FloatGraph, source: NodeIndex) -> Result<Vec<f64>, OracleError> {
    bellman_ford(graph, source)
        .map(|paths| paths.distances)
        .map_err(|_| OracleError::NegativeCycle { from: source.index() })
}

/// Cost and node sequence of a shortest `source` to `target` path.
pub fn astar_path_length<H: Heuristic + ?Sized>(
    graph: &WeightedGraph,
    source: NodeIndex,
    target: NodeIndex,
    heuristic: &H,
) -> Result<(Weight, Vec<NodeIndex>), OracleError> {
    astar(
        graph,
        source,
        |n| n == target,
        |e| *e.weight(),
        |n| heuristic.estimate(n, target),
    )
    .ok_or(OracleError::NoPathFound { from: source.index(), to: target.index() })
}
