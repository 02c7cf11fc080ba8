//! The benchmark loop: topology outer, node count inner, one timed oracle
//! call per cell.
//!
//! Every call to [`run`] starts from an empty [`ResultSeries`] and hands it
//! back inside a [`BenchmarkReport`]; nothing accumulates between runs.
use std::fmt;
use std::time::Instant;

use rand::Rng;
use serde::{Serialize, Serializer};
use tracing::{debug, info, instrument};

use crate::config::BenchConfig;
use crate::error::{BenchError, OracleError};
use crate::generator::{assign_weights, generate, Topology};
use crate::oracle::{Algorithm, Heuristic, Outcome, ZeroHeuristic};
use crate::Node;

/// Elapsed seconds per topology, one entry per node count in run order.
/// Topologies keep the order they were first given in; repeats are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSeries(Vec<(Topology, Vec<f64>)>);

impl ResultSeries {
    /// An empty sequence for each distinct entry of `topologies`.
    pub fn new(topologies: &[Topology]) -> Self {
        let mut series = Self::default();
        for &t in topologies {
            if series.get(t).is_none() { series.0.push((t, Vec::new())); }
        }
        series
    }

    pub fn push(&mut self, topology: Topology, seconds: f64) {
        match self.0.iter_mut().find(|(t, _)| *t == topology) {
            Some((_, times)) => times.push(seconds),
            None => self.0.push((topology, vec![seconds])),
        }
    }

    pub fn get(&self, topology: Topology) -> Option<&[f64]> {
        self.0.iter().find(|(t, _)| *t == topology).map(|(_, v)| v.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Topology, &[f64])> + '_ {
        self.0.iter().map(|(t, v)| (*t, v.as_slice()))
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
}

impl Serialize for ResultSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(t, v)| (t, v)))
    }
}

impl fmt::Display for ResultSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (topology, times)) in self.iter().enumerate() {
            if i > 0 { f.write_str(", ")?; }
            write!(f, "{topology}: [")?;
            for (j, t) in times.iter().enumerate() {
                if j > 0 { f.write_str(", ")?; }
                write!(f, "{t}")?;
            }
            f.write_str("]")?;
        }
        f.write_str("}")
    }
}

/// One timed oracle call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub algorithm: Algorithm,
    pub topology: Topology,
    pub nodes: usize,
    pub edges: usize,
    pub source: Node,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Node>,
    pub seconds: f64,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub algorithm: Algorithm,
    pub node_counts: Vec<usize>,
    pub series: ResultSeries,
    pub measurements: Vec<Measurement>,
}

/// Run `algorithm` over the whole matrix in `config`.
///
/// Graphs and endpoints are drawn from `rng`; `heuristic` is only consulted
/// by A*. A* calls between disconnected endpoints still record their time.
///
/// # Errors
/// [`BenchError::TooFewNodes`] when a node count leaves no valid source (or,
/// for A*, no distinct target), and any generator or oracle failure other
/// than a missing A* path.
#[instrument(name = "bench.run", skip_all, fields(algorithm = %algorithm))]
pub fn run<H, R>(
    algorithm: Algorithm,
    config: &BenchConfig,
    heuristic: &H,
    rng: &mut R,
) -> Result<BenchmarkReport, BenchError>
where
    H: Heuristic + ?Sized,
    R: Rng + ?Sized,
{
    let topologies = config.distinct_topologies();
    let mut series = ResultSeries::new(&topologies);
    let mut measurements = Vec::with_capacity(topologies.len() * config.node_counts.len());
    info!(
        topologies = ?topologies,
        node_counts = ?config.node_counts,
        "starting benchmark"
    );

    for &topology in &topologies {
        for &n in &config.node_counts {
            let min_nodes = if algorithm.needs_target() { 2 } else { 1 };
            if n < min_nodes {
                return Err(BenchError::TooFewNodes { topology, node_count: n });
            }
            let graph = generate(topology, n, rng);
            let weighted = assign_weights(&graph, config.weight_range(), rng)?;
            let (source, target) = endpoints(algorithm, n, rng);
            let trial = algorithm.prepare(&weighted, source, target, heuristic)?;

            let start = Instant::now();
            let result = trial.run();
            let seconds = start.elapsed().as_secs_f64();

            let outcome = match result {
                Ok(outcome) => outcome,
                Err(OracleError::NoPathFound { .. }) => Outcome::NoPath,
                Err(err) => return Err(err.into()),
            };
            debug!(%topology, nodes = n, edges = graph.edge_count(), seconds, ?outcome, "trial finished");

            series.push(topology, seconds);
            measurements.push(Measurement {
                algorithm,
                topology,
                nodes: n,
                edges: graph.edge_count(),
                source: trial.source(),
                target: trial.target(),
                seconds,
                outcome,
            });
        }
    }

    info!(trials = measurements.len(), "benchmark finished");
    Ok(BenchmarkReport { algorithm, node_counts: config.node_counts.clone(), series, measurements })
}

/// [`run`] with the zero heuristic and the RNG described by `config`.
pub fn benchmark(algorithm: Algorithm, config: &BenchConfig) -> Result<BenchmarkReport, BenchError> {
    let mut rng = config.rng();
    run(algorithm, config, &ZeroHeuristic, &mut rng)
}

/// Every algorithm in turn, each with a fresh series.
pub fn benchmark_all(config: &BenchConfig) -> Result<Vec<BenchmarkReport>, BenchError> {
    let mut rng = config.rng();
    Algorithm::ALL
        .iter()
        .map(|&algorithm| run(algorithm, config, &ZeroHeuristic, &mut rng))
        .collect()
}

/// Node 0 for single-source algorithms; two distinct uniform nodes for A*.
fn endpoints<R: Rng + ?Sized>(algorithm: Algorithm, n: usize, rng: &mut R) -> (Node, Option<Node>) {
    if !algorithm.needs_target() { return (0, None); }
    let pair = rand::seq::index::sample(rng, n, 2);
    (pair.index(0), Some(pair.index(1)))
}
