//! Benchmark matrix configuration.
use std::ops::RangeInclusive;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::generator::Topology;
use crate::Weight;

pub const DEFAULT_NODE_COUNTS: [usize; 5] = [100, 200, 300, 400, 500];
pub const DEFAULT_WEIGHTS: RangeInclusive<Weight> = 1..=10;
/// Node count of the graphs drawn by the visualizer.
pub const VISUALIZATION_NODES: usize = 20;
/// Largest graph the visualizer accepts; layout cost grows with the square of this.
pub const MAX_VISUALIZATION_NODES: u64 = 2_000;
/// Seed of the spring layout, fixed so node placement is reproducible.
pub const LAYOUT_SEED: u64 = 42;

/// The (topology, node count) cross product a benchmark walks, plus how
/// weights and randomness are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub topologies: Vec<Topology>,
    pub node_counts: Vec<usize>,
    pub min_weight: Weight,
    pub max_weight: Weight,
    /// `None` seeds from OS entropy, so runs are not reproducible.
    pub seed: Option<u64>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            topologies: Topology::ALL.to_vec(),
            node_counts: DEFAULT_NODE_COUNTS.to_vec(),
            min_weight: *DEFAULT_WEIGHTS.start(),
            max_weight: *DEFAULT_WEIGHTS.end(),
            seed: None,
        }
    }
}

impl BenchConfig {
    /// Repeated topologies are dropped; the first occurrence keeps its place.
    pub fn with_topologies(mut self, topologies: impl Into<Vec<Topology>>) -> Self {
        self.topologies = topologies.into();
        self.topologies = self.distinct_topologies();
        self
    }

    pub fn with_node_counts(mut self, node_counts: impl Into<Vec<usize>>) -> Self {
        self.node_counts = node_counts.into();
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// The configured topologies in order, each listed once.
    pub fn distinct_topologies(&self) -> Vec<Topology> {
        let mut seen = Vec::with_capacity(self.topologies.len());
        for &t in &self.topologies {
            if !seen.contains(&t) { seen.push(t); }
        }
        seen
    }

    pub fn weight_range(&self) -> RangeInclusive<Weight> { self.min_weight..=self.max_weight }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
