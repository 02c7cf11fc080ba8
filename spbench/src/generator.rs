//! Random graph generation for the benchmark matrix.
//!
//! Graphs come out unweighted; [`assign_weights`] is the separate step that
//! turns one into a [`WeightedGraph`] the oracle can query.
use std::collections::HashSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use petgraph::graph::{NodeIndex, UnGraph};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::{Node, Weight, WeightedGraph};

/// Structural class of a generated graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Topology {
    Sparse,
    Dense,
    Complete,
}

impl Topology {
    pub const ALL: [Topology; 3] = [Topology::Sparse, Topology::Dense, Topology::Complete];

    pub fn name(self) -> &'static str {
        match self {
            Topology::Sparse => "Sparse",
            Topology::Dense => "Dense",
            Topology::Complete => "Complete",
        }
    }

    /// Number of edges a graph of this class has on `n` nodes.
    ///
    /// Sparse asks for `2n` and Dense for a third of the possible pairs; both
    /// are capped at `n(n-1)/2` since a simple graph cannot hold more.
    pub fn edge_count(self, n: usize) -> usize {
        let max = max_edges(n);
        match self {
            Topology::Sparse => (2 * n).min(max),
            Topology::Dense => max / 3,
            Topology::Complete => max,
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Topology {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sparse" => Ok(Topology::Sparse),
            "dense" => Ok(Topology::Dense),
            "complete" => Ok(Topology::Complete),
            _ => Err(GenerateError::InvalidTopology { tag: s.to_owned() }),
        }
    }
}

/// Unweighted simple graph: nodes `0..node_count`, edges stored with `u < v`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    edges: Vec<(Node, Node)>,
}

impl Graph {
    pub fn node_count(&self) -> usize { self.node_count }
    pub fn edge_count(&self) -> usize { self.edges.len() }
    pub fn edges(&self) -> &[(Node, Node)] { &self.edges }
}

fn max_edges(n: usize) -> usize { n * n.saturating_sub(1) / 2 }

/// Build a graph of `topology` on `node_count` nodes.
pub fn generate<R: Rng + ?Sized>(topology: Topology, node_count: usize, rng: &mut R) -> Graph {
    match topology {
        Topology::Complete => complete_graph(node_count),
        Topology::Sparse | Topology::Dense => {
            gnm_random_graph(node_count, topology.edge_count(node_count), rng)
        }
    }
}

/// Like [`generate`], with the topology given by name.
pub fn generate_named<R: Rng + ?Sized>(
    tag: &str,
    node_count: usize,
    rng: &mut R,
) -> Result<Graph, GenerateError> {
    let topology: Topology = tag.parse()?;
    Ok(generate(topology, node_count, rng))
}

pub fn complete_graph(n: usize) -> Graph {
    let mut edges = Vec::with_capacity(max_edges(n));
    for u in 0..n {
        for v in u + 1..n { edges.push((u, v)); }
    }
    Graph { node_count: n, edges }
}

/// G(n, m): `m` distinct edges picked uniformly from all pairs.
pub fn gnm_random_graph<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> Graph {
    if m >= max_edges(n) { return complete_graph(n); }
    let mut seen: HashSet<(Node, Node)> = HashSet::with_capacity(m);
    let mut edges = Vec::with_capacity(m);
    while edges.len() < m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v { continue; }
        let e = (u.min(v), u.max(v));
        if seen.insert(e) { edges.push(e); }
    }
    Graph { node_count: n, edges }
}

/// Weight every edge of `graph` uniformly from `range`.
pub fn assign_weights<R: Rng + ?Sized>(
    graph: &Graph,
    range: RangeInclusive<Weight>,
    rng: &mut R,
) -> Result<WeightedGraph, GenerateError> {
    let (low, high) = (*range.start(), *range.end());
    if low == 0 || low > high {
        return Err(GenerateError::InvalidWeightRange { low, high });
    }
    let mut g = UnGraph::with_capacity(graph.node_count, graph.edge_count());
    for _ in 0..graph.node_count { g.add_node(()); }
    for &(u, v) in &graph.edges {
        g.add_edge(NodeIndex::new(u), NodeIndex::new(v), rng.gen_range(low..=high));
    }
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use petgraph::visit::EdgeRef;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    fn assert_simple(g: &Graph) {
        let mut seen = HashSet::new();
        for &(u, v) in g.edges() {
            assert!(u < v, "edge ({u}, {v}) is not normalised");
            assert!(v < g.node_count());
            assert!(seen.insert((u, v)), "duplicate edge ({u}, {v})");
        }
    }

    #[rstest]
    #[case(Topology::Sparse, 5, 10)]
    #[case(Topology::Sparse, 100, 200)]
    #[case(Topology::Sparse, 300, 600)]
    #[case(Topology::Dense, 2, 0)]
    #[case(Topology::Dense, 20, 63)]
    #[case(Topology::Dense, 100, 1650)]
    #[case(Topology::Dense, 500, 41583)]
    #[case(Topology::Complete, 2, 1)]
    #[case(Topology::Complete, 5, 10)]
    #[case(Topology::Complete, 100, 4950)]
    fn edge_counts_follow_topology(#[case] t: Topology, #[case] n: usize, #[case] m: usize) {
        let mut rng = StdRng::seed_from_u64(7);
        let g = generate(t, n, &mut rng);
        assert_eq!(g.node_count(), n);
        assert_eq!(g.edge_count(), m);
        assert_eq!(t.edge_count(n), m);
        assert_simple(&g);
    }

    #[test]
    fn sparse_on_tiny_graph_saturates() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = generate(Topology::Sparse, 3, &mut rng);
        assert_eq!(g, complete_graph(3));
    }

    #[test]
    fn empty_and_single_node_graphs() {
        let mut rng = StdRng::seed_from_u64(1);
        for t in Topology::ALL {
            assert_eq!(generate(t, 0, &mut rng).edge_count(), 0);
            let g = generate(t, 1, &mut rng);
            assert_eq!(g.node_count(), 1);
            assert_eq!(g.edge_count(), 0);
        }
    }

    #[rstest]
    #[case("sparse", Topology::Sparse)]
    #[case("Dense", Topology::Dense)]
    #[case(" COMPLETE ", Topology::Complete)]
    fn topology_parses(#[case] tag: &str, #[case] expected: Topology) {
        assert_eq!(tag.parse::<Topology>(), Ok(expected));
    }

    #[test]
    fn unknown_topology_is_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = generate_named("grid", 10, &mut rng).unwrap_err();
        assert_eq!(err, GenerateError::InvalidTopology { tag: "grid".into() });
    }

    #[test]
    fn weights_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(99);
        let g = generate(Topology::Complete, 60, &mut rng);
        let wg = assign_weights(&g, 1..=10, &mut rng).unwrap();
        assert_eq!(wg.node_count(), 60);
        assert_eq!(wg.edge_count(), g.edge_count());
        let mut seen = HashSet::new();
        for e in wg.edge_references() {
            assert!((1..=10).contains(e.weight()));
            seen.insert(*e.weight());
        }
        assert_eq!(seen.len(), 10, "1770 draws should hit every weight");
    }

    #[test]
    fn weighted_graph_keeps_node_numbering() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = generate(Topology::Sparse, 30, &mut rng);
        let wg = assign_weights(&g, 1..=10, &mut rng).unwrap();
        for (e, &(u, v)) in wg.edge_references().zip(g.edges()) {
            assert_eq!((e.source().index(), e.target().index()), (u, v));
        }
    }

    #[test]
    fn bad_weight_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let g = complete_graph(4);
        assert_eq!(
            assign_weights(&g, 0..=10, &mut rng).unwrap_err(),
            GenerateError::InvalidWeightRange { low: 0, high: 10 }
        );
        assert!(assign_weights(&g, 5..=4, &mut rng).is_err());
    }
}
