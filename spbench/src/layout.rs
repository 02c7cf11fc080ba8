//! Force-directed node placement for the graph visualizer.
use petgraph::visit::EdgeRef;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::WeightedGraph;

pub const ITERATIONS: usize = 50;
const MIN_DISTANCE: f64 = 0.01;

/// Fruchterman-Reingold spring layout.
///
/// Nodes start uniformly in the unit square, repel each other with `k²/d` and
/// are pulled together along edges with `w·d²/k` where `k = 1/√n` and `w` is
/// the edge weight. Step length is capped by a temperature that starts at a
/// tenth of the initial extent and cools linearly. The result is centred and
/// scaled so the largest coordinate magnitude is 1.
///
/// Identical graphs and seeds give identical positions.
pub fn spring_layout(graph: &WeightedGraph, seed: u64) -> Vec<[f64; 2]> {
    let n = graph.node_count();
    if n <= 1 { return vec![[0.0, 0.0]; n]; }
    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<[f64; 2]> = (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect();

    let mut neighbours: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for e in graph.edge_references() {
        let (u, v) = (e.source().index(), e.target().index());
        let w = f64::from(*e.weight());
        neighbours[u].push((v, w));
        neighbours[v].push((u, w));
    }

    let k = (1.0 / n as f64).sqrt();
    let mut t = 0.1 * extent(&pos);
    let dt = t / (ITERATIONS as f64 + 1.0);
    let mut disp = vec![[0.0f64; 2]; n];

    for _ in 0..ITERATIONS {
        for (i, d) in disp.iter_mut().enumerate() {
            *d = [0.0, 0.0];
            for j in (0..n).filter(|&j| j != i) {
                let (dx, dy, dist) = offset(&pos, i, j);
                let push = k * k / (dist * dist);
                d[0] += dx * push;
                d[1] += dy * push;
            }
            for &(j, w) in &neighbours[i] {
                let (dx, dy, dist) = offset(&pos, i, j);
                let pull = w * dist / k;
                d[0] -= dx * pull;
                d[1] -= dy * pull;
            }
        }
        for (p, d) in pos.iter_mut().zip(&disp) {
            let len = d[0].hypot(d[1]).max(MIN_DISTANCE);
            p[0] += d[0] * t / len;
            p[1] += d[1] * t / len;
        }
        t -= dt;
    }

    rescale(&mut pos);
    pos
}

/// Vector from node `j` to node `i` and its length, floored at `MIN_DISTANCE`.
fn offset(pos: &[[f64; 2]], i: usize, j: usize) -> (f64, f64, f64) {
    let dx = pos[i][0] - pos[j][0];
    let dy = pos[i][1] - pos[j][1];
    (dx, dy, dx.hypot(dy).max(MIN_DISTANCE))
}

fn extent(pos: &[[f64; 2]]) -> f64 {
    let span = |axis: usize| {
        let (lo, hi) = pos.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p[axis]), hi.max(p[axis]))
        });
        hi - lo
    };
    span(0).max(span(1))
}

fn rescale(pos: &mut [[f64; 2]]) {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p[0]).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p[1]).sum::<f64>() / n;
    for p in pos.iter_mut() {
        p[0] -= cx;
        p[1] -= cy;
    }
    let lim = pos.iter().flat_map(|p| [p[0].abs(), p[1].abs()]).fold(0.0, f64::max);
    if lim > 0.0 {
        for p in pos.iter_mut() {
            p[0] /= lim;
            p[1] /= lim;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{assign_weights, generate, Topology};

    fn weighted(t: Topology, n: usize, seed: u64) -> WeightedGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        assign_weights(&generate(t, n, &mut rng), 1..=10, &mut rng).unwrap()
    }

    #[test]
    fn deterministic_for_seed() {
        let g = weighted(Topology::Sparse, 20, 1);
        assert_eq!(spring_layout(&g, 42), spring_layout(&g, 42));
        assert_ne!(spring_layout(&g, 42), spring_layout(&g, 43));
    }

    #[test]
    fn positions_are_centred_and_bounded() {
        let g = weighted(Topology::Dense, 20, 2);
        let pos = spring_layout(&g, 42);
        assert_eq!(pos.len(), 20);
        let mut max = 0.0f64;
        for p in &pos {
            assert!(p[0].is_finite() && p[1].is_finite());
            max = max.max(p[0].abs()).max(p[1].abs());
        }
        assert!((max - 1.0).abs() < 1e-9);
        let cx: f64 = pos.iter().map(|p| p[0]).sum::<f64>() / 20.0;
        assert!(cx.abs() < 1e-9);
    }

    #[test]
    fn trivial_graphs() {
        assert!(spring_layout(&WeightedGraph::default(), 42).is_empty());
        let mut g = WeightedGraph::default();
        g.add_node(());
        assert_eq!(spring_layout(&g, 42), vec![[0.0, 0.0]]);
    }

    #[test]
    fn large_sparse_graphs_lay_out() {
        let g = weighted(Topology::Sparse, 1_200, 3);
        let pos = spring_layout(&g, 42);
        assert_eq!(pos.len(), 1_200);
        assert!(pos.iter().all(|p| p[0].abs() <= 1.0 + 1e-9 && p[1].abs() <= 1.0 + 1e-9));
    }

    #[test]
    fn neighbours_sit_closer_than_strangers() {
        // Two heavy edges with nothing between them.
        let mut g = WeightedGraph::default();
        let n: Vec<_> = (0..4).map(|_| g.add_node(())).collect();
        g.add_edge(n[0], n[1], 10);
        g.add_edge(n[2], n[3], 10);
        let pos = spring_layout(&g, 42);
        let d = |a: usize, b: usize| (pos[a][0] - pos[b][0]).hypot(pos[a][1] - pos[b][1]);
        assert!(d(0, 1) < d(0, 2));
        assert!(d(2, 3) < d(1, 3));
    }
}
