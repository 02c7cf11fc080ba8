//! Turning benchmark reports and example graphs into something to look at.
//!
//! Nothing here draws pixels. A [`Chart`] describes the timing plot and a
//! [`GraphView`] a laid-out example graph; a [`Reporter`] writes either one
//! to an output stream as JSON or as text/DOT for an external viewer.
use std::io::Write;

use petgraph::dot::Dot;
use petgraph::visit::EdgeRef;
use rand::Rng;
use serde::Serialize;

use crate::config::{DEFAULT_WEIGHTS, LAYOUT_SEED};
use crate::error::{GenerateError, ReportError};
use crate::generator::{assign_weights, generate, Topology};
use crate::layout::spring_layout;
use crate::oracle::Algorithm;
use crate::runner::{BenchmarkReport, ResultSeries};
use crate::{Node, Weight, WeightedGraph};

pub const X_LABEL: &str = "Number of Nodes";
pub const Y_LABEL: &str = "Execution Time (seconds)";

pub fn chart_title(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::Dijkstra => "Dijkstra's Algorithm Execution Time on Different Graph Types",
        Algorithm::BellmanFord => "Bellman-Ford Algorithm Execution Time on Different Graph Types",
        Algorithm::AStar => "A* Algorithm Execution Time for Sparse, Dense, and Complete Graphs",
    }
}

/// One legend entry: execution time against node count for a topology.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub label: String,
    pub points: Vec<(usize, f64)>,
}

/// Line chart of a benchmark run, one line per topology on shared axes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub marker: char,
    pub legend: bool,
    pub grid: bool,
    pub lines: Vec<Line>,
}

impl Chart {
    pub fn from_report(report: &BenchmarkReport) -> Self {
        let lines = report
            .series
            .iter()
            .map(|(topology, times)| Line {
                label: topology.to_string(),
                points: report.node_counts.iter().copied().zip(times.iter().copied()).collect(),
            })
            .collect();
        Self {
            title: chart_title(report.algorithm).to_owned(),
            x_label: X_LABEL.to_owned(),
            y_label: Y_LABEL.to_owned(),
            marker: 'o',
            legend: true,
            grid: true,
            lines,
        }
    }
}

/// A weighted example graph with a position for every node.
#[derive(Debug, Clone)]
pub struct GraphView {
    pub title: String,
    pub topology: Topology,
    pub graph: WeightedGraph,
    pub positions: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct PlacedNode {
    id: Node,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct LabelledEdge {
    source: Node,
    target: Node,
    weight: Weight,
}

#[derive(Serialize)]
struct GraphDocument<'a> {
    title: &'a str,
    topology: Topology,
    nodes: Vec<PlacedNode>,
    edges: Vec<LabelledEdge>,
}

impl GraphView {
    fn document(&self) -> GraphDocument<'_> {
        GraphDocument {
            title: &self.title,
            topology: self.topology,
            nodes: self
                .positions
                .iter()
                .enumerate()
                .map(|(id, p)| PlacedNode { id, x: p[0], y: p[1] })
                .collect(),
            edges: self
                .graph
                .edge_references()
                .map(|e| LabelledEdge {
                    source: e.source().index(),
                    target: e.target().index(),
                    weight: *e.weight(),
                })
                .collect(),
        }
    }

    /// Graphviz document with node ids and edge weights as labels and the
    /// layout pinned through `pos` (honoured by `neato -n`).
    pub fn to_dot(&self) -> String {
        let labelled = self.graph.map(|i, _| i.index(), |_, &w| w);
        let edge_attrs = |_, _| "color = gray ".to_owned();
        let node_attrs = |_, (i, _): (petgraph::graph::NodeIndex, _)| {
            let [x, y] = self.positions.get(i.index()).copied().unwrap_or_default();
            format!("pos = \"{x:.4},{y:.4}!\" style = filled fillcolor = lightblue ")
        };
        let dot = Dot::with_attr_getters(&labelled, &[], &edge_attrs, &node_attrs);
        format!("// {}\n{dot}", self.title)
    }
}

pub fn visualization_title(topology: Topology, node_count: usize) -> String {
    format!("Visualization of a {topology} graph with {node_count} nodes")
}

/// Build, weight and lay out a small example graph of `topology`.
pub fn visualize<R: Rng + ?Sized>(
    topology: Topology,
    node_count: usize,
    rng: &mut R,
) -> Result<GraphView, GenerateError> {
    let graph = assign_weights(&generate(topology, node_count, rng), DEFAULT_WEIGHTS, rng)?;
    let positions = spring_layout(&graph, LAYOUT_SEED);
    Ok(GraphView { title: visualization_title(topology, node_count), topology, graph, positions })
}

/// Display sink for benchmark charts and example graphs.
pub trait Reporter {
    /// Show `chart`, then the raw `series` it was drawn from.
    fn report_chart(&mut self, chart: &Chart, series: &ResultSeries) -> Result<(), ReportError>;
    fn report_graph(&mut self, view: &GraphView) -> Result<(), ReportError>;
}

/// One JSON document per line.
pub struct JsonReporter<W> {
    out: W,
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self { Self { out } }
    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn report_chart(&mut self, chart: &Chart, series: &ResultSeries) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.out, chart)?;
        writeln!(self.out)?;
        serde_json::to_writer(&mut self.out, series)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn report_graph(&mut self, view: &GraphView) -> Result<(), ReportError> {
        serde_json::to_writer(&mut self.out, &view.document())?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Plain-text table for charts, Graphviz DOT for graphs.
pub struct TextReporter<W> {
    out: W,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self { Self { out } }
    pub fn into_inner(self) -> W { self.out }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report_chart(&mut self, chart: &Chart, series: &ResultSeries) -> Result<(), ReportError> {
        writeln!(self.out, "{}", chart.title)?;
        write!(self.out, "{:>16}", chart.x_label)?;
        for line in &chart.lines { write!(self.out, " {:>14}", line.label)?; }
        writeln!(self.out)?;
        let rows = chart.lines.iter().map(|l| l.points.len()).max().unwrap_or(0);
        for row in 0..rows {
            let x = chart.lines.iter().find_map(|l| l.points.get(row)).map_or(0, |p| p.0);
            write!(self.out, "{x:>16}")?;
            for line in &chart.lines {
                match line.points.get(row) {
                    Some((_, secs)) => write!(self.out, " {secs:>14.6}")?,
                    None => write!(self.out, " {:>14}", "-")?,
                }
            }
            writeln!(self.out)?;
        }
        writeln!(self.out, "({})", chart.y_label)?;
        writeln!(self.out, "{series}")?;
        Ok(())
    }

    fn report_graph(&mut self, view: &GraphView) -> Result<(), ReportError> {
        writeln!(self.out, "{}", view.to_dot())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::Measurement;
    use rand::{rngs::StdRng, SeedableRng};

    fn report() -> BenchmarkReport {
        let mut series = ResultSeries::new(&Topology::ALL);
        for (t, secs) in [(Topology::Sparse, 0.001), (Topology::Sparse, 0.002), (Topology::Dense, 0.01)] {
            series.push(t, secs);
        }
        BenchmarkReport {
            algorithm: Algorithm::Dijkstra,
            node_counts: vec![100, 200],
            series,
            measurements: Vec::<Measurement>::new(),
        }
    }

    #[test]
    fn chart_has_a_line_per_topology() {
        let chart = Chart::from_report(&report());
        assert_eq!(chart.title, "Dijkstra's Algorithm Execution Time on Different Graph Types");
        assert_eq!(chart.x_label, "Number of Nodes");
        assert_eq!(chart.y_label, "Execution Time (seconds)");
        assert!(chart.grid && chart.legend);
        let labels: Vec<_> = chart.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Sparse", "Dense", "Complete"]);
        assert_eq!(chart.lines[0].points, vec![(100, 0.001), (200, 0.002)]);
        assert_eq!(chart.lines[1].points, vec![(100, 0.01)]);
        assert!(chart.lines[2].points.is_empty());
    }

    #[test]
    fn chart_lines_follow_series_order() {
        let mut series = ResultSeries::new(&[Topology::Complete, Topology::Sparse, Topology::Complete]);
        series.push(Topology::Complete, 0.3);
        let r = BenchmarkReport { series, ..report() };
        let chart = Chart::from_report(&r);
        let labels: Vec<_> = chart.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["Complete", "Sparse"]);
        assert_eq!(chart.lines[0].points, vec![(100, 0.3)]);
    }

    #[test]
    fn titles_name_the_algorithm() {
        assert!(chart_title(Algorithm::BellmanFord).starts_with("Bellman-Ford"));
        assert!(chart_title(Algorithm::AStar).starts_with("A*"));
    }

    #[test]
    fn json_reporter_writes_chart_then_series() {
        let r = report();
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report_chart(&Chart::from_report(&r), &r.series).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        let mut lines = out.lines();
        let chart: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(chart["lines"][0]["points"][1][0], 200);
        let series: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
        assert_eq!(series["Sparse"].as_array().map(Vec::len), Some(2));
        assert_eq!(series["Complete"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn text_reporter_prints_table_and_mapping() {
        let r = report();
        let mut reporter = TextReporter::new(Vec::new());
        reporter.report_chart(&Chart::from_report(&r), &r.series).unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.starts_with("Dijkstra's Algorithm"));
        assert!(out.contains("0.002000"));
        assert!(out.trim_end().ends_with("{Sparse: [0.001, 0.002], Dense: [0.01], Complete: []}"));
    }

    #[test]
    fn visualization_builds_small_weighted_graph() {
        let mut rng = StdRng::seed_from_u64(8);
        let view = visualize(Topology::Complete, 20, &mut rng).unwrap();
        assert_eq!(view.title, "Visualization of a Complete graph with 20 nodes");
        assert_eq!(view.graph.node_count(), 20);
        assert_eq!(view.graph.edge_count(), 190);
        assert_eq!(view.positions.len(), 20);
        assert!(view.graph.edge_references().all(|e| (1..=10).contains(e.weight())));
    }

    #[test]
    fn dot_output_labels_weights() {
        let mut rng = StdRng::seed_from_u64(3);
        let view = visualize(Topology::Sparse, 20, &mut rng).unwrap();
        let dot = view.to_dot();
        assert!(dot.starts_with("// Visualization of a Sparse graph with 20 nodes"));
        assert!(dot.contains("graph {"));
        assert!(dot.contains("--"));
        assert!(dot.contains("fillcolor = lightblue"));
        let first = view.graph.edge_references().next().unwrap();
        assert!(dot.contains(&format!("label = \"{}\"", first.weight())));
    }

    #[test]
    fn graph_json_lists_nodes_and_edges() {
        let mut rng = StdRng::seed_from_u64(4);
        let view = visualize(Topology::Dense, 20, &mut rng).unwrap();
        let mut reporter = JsonReporter::new(Vec::new());
        reporter.report_graph(&view).unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&reporter.into_inner()).unwrap();
        assert_eq!(doc["topology"], "Dense");
        assert_eq!(doc["nodes"].as_array().map(Vec::len), Some(20));
        assert_eq!(doc["edges"].as_array().map(Vec::len), Some(63));
    }
}
