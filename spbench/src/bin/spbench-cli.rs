use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{error, info};

use spbench::config::{DEFAULT_NODE_COUNTS, MAX_VISUALIZATION_NODES, VISUALIZATION_NODES};
use spbench::logging::{self, LoggingError};
use spbench::{
    benchmark, visualize, Algorithm, BenchConfig, BenchmarkReport, Chart, JsonReporter, Reporter,
    TextReporter, Topology,
};

#[derive(Debug, Parser)]
#[command(
    name = "spbench-cli",
    about = "Time Dijkstra, Bellman-Ford and A* on sparse, dense and complete random graphs.",
    long_about = "Time Dijkstra, Bellman-Ford and A* on sparse, dense and complete random graphs.\n\
                  Runs the A* benchmark when no subcommand is given."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Single-source Dijkstra from node 0.
    Dijkstra(BenchArgs),
    /// Single-source Bellman-Ford from node 0.
    BellmanFord(BenchArgs),
    /// A* between two random nodes with a zero heuristic.
    Astar(BenchArgs),
    /// All three benchmarks, one chart each.
    All(BenchArgs),
    /// Lay out and print one small weighted graph.
    Visualize(VisualizeArgs),
}

#[derive(Debug, Args)]
struct BenchArgs {
    /// Node counts to benchmark, in order.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_NODE_COUNTS)]
    nodes: Vec<usize>,
    /// Topologies to benchmark (default: sparse,dense,complete).
    #[arg(long, value_delimiter = ',')]
    topologies: Vec<Topology>,
    /// Seed for graph generation; omitted means a fresh random seed.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = ChartFormat::Human)]
    format: ChartFormat,
    /// Also print one JSON row per timed call.
    #[arg(long)]
    rows: bool,
}

impl Default for BenchArgs {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODE_COUNTS.to_vec(),
            topologies: Vec::new(),
            seed: None,
            format: ChartFormat::Human,
            rows: false,
        }
    }
}

impl BenchArgs {
    fn config(&self) -> BenchConfig {
        let config = BenchConfig::default().with_node_counts(self.nodes.clone()).with_seed(self.seed);
        if self.topologies.is_empty() { config } else { config.with_topologies(self.topologies.clone()) }
    }
}

#[derive(Debug, Args)]
struct VisualizeArgs {
    topology: Topology,
    #[arg(
        long,
        default_value_t = VISUALIZATION_NODES,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_VISUALIZATION_NODES)
    )]
    nodes: usize,
    /// Seed for the graph and its weights; the layout seed is fixed.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum, default_value_t = GraphFormat::Dot)]
    format: GraphFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChartFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GraphFormat {
    Dot,
    Json,
}

fn reporter<'a, W: Write + 'a>(json: bool, out: W) -> Box<dyn Reporter + 'a> {
    if json { Box::new(JsonReporter::new(out)) } else { Box::new(TextReporter::new(out)) }
}

fn run_benchmarks(algorithms: &[Algorithm], args: &BenchArgs, out: &mut impl Write) -> Result<()> {
    let config = args.config();
    for &algorithm in algorithms {
        let report: BenchmarkReport =
            benchmark(algorithm, &config).with_context(|| format!("{algorithm} benchmark failed"))?;
        if args.rows {
            for row in &report.measurements {
                serde_json::to_writer(&mut *out, row)?;
                writeln!(out)?;
            }
        }
        let total: f64 = report.measurements.iter().map(|m| m.seconds).sum();
        info!(%algorithm, total_seconds = total, "reporting results");
        reporter(matches!(args.format, ChartFormat::Json), &mut *out)
            .report_chart(&Chart::from_report(&report), &report.series)
            .context("failed to write chart")?;
    }
    Ok(())
}

fn run_visualize(args: &VisualizeArgs, out: &mut impl Write) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let view = visualize(args.topology, args.nodes, &mut rng)?;
    info!(topology = %args.topology, nodes = args.nodes, edges = view.graph.edge_count(), "graph laid out");
    reporter(matches!(args.format, GraphFormat::Json), &mut *out)
        .report_graph(&view)
        .context("failed to write graph")?;
    Ok(())
}

/// The A* benchmark with default arguments stands in for a missing subcommand.
fn selected(command: Option<Command>) -> Command {
    command.unwrap_or_else(|| Command::Astar(BenchArgs::default()))
}

fn dispatch(command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::Dijkstra(args) => run_benchmarks(&[Algorithm::Dijkstra], &args, out),
        Command::BellmanFord(args) => run_benchmarks(&[Algorithm::BellmanFord], &args, out),
        Command::Astar(args) => run_benchmarks(&[Algorithm::AStar], &args, out),
        Command::All(args) => run_benchmarks(&Algorithm::ALL, &args, out),
        Command::Visualize(args) => run_visualize(&args, out),
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    dispatch(selected(cli.command), &mut out)?;
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}

fn main() -> ExitCode {
    if let Err(err) = logging::format_from_env().and_then(logging::init_logging) {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }
    if let Err(err) = try_main() {
        error!(error = %format!("{err:#}"), "command failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
