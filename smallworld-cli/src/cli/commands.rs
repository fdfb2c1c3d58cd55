use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use smallworld_core::{
    DEFAULT_DEGREE, DEFAULT_NODES, DEFAULT_SEED, DEFAULT_TRIALS, ExecutionStrategy,
    ExperimentBuilder, ExperimentError, GraphMetrics, ProbabilitySweep, RealizationMode,
    Reporter,
};
use smallworld_reporters_plot::ScatterPlotReporter;
use thiserror::Error;
use tracing::instrument;

const DEFAULT_SWEEP_STOP: f64 = 0.1;
const DEFAULT_SWEEP_STEP: f64 = 0.0005;

/// Top-level CLI options parsed by [`clap`]. Every option has a default, so
/// the bare command runs the reference experiment.
#[derive(Debug, Parser, Clone)]
#[command(
    name = "smallworld",
    about = "Sweep Watts–Strogatz rewiring probabilities and chart clustering and path length."
)]
pub struct Cli {
    /// Generate one graph per probability or average several.
    #[arg(long, value_enum, default_value_t = ModeArg::Multi)]
    pub mode: ModeArg,

    /// Number of nodes in the ring lattice.
    #[arg(long, default_value_t = DEFAULT_NODES)]
    pub nodes: usize,

    /// Lattice degree (even, smaller than the node count).
    #[arg(long, default_value_t = DEFAULT_DEGREE)]
    pub degree: usize,

    /// Realizations per probability in multi mode.
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Seed for every realization.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Exclusive upper bound of the probability sweep, which starts at 0.
    #[arg(long = "sweep-stop", default_value_t = DEFAULT_SWEEP_STOP)]
    pub sweep_stop: f64,

    /// Spacing between consecutive probabilities.
    #[arg(long = "sweep-step", default_value_t = DEFAULT_SWEEP_STEP)]
    pub sweep_step: f64,

    /// Run every realization on the calling thread.
    #[arg(long)]
    pub sequential: bool,

    /// Chart path (defaults to `single_realization.png` or
    /// `multi_realization.png` in the working directory).
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Realization modes selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// One graph per probability.
    Single,
    /// `--trials` graphs per probability, averaged.
    Multi,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration, sweep or reporting failed in the core.
    #[error(transparent)]
    Core(#[from] ExperimentError),
}

/// Summarises the outcome of executing the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionSummary {
    /// Mode the sweep ran in.
    pub mode: RealizationMode,
    /// Lattice node count.
    pub nodes: usize,
    /// Lattice degree.
    pub degree: usize,
    /// Number of sweep values charted.
    pub points: usize,
    /// Unnormalized metrics at `p = 0`.
    pub baseline: GraphMetrics,
    /// Where the chart was written.
    pub output: PathBuf,
}

/// Executes the experiment described by `cli` and writes the scatter chart.
///
/// # Errors
/// Returns [`CliError`] when configuration, generation, measurement or
/// chart output fails. No chart is written on failure.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use clap::Parser;
/// # use smallworld_cli::cli::{Cli, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = tempfile::tempdir()?;
/// let output = dir.path().join("chart.png");
/// let cli = Cli::parse_from([
///     "smallworld", "--mode", "single", "--nodes", "20", "--degree", "4",
///     "--sweep-stop", "0.3", "--sweep-step", "0.1",
///     "--output", output.to_str().ok_or("non-UTF-8 path")?,
/// ]);
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.points, 3);
/// assert!(output.exists());
/// # Ok(())
/// # }
/// ```
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    run_with_reporter(cli, &ScatterPlotReporter::new())
}

#[instrument(
    name = "cli.run",
    err,
    skip(cli, reporter),
    fields(mode = ?cli.mode, nodes = cli.nodes, degree = cli.degree),
)]
pub(super) fn run_with_reporter<R: Reporter>(
    cli: Cli,
    reporter: &R,
) -> Result<ExecutionSummary, CliError> {
    let strategy = if cli.sequential {
        ExecutionStrategy::Sequential
    } else {
        ExecutionStrategy::Parallel
    };
    let experiment = ExperimentBuilder::new()
        .with_nodes(cli.nodes)
        .with_degree(cli.degree)
        .with_trials(cli.trials)
        .with_seed(cli.seed)
        .with_execution_strategy(strategy)
        .build()?;
    let sweep = ProbabilitySweep::arange(0.0, cli.sweep_stop, cli.sweep_step)?;
    let mode = match cli.mode {
        ModeArg::Single => RealizationMode::Single,
        ModeArg::Multi => experiment.multi_mode(),
    };
    let output = cli
        .output
        .unwrap_or_else(|| PathBuf::from(mode.artifact_name()));

    let series = experiment.report(mode, &sweep, reporter, &output)?;
    Ok(ExecutionSummary {
        mode,
        nodes: experiment.lattice().nodes(),
        degree: experiment.lattice().degree(),
        points: series.len(),
        baseline: series.baseline(),
        output,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use smallworld_cli::cli::{ExecutionSummary, render_summary};
/// # use smallworld_core::{GraphMetrics, RealizationMode};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     mode: RealizationMode::Single,
///     nodes: 20,
///     degree: 4,
///     points: 3,
///     baseline: GraphMetrics { clustering: 0.5, path_length: 2.5 },
///     output: "single_realization.png".into(),
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.contains("output: single_realization.png"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "mode: {}", summary.mode)?;
    writeln!(writer, "nodes: {}", summary.nodes)?;
    writeln!(writer, "degree: {}", summary.degree)?;
    writeln!(writer, "trials: {}", summary.mode.trials())?;
    writeln!(writer, "points: {}", summary.points)?;
    writeln!(
        writer,
        "baseline clustering: {:.6}",
        summary.baseline.clustering
    )?;
    writeln!(
        writer,
        "baseline path length: {:.6}",
        summary.baseline.path_length
    )?;
    writeln!(writer, "output: {}", summary.output.display())?;
    Ok(())
}
