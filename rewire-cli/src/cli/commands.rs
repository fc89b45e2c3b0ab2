//! Command implementations and argument parsing for the rewire CLI.

use std::io::{self, Write};

use clap::{Args, Parser, Subcommand};
use rewire_core::{
    DEFAULT_DEGREE, DEFAULT_NODE_COUNT, DEFAULT_SEED, GraphError, GraphPipelineBuilder,
    GraphSnapshot, PipelineStep,
};
use thiserror::Error;
use tracing::{info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "rewire",
    about = "Generate a random regular graph and apply rewiring steps."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Generate a graph, apply the configured steps, and print a summary.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Number of nodes in the generated graph.
    #[arg(long = "nodes", default_value_t = DEFAULT_NODE_COUNT)]
    pub node_count: usize,

    /// Degree shared by every node of the generated graph.
    #[arg(long, default_value_t = DEFAULT_DEGREE)]
    pub degree: usize,

    /// Seed for the random number generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Transformation to apply after generation: `rewire`, `append`, or
    /// `append:<count>`. Repeat to chain steps in order.
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<String>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core configuration or generation failed.
    #[error(transparent)]
    Core(#[from] GraphError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Seed the pipeline ran with.
    pub seed: u64,
    /// Snapshots in stage order, starting with the generated graph.
    pub snapshots: Vec<GraphSnapshot>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when a step fails to parse or the generation
/// parameters are rejected.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use rewire_cli::cli::{Cli, Command, RunCommand, run_cli};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         node_count: 8,
///         degree: 2,
///         seed: 1,
///         steps: vec!["rewire".into(), "append:2".into()],
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.snapshots.len(), 3);
/// # Ok(())
/// # }
/// ```
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => run_command(run),
    }
}

#[instrument(
    name = "cli.run",
    err,
    skip(command),
    fields(nodes = command.node_count, degree = command.degree, seed = command.seed),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let steps = parse_steps(&command.steps)?;
    let pipeline = GraphPipelineBuilder::new()
        .with_node_count(command.node_count)
        .with_degree(command.degree)
        .with_steps(steps)
        .with_seed(command.seed)
        .build()?;
    let snapshots = pipeline.run()?;
    info!(snapshots = snapshots.len(), "run completed");
    Ok(ExecutionSummary {
        seed: command.seed,
        snapshots,
    })
}

pub(super) fn parse_steps(raw: &[String]) -> Result<Vec<PipelineStep>, GraphError> {
    raw.iter().map(|step| step.parse()).collect()
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Each snapshot occupies one tab-separated line carrying its index, stage
/// label, node count, and edge count.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use rewire_cli::cli::{ExecutionSummary, render_summary};
/// # use rewire_core::GraphPipelineBuilder;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let snapshots = GraphPipelineBuilder::new()
///     .with_node_count(6)
///     .with_degree(2)
///     .build()?
///     .run()?;
/// let summary = ExecutionSummary { seed: 0, snapshots };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "snapshots: 1\n0\tgenerate\tnodes=6\tedges=6\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "snapshots: {}", summary.snapshots.len())?;
    for snapshot in &summary.snapshots {
        writeln!(
            writer,
            "{}\t{}\tnodes={}\tedges={}",
            snapshot.index(),
            snapshot.label(),
            snapshot.node_count(),
            snapshot.edge_count()
        )?;
    }
    Ok(())
}
