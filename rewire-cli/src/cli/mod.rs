//! Command-line interface orchestration for the rewire pipeline.
//!
//! The CLI offers a single `run` command that generates a random regular
//! graph, applies the requested steps, and summarises every snapshot.

mod commands;

pub use commands::{Cli, CliError, Command, ExecutionSummary, RunCommand, render_summary, run_cli};
