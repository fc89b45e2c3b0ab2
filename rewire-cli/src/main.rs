//! `rewire` generates a random regular graph and applies each `--step`.
//!
//! On success stdout holds a `snapshots: N` header, then one line per
//! snapshot of the form `index<TAB>stage<TAB>nodes=..<TAB>edges=..`.
//! When the pipeline fails, stdout stays empty and the exit status is 1.
//! A single `rewire failed` event on stderr carries the error. For rejected
//! parameters it also carries the `GRAPH_INVALID_PARAMETERS` code.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use rewire_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to run pipeline")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to write summary")?;
    writer.flush().context("failed to flush stdout")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().map(|cli_error| match cli_error {
            CliError::Core(core) => core.code(),
        });
        error!(
            error = %err,
            code = code.map(|code| field::display(code.as_str())),
            "rewire failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Logging is unavailable when its own set-up fails"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
