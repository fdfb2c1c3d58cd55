//! Entry point for the `smallworld` binary.
//!
//! Runs one probability sweep, writes the chart, prints a short summary to
//! stdout and maps failures to a non-zero exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use smallworld_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("sweep failed")?;
    let mut writer = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, graph_code) = err
            .downcast_ref::<CliError>()
            .map(|CliError::Core(core)| (Some(core.code()), core.graph_code()))
            .unwrap_or((None, None));

        error!(
            error = %format_args!("{err:#}"),
            code = code.map(|code| field::display(code.as_str())),
            graph_code = graph_code.map(|code| field::display(code.as_str())),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not available until logging initialises"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
