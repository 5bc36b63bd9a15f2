//! `geograph` entry point.
//!
//! Parses arguments, runs the requested growth experiment and writes its
//! report. Failures are logged with their stable error codes before the
//! process exits unsuccessfully.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use geograph_cli::{
    cli::{Cli, CliError, run_cli, write_output},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    write_output(&summary).context("failed to emit report")?;
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
            .and_then(|cli_error| match cli_error {
                CliError::Simulation(simulation) => {
                    Some((Some(simulation.code()), simulation.graph_code()))
                }
                _ => None,
            })
            .unwrap_or((None, None));

        error!(
            error = %err,
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
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
