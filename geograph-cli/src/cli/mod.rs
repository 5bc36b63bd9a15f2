//! Command-line orchestration for seeded growth runs.
//!
//! Each subcommand grows random proximity graphs with a shared set of growth
//! parameters and feeds one collector, whose report is written to a file or
//! to stdout.

mod commands;

pub use commands::{
    BallCommand, Cli, CliError, CollectedReport, Command, ExecutionSummary, GrowthArgs,
    PathsCommand, PointParseError, parse_point, render_summary, run_cli, write_output,
};

#[cfg(test)]
mod test_helpers;
