//! Helpers shared by the CLI unit tests.

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

/// Parses `geograph <args>`, panicking on rejection.
pub(super) fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("geograph").chain(args.iter().copied());
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments {args:?} rejected: {err}"),
    }
}

/// Parses `args`, filling any growth size flag they omit with a small value.
pub(super) fn parse_small(args: &[&str]) -> Cli {
    let mut argv = args.to_vec();
    for (flag, value) in [("--vertices", "120"), ("--interval", "10"), ("--warmup", "50")] {
        if !args.contains(&flag) {
            argv.extend([flag, value]);
        }
    }
    parse(&argv)
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
