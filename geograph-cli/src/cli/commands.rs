use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::ParseFloatError;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use geograph_core::{
    BallTracker, GeometryError, PathTable, Point, ReportHeader, RunSummary, Simulation,
    SimulationBuilder, SimulationError, StatsCollector, ThresholdSchedule, write_report,
};
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "geograph",
    author,
    version,
    about = "Grow random geometric graphs and measure routes through them"
)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Track shortest routes between two fixed query points.
    Paths(PathsCommand),
    /// Record the vertices within graph distance of a centre point.
    Ball(BallCommand),
}

impl Command {
    /// Stable name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Paths(_) => "paths",
            Self::Ball(_) => "ball",
        }
    }

    fn growth(&self) -> &GrowthArgs {
        match self {
            Self::Paths(command) => &command.growth,
            Self::Ball(command) => &command.growth,
        }
    }
}

/// Parameters shared by every growth run.
#[derive(Debug, Clone, Args)]
pub struct GrowthArgs {
    /// Vertices inserted per trial.
    #[arg(short = 'n', long = "vertices", default_value_t = 10_000)]
    pub vertices: usize,
    /// Insertions between samples.
    #[arg(long, default_value_t = 10)]
    pub interval: usize,
    /// Insertions before the first sample may be taken.
    #[arg(long, default_value_t = 50)]
    pub warmup: usize,
    /// Power-law exponent; the threshold after `n` insertions is `n^-exponent`.
    #[arg(long, default_value_t = 0.4, conflicts_with = "threshold")]
    pub exponent: f64,
    /// Fixed connection threshold replacing the power-law schedule.
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Independent graphs grown from derived seeds.
    #[arg(long, default_value_t = 1)]
    pub trials: usize,
    /// Base seed for the trial generators.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Lower bound of every sampled coordinate.
    #[arg(long, default_value_t = -0.5, allow_hyphen_values = true)]
    pub low: f64,
    /// Upper bound of every sampled coordinate.
    #[arg(long, default_value_t = 0.5, allow_hyphen_values = true)]
    pub high: f64,
    /// Number of coordinates per sampled point.
    #[arg(short = 'd', long, default_value_t = 2)]
    pub dimension: usize,
    /// Report destination; stdout when omitted.
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}

impl GrowthArgs {
    /// Threshold schedule selected by `--exponent` or `--threshold`.
    #[must_use]
    pub fn schedule(&self) -> ThresholdSchedule {
        self.threshold.map_or(
            ThresholdSchedule::PowerLaw {
                exponent: self.exponent,
            },
            ThresholdSchedule::Constant,
        )
    }

    fn simulation(&self) -> Result<Simulation, SimulationError> {
        SimulationBuilder::new()
            .with_vertex_count(self.vertices)
            .with_interval(self.interval)
            .with_warmup(self.warmup)
            .with_schedule(self.schedule())
            .with_sampling_box(self.low, self.high)
            .with_dimension(self.dimension)
            .with_trials(self.trials)
            .build()
    }

    fn header(&self) -> ReportHeader {
        let header = ReportHeader::new()
            .with("n", self.vertices)
            .with("interval", self.interval)
            .with("warmup", self.warmup)
            .with("trials", self.trials)
            .with("seed", self.seed)
            .with("dimension", self.dimension)
            .with("low", self.low)
            .with("high", self.high);
        match self.threshold {
            Some(threshold) => header.with("threshold", threshold),
            None => header.with("exponent", self.exponent),
        }
    }

    fn ensure_dimension(&self, argument: &'static str, point: &Point) -> Result<(), CliError> {
        if point.dimension() == self.dimension {
            Ok(())
        } else {
            Err(CliError::DimensionMismatch {
                argument,
                expected: self.dimension,
                actual: point.dimension(),
            })
        }
    }
}

/// Arguments for the `paths` subcommand.
#[derive(Debug, Clone, Args)]
pub struct PathsCommand {
    #[command(flatten)]
    pub growth: GrowthArgs,
    /// Start of the tracked route, as comma-separated coordinates.
    #[arg(long, value_parser = parse_point, default_value = "-0.25,-0.25", allow_hyphen_values = true)]
    pub from: Point,
    /// End of the tracked route, as comma-separated coordinates.
    #[arg(long, value_parser = parse_point, default_value = "0.25,0.25", allow_hyphen_values = true)]
    pub to: Point,
}

/// Arguments for the `ball` subcommand.
#[derive(Debug, Clone, Args)]
pub struct BallCommand {
    #[command(flatten)]
    pub growth: GrowthArgs,
    /// Centre of the tracked ball, as comma-separated coordinates.
    #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
    pub center: Point,
    /// Graph-distance radius of the ball.
    #[arg(long, default_value_t = 0.25)]
    pub radius: f64,
}

/// Errors raised while parsing a point argument.
#[derive(Debug, Error)]
pub enum PointParseError {
    /// A coordinate was not a floating-point number.
    #[error("invalid coordinate `{raw}`: {source}")]
    InvalidCoordinate {
        /// Offending text after trimming.
        raw: String,
        /// Underlying parse failure.
        #[source]
        source: ParseFloatError,
    },
    /// The coordinates did not form a valid point.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Parses comma-separated coordinates such as `-0.25,0.25` into a [`Point`].
///
/// # Errors
/// Returns [`PointParseError::InvalidCoordinate`] when a component is not a
/// number and [`PointParseError::Geometry`] when a coordinate is not finite.
pub fn parse_point(raw: &str) -> Result<Point, PointParseError> {
    let coords = raw
        .split(',')
        .map(|part| {
            let trimmed = part.trim();
            trimmed
                .parse::<f64>()
                .map_err(|source| PointParseError::InvalidCoordinate {
                    raw: trimmed.to_owned(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Point::new(coords)?)
}

/// Collector filled by a finished run.
#[derive(Debug)]
pub enum CollectedReport {
    /// Route measurements from `paths`.
    Paths(PathTable),
    /// Ball contents from `ball`.
    Ball(BallTracker),
}

impl CollectedReport {
    /// Returns the collector behind this report.
    #[must_use]
    pub fn collector(&self) -> &dyn StatsCollector {
        match self {
            Self::Paths(table) => table,
            Self::Ball(tracker) => tracker,
        }
    }

    fn collector_mut(&mut self) -> &mut dyn StatsCollector {
        match self {
            Self::Paths(table) => table,
            Self::Ball(tracker) => tracker,
        }
    }
}

/// Outcome of a successful CLI invocation.
#[derive(Debug)]
pub struct ExecutionSummary {
    /// Run parameters written above the report table.
    pub header: ReportHeader,
    /// Collector holding the measurements.
    pub report: CollectedReport,
    /// Totals reported by the growth driver.
    pub run: RunSummary,
    /// Requested report destination.
    pub output: Option<PathBuf>,
}

/// Errors emitted by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// The report file could not be created or written.
    #[error("failed to write report to `{}`: {source}", .path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing the report to stdout failed.
    #[error("failed to write report to stdout: {source}")]
    Stdout {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A query point does not match `--dimension`.
    #[error("`--{argument}` has {actual} coordinates but --dimension is {expected}")]
    DimensionMismatch {
        /// Argument carrying the point.
        argument: &'static str,
        /// Value of `--dimension`.
        expected: usize,
        /// Coordinates supplied.
        actual: usize,
    },
    /// The growth run rejected its parameters or failed.
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Executes the CLI command, returning the filled collector.
///
/// # Errors
/// Returns [`CliError`] when a query point does not match `--dimension` or
/// the growth run fails.
#[instrument(name = "cli.run", err, skip(cli), fields(command = cli.command.name()))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let growth = cli.command.growth().clone();
    let (header, report) = match cli.command {
        Command::Paths(PathsCommand { from, to, .. }) => {
            growth.ensure_dimension("from", &from)?;
            growth.ensure_dimension("to", &to)?;
            let header = with_point(with_point(growth.header(), "from", &from), "to", &to);
            (header, CollectedReport::Paths(PathTable::new(from, to)))
        }
        Command::Ball(BallCommand { center, radius, .. }) => {
            growth.ensure_dimension("center", &center)?;
            let header = with_point(growth.header(), "center", &center).with("radius", radius);
            (header, CollectedReport::Ball(BallTracker::new(center, radius)))
        }
    };
    execute(growth, header, report)
}

fn execute(
    growth: GrowthArgs,
    header: ReportHeader,
    mut report: CollectedReport,
) -> Result<ExecutionSummary, CliError> {
    let simulation = growth.simulation()?;
    let run = simulation.run(growth.seed, &mut [report.collector_mut()])?;
    info!(
        collector = report.collector().name(),
        samples = run.samples,
        trials = run.trials,
        "collection finished"
    );
    if let CollectedReport::Paths(table) = &report
        && table.discarded() > 0
    {
        warn!(
            discarded = table.discarded(),
            samples = run.samples,
            "disconnected path samples were discarded"
        );
    }
    Ok(ExecutionSummary {
        header,
        report,
        run,
        output: growth.output,
    })
}

fn with_point(header: ReportHeader, name: &str, point: &Point) -> ReportHeader {
    point
        .coords()
        .iter()
        .enumerate()
        .fold(header, |header, (index, value)| {
            header.with(format!("{name}_{index}"), value)
        })
}

/// Writes the parameter header followed by the collector's table.
///
/// # Errors
/// Returns any error produced by the underlying writer.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    write_report(&summary.header, summary.report.collector(), &mut writer)
}

/// Renders the report to `--output`, or to stdout when no path was given.
///
/// # Errors
/// Returns [`CliError::Io`] when the file cannot be created or written and
/// [`CliError::Stdout`] when stdout rejects the report.
pub fn write_output(summary: &ExecutionSummary) -> Result<(), CliError> {
    match summary.output.as_deref() {
        Some(path) => {
            let io_error = |source| CliError::Io {
                path: path.to_path_buf(),
                source,
            };
            let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
            render_summary(summary, &mut writer)
                .and_then(|()| writer.flush())
                .map_err(io_error)?;
            info!(path = %path.display(), "report written");
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            render_summary(summary, &mut writer)
                .and_then(|()| writer.flush())
                .map_err(|source| CliError::Stdout { source })?;
        }
    }
    Ok(())
}
