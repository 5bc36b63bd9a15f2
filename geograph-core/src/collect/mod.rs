//! Sample collectors fed by a growth run.
//!
//! A [`StatsCollector`] is offered the graph at every sampling step and
//! decides what to keep. Collectors own their samples and render them as a
//! text report once the run finishes.

mod report;

use std::io::{self, Write};

use tracing::debug;

use crate::{
    error::Result,
    graph::ProximityGraph,
    point::Point,
    statistics::{BallStatistics, PathStatistics},
};

pub use report::{ReportHeader, write_report};

/// Receives graph snapshots during a run and writes a report afterwards.
pub trait StatsCollector {
    /// Records whatever the collector measures on `graph` at insertion
    /// `step`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::GraphError`] when the measurement itself fails.
    fn update(&mut self, graph: &ProximityGraph, step: usize) -> Result<()>;

    /// Writes the column line followed by one row per stored sample.
    ///
    /// # Errors
    ///
    /// Propagates any I/O failure from `out`.
    fn write_report(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Short name used in logs.
    fn name(&self) -> &str;
}

/// One connected route measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSample {
    /// Insertion step at which the sample was taken.
    pub n: usize,
    /// Hop count including both snapping legs.
    pub num_hops: usize,
    /// Route length including both snapping legs.
    pub path_length: f64,
    /// Summed snapping distance.
    pub nn_distance: f64,
    /// Largest deviation from the straight line.
    pub wander_distance: f64,
}

impl PathSample {
    fn new(n: usize, stats: &PathStatistics) -> Self {
        Self {
            n,
            num_hops: stats.num_hops(),
            path_length: stats.path_length(),
            nn_distance: stats.nn_distance(),
            wander_distance: stats.wander_distance(),
        }
    }
}

/// Records route statistics between two fixed query points.
///
/// Disconnected samples are counted but not stored.
#[derive(Clone, Debug)]
pub struct PathTable {
    from: Point,
    to: Point,
    samples: Vec<PathSample>,
    discarded: usize,
}

impl PathTable {
    /// Column line written before the rows.
    pub const COLUMNS: [&'static str; 5] =
        ["n", "num_hops", "path_length", "nn_distance", "wander_distance"];

    /// Creates an empty table measuring routes from `from` to `to`.
    #[must_use]
    pub fn new(from: Point, to: Point) -> Self {
        Self {
            from,
            to,
            samples: Vec::new(),
            discarded: 0,
        }
    }

    /// Returns the stored samples in the order they were taken.
    #[must_use]
    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    /// Returns how many disconnected samples were dropped.
    #[must_use]
    #[rustfmt::skip]
    pub const fn discarded(&self) -> usize { self.discarded }

    /// Returns how many samples were stored at step `n` across all trials.
    #[must_use]
    pub fn count_at(&self, n: usize) -> usize {
        self.samples.iter().filter(|sample| sample.n == n).count()
    }
}

impl StatsCollector for PathTable {
    fn update(&mut self, graph: &ProximityGraph, step: usize) -> Result<()> {
        let stats = PathStatistics::new(&self.from, &self.to, graph)?;
        if stats.is_connected() {
            debug!(
                n = step,
                path_length = stats.path_length(),
                num_hops = stats.num_hops(),
                "recorded path sample"
            );
            self.samples.push(PathSample::new(step, &stats));
        } else {
            self.discarded += 1;
            debug!(n = step, "query points are disconnected; sample discarded");
        }
        Ok(())
    }

    fn write_report(&self, out: &mut dyn Write) -> io::Result<()> {
        report::write_row(out, Self::COLUMNS)?;
        for sample in &self.samples {
            writeln!(
                out,
                "{} {} {} {} {}",
                sample.n,
                sample.num_hops,
                sample.path_length,
                sample.nn_distance,
                sample.wander_distance
            )?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "paths"
    }
}

/// Records the ball around a fixed centre at every sampling step.
#[derive(Clone, Debug)]
pub struct BallTracker {
    center: Point,
    radius: f64,
    balls: Vec<(usize, Vec<Point>)>,
}

impl BallTracker {
    /// Creates a tracker for the ball of `radius` around `center`.
    #[must_use]
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            balls: Vec::new(),
        }
    }

    /// Returns the recorded balls as `(step, positions)` pairs.
    #[must_use]
    pub fn balls(&self) -> &[(usize, Vec<Point>)] {
        &self.balls
    }
}

impl StatsCollector for BallTracker {
    fn update(&mut self, graph: &ProximityGraph, step: usize) -> Result<()> {
        let ball = BallStatistics::new(graph, &self.center, self.radius)?;
        debug!(n = step, size = ball.len(), "recorded ball sample");
        self.balls.push((step, ball.into_points()));
        Ok(())
    }

    fn write_report(&self, out: &mut dyn Write) -> io::Result<()> {
        report::write_row(out, report::point_columns(self.center.dimension()))?;
        for (step, points) in &self.balls {
            for point in points {
                write!(out, "{step}")?;
                for coordinate in point.coords() {
                    write!(out, " {coordinate}")?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "ball"
    }
}
