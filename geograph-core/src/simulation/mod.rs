//! Growth runs: insert random points, shrink on a schedule and sample.
//!
//! A run inserts `vertex_count` points drawn from a [`UniformBox`] into a
//! [`ProximityGraph`] whose insertion threshold is the schedule value at the
//! warm-up size. After the warm-up, every `interval` insertions the graph is
//! shrunk to the schedule value for its current size and offered to each
//! collector. Trials are independent and seeded deterministically from the
//! run seed.

mod sampler;
mod schedule;

pub use sampler::UniformBox;
pub use schedule::ThresholdSchedule;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument};

use crate::{
    collect::StatsCollector,
    error::{GraphError, SimulationError},
    graph::ProximityGraph,
};

type Result<T> = core::result::Result<T, SimulationError>;

const SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Derives the generator seed for trial `trial` of a run seeded with `seed`.
///
/// Distinct trials receive well-mixed, distinct seeds so that neighbouring
/// trial indices do not produce correlated streams.
///
/// # Examples
/// ```
/// use geograph_core::derive_trial_seed;
///
/// assert_eq!(derive_trial_seed(7, 0), derive_trial_seed(7, 0));
/// assert_ne!(derive_trial_seed(7, 0), derive_trial_seed(7, 1));
/// ```
#[must_use]
pub fn derive_trial_seed(seed: u64, trial: usize) -> u64 {
    splitmix64(seed ^ (trial as u64).wrapping_add(1).wrapping_mul(SEED_SPACING))
}

fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Configures and constructs [`Simulation`] instances.
///
/// # Examples
/// ```
/// use geograph_core::{SimulationBuilder, ThresholdSchedule};
///
/// let simulation = SimulationBuilder::new()
///     .with_vertex_count(500)
///     .with_schedule(ThresholdSchedule::Constant(0.3))
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(simulation.vertex_count(), 500);
/// assert_eq!(simulation.warmup(), 50);
/// ```
#[derive(Clone, Debug)]
pub struct SimulationBuilder {
    vertex_count: usize,
    interval: usize,
    warmup: usize,
    schedule: ThresholdSchedule,
    low: f64,
    high: f64,
    dimension: usize,
    trials: usize,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self {
            vertex_count: 10_000,
            interval: 10,
            warmup: 50,
            schedule: ThresholdSchedule::default(),
            low: -0.5,
            high: 0.5,
            dimension: 2,
            trials: 1,
        }
    }
}

impl SimulationBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many points each trial inserts.
    #[must_use]
    pub fn with_vertex_count(mut self, vertex_count: usize) -> Self {
        self.vertex_count = vertex_count;
        self
    }

    /// Sets how many insertions separate consecutive samples.
    #[must_use]
    pub fn with_interval(mut self, interval: usize) -> Self {
        self.interval = interval;
        self
    }

    /// Sets how many insertions happen before the first sample.
    #[must_use]
    pub fn with_warmup(mut self, warmup: usize) -> Self {
        self.warmup = warmup;
        self
    }

    /// Sets the threshold schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: ThresholdSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Sets the sampling box bounds shared by every coordinate.
    #[must_use]
    pub fn with_sampling_box(mut self, low: f64, high: f64) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    /// Sets the dimension of sampled points.
    #[must_use]
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Sets how many independent trials [`Simulation::run`] performs.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Validates the configuration and constructs a [`Simulation`].
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError`] when the interval, warm-up or trial count
    /// is zero, when the warm-up is not below the vertex count, when the
    /// schedule parameter is not finite and positive, or when the sampling box
    /// is invalid.
    pub fn build(self) -> Result<Simulation> {
        if self.interval == 0 {
            return Err(SimulationError::ZeroInterval);
        }
        if self.warmup == 0 {
            return Err(SimulationError::ZeroWarmup);
        }
        if self.trials == 0 {
            return Err(SimulationError::ZeroTrials);
        }
        if self.warmup >= self.vertex_count {
            return Err(SimulationError::WarmupExceedsVertexCount {
                warmup: self.warmup,
                vertex_count: self.vertex_count,
            });
        }
        self.schedule.validate()?;
        let sampler = UniformBox::new(self.low, self.high, self.dimension)?;

        Ok(Simulation {
            vertex_count: self.vertex_count,
            interval: self.interval,
            warmup: self.warmup,
            schedule: self.schedule,
            sampler,
            trials: self.trials,
        })
    }
}

/// Totals reported by [`Simulation::run`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of trials performed.
    pub trials: usize,
    /// Sampling steps offered to the collectors across all trials.
    pub samples: usize,
    /// Vertex count of the final graph of the last trial.
    pub vertex_count: usize,
    /// Edge count of the final graph of the last trial.
    pub edge_count: usize,
}

/// A validated growth-run configuration.
#[derive(Clone, Debug)]
pub struct Simulation {
    vertex_count: usize,
    interval: usize,
    warmup: usize,
    schedule: ThresholdSchedule,
    sampler: UniformBox,
    trials: usize,
}

impl Simulation {
    /// Points inserted per trial.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Insertions between samples.
    #[must_use]
    #[rustfmt::skip]
    pub const fn interval(&self) -> usize { self.interval }

    /// Insertions before the first sample.
    #[must_use]
    #[rustfmt::skip]
    pub const fn warmup(&self) -> usize { self.warmup }

    /// Threshold schedule.
    #[must_use]
    #[rustfmt::skip]
    pub const fn schedule(&self) -> ThresholdSchedule { self.schedule }

    /// Point sampler.
    #[must_use]
    #[rustfmt::skip]
    pub const fn sampler(&self) -> &UniformBox { &self.sampler }

    /// Trials per run.
    #[must_use]
    #[rustfmt::skip]
    pub const fn trials(&self) -> usize { self.trials }

    /// Returns the insertion indices at which collectors are updated.
    pub fn sample_steps(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.vertex_count).filter(|&step| step > self.warmup && step % self.interval == 0)
    }

    /// Runs every trial, seeding trial `t` with
    /// [`derive_trial_seed`]`(seed, t)`.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimulationError`] raised by a trial.
    ///
    /// # Examples
    /// ```
    /// use geograph_core::{PathTable, Point, SimulationBuilder};
    ///
    /// let simulation = SimulationBuilder::new()
    ///     .with_vertex_count(200)
    ///     .with_trials(2)
    ///     .build()
    ///     .expect("configuration is valid");
    /// let mut table = PathTable::new(
    ///     Point::try_from([-0.25, -0.25]).expect("finite"),
    ///     Point::try_from([0.25, 0.25]).expect("finite"),
    /// );
    /// let summary = simulation.run(7, &mut [&mut table]).expect("run succeeds");
    /// assert_eq!(summary.trials, 2);
    /// assert_eq!(table.samples().len() + table.discarded(), summary.samples);
    /// ```
    #[instrument(
        name = "growth.run",
        err,
        skip(self, collectors),
        fields(
            seed = seed,
            trials = self.trials,
            vertex_count = self.vertex_count,
            collectors = collectors.len()
        ),
    )]
    pub fn run(
        &self,
        seed: u64,
        collectors: &mut [&mut dyn StatsCollector],
    ) -> Result<RunSummary> {
        let mut summary = RunSummary {
            trials: 0,
            samples: 0,
            vertex_count: 0,
            edge_count: 0,
        };
        for trial in 0..self.trials {
            let mut rng = SmallRng::seed_from_u64(derive_trial_seed(seed, trial));
            let (samples, graph) = self.grow(&mut rng, collectors)?;
            summary.trials += 1;
            summary.samples += samples;
            summary.vertex_count = graph.vertex_count();
            summary.edge_count = graph.edge_count();
        }
        info!(
            trials = summary.trials,
            samples = summary.samples,
            edges = summary.edge_count,
            "growth run completed"
        );
        Ok(summary)
    }

    /// Runs one trial drawing points from `rng` and returns the final graph.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Graph`] when a graph operation or a
    /// collector update fails.
    pub fn run_trial<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        collectors: &mut [&mut dyn StatsCollector],
    ) -> Result<ProximityGraph> {
        self.grow(rng, collectors).map(|(_, graph)| graph)
    }

    #[instrument(
        name = "growth.trial",
        err,
        skip_all,
        fields(vertex_count = self.vertex_count, interval = self.interval, warmup = self.warmup),
    )]
    fn grow<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        collectors: &mut [&mut dyn StatsCollector],
    ) -> Result<(usize, ProximityGraph)> {
        let mut graph = ProximityGraph::new(
            self.sampler.dimension(),
            self.schedule.threshold(self.warmup),
        )?;
        let mut samples = 0_usize;
        for step in 0..self.vertex_count {
            graph.add_vertex(self.sampler.sample(rng).map_err(GraphError::from)?)?;
            if step <= self.warmup || step % self.interval != 0 {
                continue;
            }
            graph.shrink(self.schedule.threshold(step))?;
            for collector in collectors.iter_mut() {
                collector.update(&graph, step)?;
            }
            samples += 1;
            debug!(
                n = step,
                edges = graph.edge_count(),
                threshold = self.schedule.threshold(step),
                "sampled graph"
            );
        }
        Ok((samples, graph))
    }
}
