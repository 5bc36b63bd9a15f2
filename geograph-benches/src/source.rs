//! Seeded random graphs for benchmarking.
//!
//! Points are drawn uniformly from the centred unit box, the same region the
//! growth driver samples by default, so benchmarked graphs resemble the ones
//! measured in real runs.

use geograph_core::{Point, ProximityGraph, ThresholdSchedule, UniformBox};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Errors raised for unusable synthetic graph configurations.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested vertex count was zero.
    #[error("vertex count must be greater than zero")]
    ZeroVertices,
}

/// Configuration for a synthetic graph.
#[derive(Clone, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices to insert.
    pub vertex_count: usize,
    /// Coordinates per point.
    pub dimension: usize,
    /// Connection threshold used while inserting.
    pub threshold: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl SyntheticGraphConfig {
    /// Square-box configuration using the default schedule's threshold for
    /// `vertex_count`, which keeps the graph close to connected.
    #[must_use]
    pub fn planar(vertex_count: usize, seed: u64) -> Self {
        Self {
            vertex_count,
            dimension: 2,
            threshold: ThresholdSchedule::default().threshold(vertex_count),
            seed,
        }
    }
}

/// Inserts `config.vertex_count` uniform points into a fresh graph.
///
/// # Errors
/// Returns [`SyntheticError::ZeroVertices`] for an empty request, or the
/// underlying error when the dimension or threshold is rejected.
///
/// # Examples
///
/// ```
/// use geograph_benches::source::{SyntheticGraphConfig, generate_graph};
///
/// let graph = generate_graph(&SyntheticGraphConfig::planar(50, 7)).expect("valid config");
/// assert_eq!(graph.vertex_count(), 50);
/// ```
pub fn generate_graph(config: &SyntheticGraphConfig) -> Result<ProximityGraph, BenchSetupError> {
    if config.vertex_count == 0 {
        return Err(SyntheticError::ZeroVertices.into());
    }
    let sampler = UniformBox::new(-0.5, 0.5, config.dimension)?;
    let mut graph = ProximityGraph::new(config.dimension, config.threshold)?;
    let mut rng = SmallRng::seed_from_u64(config.seed);
    for _ in 0..config.vertex_count {
        graph.add_vertex(sampler.sample(&mut rng)?)?;
    }
    Ok(graph)
}

/// Origin of `dimension`-space, the default ball centre.
///
/// # Errors
/// Returns an error when `dimension` is zero.
pub fn origin(dimension: usize) -> Result<Point, BenchSetupError> {
    Ok(Point::new(vec![0.0; dimension])?)
}
