//! Benchmark setup error type.
//!
//! Lets setup code propagate failures with `?` so each benchmark panics
//! once, with context, instead of unwrapping along the way.

use geograph_core::{GeometryError, GraphError, SimulationError};

use crate::source::SyntheticError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Synthetic graph configuration was rejected.
    #[error("synthetic graph generation failed: {0}")]
    Synthetic(#[from] SyntheticError),
    /// A graph operation failed while preparing inputs.
    #[error("graph operation failed: {0}")]
    Graph(#[from] GraphError),
    /// A query point could not be built.
    #[error("invalid query point: {0}")]
    Geometry(#[from] GeometryError),
    /// Growth parameters were rejected.
    #[error("simulation setup failed: {0}")]
    Simulation(#[from] SimulationError),
}
