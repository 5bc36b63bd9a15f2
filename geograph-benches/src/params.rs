//! Benchmark parameter labels.

use std::fmt;

/// Size and connection threshold of a benchmarked graph.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Connection threshold used while inserting.
    pub threshold: f64,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},r={:.4}", self.vertex_count, self.threshold)
    }
}

/// Growth run size used by the end-to-end benchmark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthBenchParams {
    /// Vertices inserted per trial.
    pub vertex_count: usize,
    /// Insertions between samples.
    pub interval: usize,
}

impl fmt::Display for GrowthBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},every={}", self.vertex_count, self.interval)
    }
}
