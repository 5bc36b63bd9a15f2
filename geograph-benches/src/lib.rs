//! Benchmark support for geograph.
//!
//! Provides seeded random graphs and parameter labels shared by the
//! Criterion benchmarks for shortest paths, route statistics and growth runs.

pub mod error;
pub mod params;
pub mod source;
