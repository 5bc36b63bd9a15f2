//! Shared helpers for geograph-core integration tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::fs;
use std::path::PathBuf;

use geograph_core::{Point, ProximityGraph};
use serde::Deserialize;

/// Builds a point from raw coordinates.
#[must_use]
pub fn point(coords: &[f64]) -> Point {
    Point::new(coords.to_vec()).expect("fixture coordinates are finite")
}

/// Inserts `points` in order into a fresh graph.
#[must_use]
pub fn build_graph(dimension: usize, threshold: f64, points: &[Vec<f64>]) -> ProximityGraph {
    let mut graph = ProximityGraph::new(dimension, threshold).expect("valid graph parameters");
    for coords in points {
        graph.add_vertex(point(coords)).expect("matching dimension");
    }
    graph
}

/// Expected measurements for one route through a fixture graph.
#[derive(Debug, Deserialize)]
pub struct RouteCase {
    pub from: Vec<f64>,
    pub to: Vec<f64>,
    pub path_length: f64,
    pub nn_distance: f64,
    pub num_hops: usize,
    #[serde(default)]
    pub wander_distance: Option<f64>,
}

/// Expected size of one ball in a fixture graph.
#[derive(Debug, Deserialize)]
pub struct BallCase {
    pub center: Vec<f64>,
    pub radius: f64,
    pub size: usize,
}

/// Points, threshold and expectations loaded from `tests/fixtures`.
#[derive(Debug, Deserialize)]
pub struct GraphFixture {
    pub threshold: f64,
    pub points: Vec<Vec<f64>>,
    #[serde(default)]
    pub routes: Vec<RouteCase>,
    #[serde(default)]
    pub balls: Vec<BallCase>,
}

impl GraphFixture {
    /// Loads `tests/fixtures/<name>.json`.
    #[must_use]
    pub fn load(name: &str) -> Self {
        let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(format!("{name}.json"));
        let raw = fs::read_to_string(&path).expect("fixture file is readable");
        serde_json::from_str(&raw).expect("fixture is valid JSON")
    }

    /// Dimension shared by the fixture points.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.points.first().map_or(0, Vec::len)
    }

    /// Builds the fixture graph.
    #[must_use]
    pub fn graph(&self) -> ProximityGraph {
        build_graph(self.dimension(), self.threshold, &self.points)
    }
}
