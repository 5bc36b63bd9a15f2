//! Measurements taken on a graph snapshot.
//!
//! [`PathStatistics`] describes the shortest route between two query points
//! after snapping each to its nearest vertex. [`BallStatistics`] collects the
//! vertices within a graph-distance radius of a query point. Both borrow the
//! graph only while they are built.

mod line;

pub use line::LineDistance;

use crate::{
    error::Result,
    graph::ProximityGraph,
    point::Point,
    shortest_paths::{ShortestPathTree, UNREACHABLE},
};

/// Shortest-route measurements between two query points.
///
/// # Examples
/// ```
/// use geograph_core::{GraphError, PathStatistics, Point, ProximityGraph};
///
/// let mut graph = ProximityGraph::new(2, 1.1)?;
/// for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)] {
///     graph.add_vertex(Point::try_from([x, y])?)?;
/// }
///
/// let stats = PathStatistics::new(
///     &Point::try_from([-1.0, 0.0])?,
///     &Point::try_from([2.0, 1.0])?,
///     &graph,
/// )?;
/// assert_eq!(stats.path_length(), 4.0);
/// assert_eq!(stats.num_hops(), 4);
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathStatistics {
    path_length: f64,
    nn_distance: f64,
    wander_distance: f64,
    num_hops: usize,
}

impl PathStatistics {
    /// Measures the route from `from` to `to` through `graph`.
    ///
    /// Each query point is snapped to its nearest vertex. The route length
    /// includes both snapping legs, and the hop count includes them as two
    /// extra hops. Wander is the largest distance from the straight line
    /// `from`-`to` to either snapped vertex or any vertex on the route.
    ///
    /// When the snapped vertices are disconnected the statistics report
    /// [`UNREACHABLE`] for the length and wander and zero hops.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when the graph has no vertices and
    /// [`GraphError::Geometry`] when the query points coincide or do not match
    /// the graph dimension.
    ///
    /// [`GraphError::EmptyGraph`]: crate::GraphError::EmptyGraph
    /// [`GraphError::Geometry`]: crate::GraphError::Geometry
    pub fn new(from: &Point, to: &Point, graph: &ProximityGraph) -> Result<Self> {
        let line = LineDistance::new(from, to)?;
        let (start, start_snap) = graph.snap(from)?;
        let (end, end_snap) = graph.snap(to)?;
        let nn_distance = start_snap + end_snap;

        let tree = ShortestPathTree::new(graph, start)?;
        if !tree.has_path(end) {
            return Ok(Self {
                path_length: UNREACHABLE,
                nn_distance,
                wander_distance: UNREACHABLE,
                num_hops: 0,
            });
        }

        let path = tree.path_to(end)?;
        let mut wander_distance = line
            .distance(graph.position(start)?)?
            .max(line.distance(graph.position(end)?)?);
        for hop in &path {
            wander_distance = wander_distance.max(line.distance(graph.position(hop.to())?)?);
        }

        Ok(Self {
            path_length: tree.dist(end) + nn_distance,
            nn_distance,
            wander_distance,
            num_hops: path.len() + 2,
        })
    }

    /// Returns the route length including both snapping legs.
    #[must_use]
    #[rustfmt::skip]
    pub const fn path_length(&self) -> f64 { self.path_length }

    /// Returns the summed distance from each query point to its nearest
    /// vertex.
    #[must_use]
    #[rustfmt::skip]
    pub const fn nn_distance(&self) -> f64 { self.nn_distance }

    /// Returns the largest deviation of the route from the straight line.
    #[must_use]
    #[rustfmt::skip]
    pub const fn wander_distance(&self) -> f64 { self.wander_distance }

    /// Returns the number of hops, counting both snapping legs.
    #[must_use]
    #[rustfmt::skip]
    pub const fn num_hops(&self) -> usize { self.num_hops }

    /// Returns whether the snapped vertices are connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.path_length != UNREACHABLE
    }
}

/// Vertex positions within a graph-distance radius of a query point.
///
/// Distance is measured as the snapping leg from the centre to its nearest
/// vertex plus the shortest-path distance from that vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct BallStatistics {
    points: Vec<Point>,
}

impl BallStatistics {
    /// Collects every vertex strictly within `radius` of `center`, in vertex
    /// id order.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when the graph has no vertices and
    /// [`GraphError::Geometry`] when `center` does not match the graph
    /// dimension.
    ///
    /// [`GraphError::EmptyGraph`]: crate::GraphError::EmptyGraph
    /// [`GraphError::Geometry`]: crate::GraphError::Geometry
    pub fn new(graph: &ProximityGraph, center: &Point, radius: f64) -> Result<Self> {
        let (nearest, snap) = graph.snap(center)?;
        let tree = ShortestPathTree::new(graph, nearest)?;
        let points = graph
            .positions()
            .iter()
            .enumerate()
            .filter(|&(vertex, _)| tree.dist(vertex) + snap < radius)
            .map(|(_, position)| position.clone())
            .collect();
        Ok(Self { points })
    }

    /// Returns the collected positions in vertex id order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of collected positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns whether no vertex lies within the radius.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns whether `point` is one of the collected positions.
    #[must_use]
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    /// Consumes the statistics and returns the collected positions.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}
