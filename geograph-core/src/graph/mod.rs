//! Incremental proximity graph.
//!
//! Vertices are inserted one at a time and connected to every existing vertex
//! closer than the insertion threshold. Edges are stored as mirrored
//! [`HalfEdge`] pairs and only ever removed by [`ProximityGraph::shrink`].
//! Nearest-vertex queries scan every vertex; there is no spatial index.

mod invariants;

use tracing::debug;

use crate::{
    error::{GeometryError, GraphError, Result},
    point::Point,
};

/// Dense, zero-based vertex identifier assigned in insertion order.
pub type VertexId = usize;

/// One direction of an undirected connection.
///
/// # Examples
/// ```
/// use geograph_core::HalfEdge;
///
/// let edge = HalfEdge::new(3, 0.5);
/// assert_eq!(edge.to(), 3);
/// assert_eq!(edge.weight(), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfEdge {
    to: VertexId,
    weight: f64,
}

impl HalfEdge {
    /// Creates a half-edge pointing at `to` with the given weight.
    #[must_use]
    pub const fn new(to: VertexId, weight: f64) -> Self {
        Self { to, weight }
    }

    /// Returns the vertex this half-edge points at.
    #[must_use]
    #[rustfmt::skip]
    pub const fn to(&self) -> VertexId { self.to }

    /// Returns the Euclidean length recorded when the edge was created.
    #[must_use]
    #[rustfmt::skip]
    pub const fn weight(&self) -> f64 { self.weight }
}

/// Random geometric graph with a shrinking edge threshold.
///
/// # Examples
/// ```
/// use geograph_core::{GraphError, Point, ProximityGraph};
///
/// let mut graph = ProximityGraph::new(2, 1.1)?;
/// let a = graph.add_vertex(Point::try_from([0.0, 0.0])?)?;
/// let b = graph.add_vertex(Point::try_from([1.0, 0.0])?)?;
/// assert_eq!((a, b), (0, 1));
/// assert_eq!(graph.edge_count(), 1);
///
/// graph.shrink(0.5)?;
/// assert_eq!(graph.edge_count(), 0);
/// assert_eq!(graph.closest(&Point::try_from([0.9, 0.0])?)?, Some(b));
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ProximityGraph {
    dimension: usize,
    threshold: f64,
    edge_count: usize,
    positions: Vec<Point>,
    adjacency: Vec<Vec<HalfEdge>>,
}

impl ProximityGraph {
    /// Creates an empty graph over `dimension`-dimensional points.
    ///
    /// Vertices inserted later are connected when their distance is strictly
    /// below `threshold`. An infinite threshold yields a complete graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::ZeroDimension`] when `dimension == 0` and
    /// [`GraphError::InvalidThreshold`] when `threshold` is NaN or not
    /// strictly positive.
    pub fn new(dimension: usize, threshold: f64) -> Result<Self> {
        if dimension == 0 {
            return Err(GraphError::ZeroDimension);
        }
        if threshold.is_nan() || threshold <= 0.0 {
            return Err(GraphError::InvalidThreshold { value: threshold });
        }
        Ok(Self {
            dimension,
            threshold,
            edge_count: 0,
            positions: Vec::new(),
            adjacency: Vec::new(),
        })
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns whether the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns the number of undirected edges.
    #[must_use]
    #[rustfmt::skip]
    pub const fn edge_count(&self) -> usize { self.edge_count }

    /// Returns the threshold used when inserting vertices.
    ///
    /// [`ProximityGraph::shrink`] does not change this value.
    #[must_use]
    #[rustfmt::skip]
    pub const fn threshold(&self) -> f64 { self.threshold }

    /// Returns the dimension shared by every vertex position.
    #[must_use]
    #[rustfmt::skip]
    pub const fn dimension(&self) -> usize { self.dimension }

    /// Appends a vertex at `position` and connects it to every existing vertex
    /// strictly closer than the insertion threshold.
    ///
    /// Runs in time linear in the number of vertices already present. The
    /// returned id equals the vertex count before insertion.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Geometry`] wrapping
    /// [`GeometryError::DimensionMismatch`] when `position` does not match the
    /// graph dimension. The graph is left untouched in that case.
    pub fn add_vertex(&mut self, position: Point) -> Result<VertexId> {
        self.ensure_dimension(&position)?;
        let id = self.positions.len();

        let mut out_edges = Vec::new();
        for (existing, (other, links)) in self
            .positions
            .iter()
            .zip(self.adjacency.iter_mut())
            .enumerate()
        {
            let distance = position.distance(other)?;
            if distance < self.threshold {
                out_edges.push(HalfEdge::new(existing, distance));
                links.push(HalfEdge::new(id, distance));
            }
        }

        self.edge_count = self.edge_count.saturating_add(out_edges.len());
        self.positions.push(position);
        self.adjacency.push(out_edges);
        Ok(id)
    }

    /// Returns the outgoing half-edges of `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] for an unknown vertex.
    pub fn links(&self, vertex: VertexId) -> Result<&[HalfEdge]> {
        self.adjacency
            .get(vertex)
            .map(Vec::as_slice)
            .ok_or(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
    }

    /// Returns the fixed position of `vertex`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] for an unknown vertex.
    pub fn position(&self, vertex: VertexId) -> Result<&Point> {
        self.positions
            .get(vertex)
            .ok_or(GraphError::VertexOutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
    }

    /// Returns every vertex position in id order.
    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Iterates over every undirected edge once as `(lower, higher, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId, f64)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(source, links)| {
                links
                    .iter()
                    .filter(move |edge| source < edge.to)
                    .map(move |edge| (source, edge.to, edge.weight))
            })
    }

    /// Removes every half-edge whose weight is at least `new_threshold`.
    ///
    /// The insertion threshold is left unchanged, so vertices added afterwards
    /// still connect using [`ProximityGraph::threshold`]. Shrinking twice to
    /// the same value is a no-op the second time.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidThreshold`] when `new_threshold` is NaN or
    /// negative and [`GraphError::ThresholdIncrease`] when it exceeds the
    /// insertion threshold.
    pub fn shrink(&mut self, new_threshold: f64) -> Result<()> {
        if new_threshold.is_nan() || new_threshold < 0.0 {
            return Err(GraphError::InvalidThreshold {
                value: new_threshold,
            });
        }
        if new_threshold > self.threshold {
            return Err(GraphError::ThresholdIncrease {
                current: self.threshold,
                requested: new_threshold,
            });
        }

        let mut half_edges = 0_usize;
        for links in &mut self.adjacency {
            links.retain(|edge| edge.weight < new_threshold);
            half_edges = half_edges.saturating_add(links.len());
        }

        let remaining = half_edges / 2;
        debug!(
            threshold = new_threshold,
            removed = self.edge_count.saturating_sub(remaining),
            edges = remaining,
            vertices = self.vertex_count(),
            "shrank proximity graph"
        );
        self.edge_count = remaining;
        Ok(())
    }

    /// Returns the vertex nearest to `query`, or `None` for an empty graph.
    ///
    /// Every vertex is inspected. When several vertices are equally close the
    /// lowest id wins.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Geometry`] when `query` does not match the graph
    /// dimension.
    pub fn closest(&self, query: &Point) -> Result<Option<VertexId>> {
        self.ensure_dimension(query)?;
        let mut best: Option<(VertexId, f64)> = None;
        for (id, position) in self.positions.iter().enumerate() {
            let distance = query.distance(position)?;
            match best {
                Some((_, best_distance)) if distance >= best_distance => {}
                _ => best = Some((id, distance)),
            }
        }
        Ok(best.map(|(id, _)| id))
    }

    /// Resolves `query` to its nearest vertex and the distance to it.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyGraph`] when there are no vertices and
    /// [`GraphError::Geometry`] on a dimension mismatch.
    pub fn snap(&self, query: &Point) -> Result<(VertexId, f64)> {
        let vertex = self.closest(query)?.ok_or(GraphError::EmptyGraph)?;
        let distance = query.distance(self.position(vertex)?)?;
        Ok((vertex, distance))
    }

    fn ensure_dimension(&self, point: &Point) -> Result<()> {
        if point.dimension() == self.dimension {
            Ok(())
        } else {
            Err(GeometryError::DimensionMismatch {
                expected: self.dimension,
                actual: point.dimension(),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests;
