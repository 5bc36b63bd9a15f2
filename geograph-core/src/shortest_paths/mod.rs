//! Single-source shortest paths over a [`ProximityGraph`] snapshot.
//!
//! [`ShortestPathTree`] runs Dijkstra's algorithm with an eagerly initialised
//! queue: every vertex is pushed up front (the source at zero, the rest at
//! [`UNREACHABLE`]) and relaxations push fresh entries instead of decreasing
//! keys. Stale entries are skipped when popped because their vertex is
//! already settled. Ties in the queue never change the final distances; they
//! may only change which of several equal-length predecessors is recorded.

use std::{cmp::Ordering, collections::BinaryHeap};

use crate::{
    error::{GraphError, Result},
    graph::{HalfEdge, ProximityGraph, VertexId},
};

/// Distance reported for vertices the source cannot reach.
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Min-ordered queue entry: the heap pops the smallest distance first and
/// breaks ties towards the lower vertex id.
#[derive(Clone, Copy, Debug)]
struct QueueEntry {
    distance: f64,
    vertex: VertexId,
}

impl Eq for QueueEntry {}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path distances and predecessors from one source vertex.
///
/// The tree copies everything it needs during construction, so the graph may
/// be mutated afterwards; the tree then describes the graph as it was.
///
/// # Examples
/// ```
/// use geograph_core::{GraphError, Point, ProximityGraph, ShortestPathTree};
///
/// let mut graph = ProximityGraph::new(2, 1.01)?;
/// for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)] {
///     graph.add_vertex(Point::try_from([x, y])?)?;
/// }
///
/// let tree = ShortestPathTree::new(&graph, 0)?;
/// assert_eq!(tree.dist(2), 2.0);
/// let hops: Vec<_> = tree.path_to(2)?.iter().map(|edge| edge.to()).collect();
/// assert_eq!(hops, [1, 2]);
/// # Ok::<(), GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ShortestPathTree {
    source: VertexId,
    distances: Vec<f64>,
    predecessors: Vec<Option<HalfEdge>>,
}

impl ShortestPathTree {
    /// Computes shortest paths from `source` to every vertex of `graph`.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] when `source` is not a vertex
    /// of `graph`.
    pub fn new(graph: &ProximityGraph, source: VertexId) -> Result<Self> {
        let vertex_count = graph.vertex_count();
        if source >= vertex_count {
            return Err(GraphError::VertexOutOfRange {
                vertex: source,
                vertex_count,
            });
        }

        let mut distances = vec![UNREACHABLE; vertex_count];
        let mut predecessors = vec![None; vertex_count];
        let mut visited = vec![false; vertex_count];
        if let Some(slot) = distances.get_mut(source) {
            *slot = 0.0;
        }

        let mut queue = initialise_queue(vertex_count, source);
        while let Some(QueueEntry { vertex, .. }) = queue.pop() {
            let Some(settled) = visited.get_mut(vertex) else {
                continue;
            };
            if *settled {
                continue;
            }
            *settled = true;

            let base = distances.get(vertex).copied().unwrap_or(UNREACHABLE);
            for edge in graph.links(vertex)? {
                let candidate = base + edge.weight();
                let Some(current) = distances.get_mut(edge.to()) else {
                    continue;
                };
                if candidate < *current {
                    *current = candidate;
                    if let Some(predecessor) = predecessors.get_mut(edge.to()) {
                        *predecessor = Some(HalfEdge::new(vertex, edge.weight()));
                    }
                    queue.push(QueueEntry {
                        distance: candidate,
                        vertex: edge.to(),
                    });
                }
            }
        }

        Ok(Self {
            source,
            distances,
            predecessors,
        })
    }

    /// Returns the source vertex of the tree.
    #[must_use]
    #[rustfmt::skip]
    pub const fn source(&self) -> VertexId { self.source }

    /// Returns the shortest distance from the source to `end`.
    ///
    /// Unreachable vertices, and ids outside the graph snapshot, report
    /// [`UNREACHABLE`].
    #[must_use]
    pub fn dist(&self, end: VertexId) -> f64 {
        self.distances.get(end).copied().unwrap_or(UNREACHABLE)
    }

    /// Returns whether `end` is reachable from the source.
    #[must_use]
    pub fn has_path(&self, end: VertexId) -> bool {
        self.dist(end) != UNREACHABLE
    }

    /// Reconstructs the shortest path from the source to `end`.
    ///
    /// Each element is the vertex reached by one hop together with the weight
    /// of the edge used, ordered from the source outwards. The path to the
    /// source itself is empty.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexOutOfRange`] when `end` is outside the
    /// snapshot and [`GraphError::NoPath`] when it is unreachable; check
    /// [`ShortestPathTree::has_path`] first to avoid the latter.
    pub fn path_to(&self, end: VertexId) -> Result<Vec<HalfEdge>> {
        if end >= self.distances.len() {
            return Err(GraphError::VertexOutOfRange {
                vertex: end,
                vertex_count: self.distances.len(),
            });
        }
        if !self.has_path(end) {
            return Err(GraphError::NoPath {
                from: self.source,
                to: end,
            });
        }

        let mut path = Vec::new();
        let mut current = end;
        while current != self.source {
            let Some(Some(predecessor)) = self.predecessors.get(current) else {
                return Err(GraphError::InvariantViolation {
                    invariant: "predecessor_chain",
                    message: format!("reachable vertex {current} has no predecessor"),
                });
            };
            path.push(HalfEdge::new(current, predecessor.weight()));
            current = predecessor.to();
        }
        path.reverse();
        Ok(path)
    }
}

fn initialise_queue(vertex_count: usize, source: VertexId) -> BinaryHeap<QueueEntry> {
    let mut queue = BinaryHeap::with_capacity(vertex_count);
    queue.push(QueueEntry {
        distance: 0.0,
        vertex: source,
    });
    for vertex in (0..vertex_count).filter(|&vertex| vertex != source) {
        queue.push(QueueEntry {
            distance: UNREACHABLE,
            vertex,
        });
    }
    queue
}

#[cfg(test)]
mod tests;
