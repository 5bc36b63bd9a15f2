//! Unit tests for the proximity graph and its invariant checks.

use rstest::rstest;

use crate::error::{GeometryError, GraphError};
use crate::point::Point;

use super::{HalfEdge, ProximityGraph};

fn p(x: f64, y: f64) -> Point {
    Point::try_from([x, y]).expect("test coordinates are finite")
}

fn graph_with(threshold: f64, points: &[(f64, f64)]) -> ProximityGraph {
    let mut graph = ProximityGraph::new(2, threshold).expect("valid graph parameters");
    for &(x, y) in points {
        graph.add_vertex(p(x, y)).expect("matching dimension");
    }
    graph
}

#[test]
fn empty_graph_reports_configuration() {
    let graph = ProximityGraph::new(2, 0.5).expect("valid graph parameters");
    assert_eq!(graph.threshold(), 0.5);
    assert_eq!(graph.vertex_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.is_empty());
    assert_eq!(graph.closest(&p(0.0, 0.0)), Ok(None));
}

#[rstest]
#[case(0, 1.0, GraphError::ZeroDimension)]
#[case(2, 0.0, GraphError::InvalidThreshold { value: 0.0 })]
#[case(2, -1.0, GraphError::InvalidThreshold { value: -1.0 })]
fn new_rejects_invalid_parameters(
    #[case] dimension: usize,
    #[case] threshold: f64,
    #[case] expected: GraphError,
) {
    let err = ProximityGraph::new(dimension, threshold).expect_err("parameters are invalid");
    assert_eq!(err, expected);
}

#[test]
fn new_rejects_nan_threshold() {
    let err = ProximityGraph::new(2, f64::NAN).expect_err("NaN threshold is invalid");
    assert_eq!(err.code().as_str(), "GRAPH_INVALID_THRESHOLD");
}

#[test]
fn insertion_and_shrink_track_edges() {
    let mut graph = ProximityGraph::new(2, 0.5).expect("valid graph parameters");

    let origin = p(0.0, 0.0);
    let v = graph.add_vertex(origin.clone()).expect("matching dimension");
    assert_eq!(v, 0);
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.position(v), Ok(&origin));

    let u = graph.add_vertex(p(0.1, 0.1)).expect("matching dimension");
    assert_eq!(u, 1);
    assert_eq!(graph.edge_count(), 1);
    let out_edges = graph.links(0).expect("vertex exists");
    assert_eq!(out_edges.len(), 1);
    assert_eq!(out_edges[0].to(), u);
    assert!((out_edges[0].weight() - 0.1 * 2.0_f64.sqrt()).abs() < 1e-15);

    let isolated = graph.add_vertex(p(1.0, 1.0)).expect("matching dimension");
    assert_eq!(isolated, 2);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.links(0).map(<[HalfEdge]>::len), Ok(1));
    assert_eq!(graph.links(1).map(<[HalfEdge]>::len), Ok(1));
    assert_eq!(graph.links(2).map(<[HalfEdge]>::len), Ok(0));

    let left = graph.add_vertex(p(-0.49, 0.0)).expect("matching dimension");
    assert_eq!(left, 3);
    assert_eq!(graph.links(0).map(<[HalfEdge]>::len), Ok(2));
    assert_eq!(graph.links(3).map(<[HalfEdge]>::len), Ok(1));
    assert_eq!(graph.edge_count(), 2);
    graph.validate().expect("invariants hold after insertion");

    graph.shrink(0.4).expect("shrinking lowers the threshold");
    assert_eq!(graph.links(0).map(<[HalfEdge]>::len), Ok(1));
    assert_eq!(graph.links(3).map(<[HalfEdge]>::len), Ok(0));
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.threshold(), 0.5);
    graph.validate().expect("invariants hold after shrink");
}

#[test]
fn insertion_uses_strict_threshold() {
    let graph = graph_with(1.0, &[(0.0, 0.0), (1.0, 0.0)]);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn add_vertex_rejects_dimension_mismatch() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0)]);
    let err = graph
        .add_vertex(Point::try_from([0.0, 0.0, 0.0]).expect("finite"))
        .expect_err("dimension must match");
    assert_eq!(
        err,
        GraphError::Geometry {
            source: GeometryError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        }
    );
    assert_eq!(graph.vertex_count(), 1);
}

#[test]
fn accessors_reject_unknown_vertices() {
    let graph = graph_with(1.0, &[(0.0, 0.0)]);
    let expected = GraphError::VertexOutOfRange {
        vertex: 5,
        vertex_count: 1,
    };
    assert_eq!(graph.links(5), Err(expected.clone()));
    assert_eq!(graph.position(5), Err(expected));
}

#[rstest]
#[case((0.0, 0.0), 0)]
#[case((0.1, 0.0), 0)]
#[case((1.1, 0.9), 2)]
#[case((0.9, 0.1), 1)]
fn closest_finds_nearest_vertex(#[case] query: (f64, f64), #[case] expected: usize) {
    let graph = graph_with(1.0, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    assert_eq!(graph.closest(&p(query.0, query.1)), Ok(Some(expected)));
}

#[rstest]
#[case::coincident(&[(0.0, 0.0), (0.0, 0.0)], 0)]
#[case::equidistant(&[(1.0, 0.0), (-1.0, 0.0)], 0)]
#[case::equidistant_later(&[(5.0, 5.0), (0.0, 1.0), (1.0, 0.0)], 1)]
fn closest_breaks_ties_towards_lowest_id(#[case] points: &[(f64, f64)], #[case] expected: usize) {
    let graph = graph_with(0.1, points);
    assert_eq!(graph.closest(&p(0.0, 0.0)), Ok(Some(expected)));
}

#[test]
fn snap_reports_nearest_vertex_and_distance() {
    let graph = graph_with(1.0, &[(0.0, 0.0), (1.0, 0.0)]);
    let (vertex, distance) = graph.snap(&p(1.0, 2.0)).expect("graph is not empty");
    assert_eq!(vertex, 1);
    assert!((distance - 2.0).abs() < 1e-12);

    let empty = ProximityGraph::new(2, 1.0).expect("valid graph parameters");
    assert_eq!(empty.snap(&p(0.0, 0.0)), Err(GraphError::EmptyGraph));
}

#[test]
fn shrink_is_idempotent() {
    let mut graph = graph_with(
        2.0,
        &[(0.0, 0.0), (0.5, 0.0), (1.2, 0.0), (1.2, 0.9), (0.1, 1.5)],
    );
    graph.shrink(1.0).expect("lower threshold");
    let once: Vec<_> = graph.edges().collect();
    let count = graph.edge_count();
    graph.shrink(1.0).expect("same threshold");
    assert_eq!(graph.edges().collect::<Vec<_>>(), once);
    assert_eq!(graph.edge_count(), count);
    graph.validate().expect("invariants hold");
}

#[test]
fn shrink_rejects_threshold_increase() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0), (0.5, 0.0)]);
    let err = graph.shrink(1.5).expect_err("shrink may not grow");
    assert_eq!(
        err,
        GraphError::ThresholdIncrease {
            current: 1.0,
            requested: 1.5
        }
    );
    assert_eq!(graph.edge_count(), 1);
}

#[rstest]
#[case(f64::NAN)]
#[case(-0.5)]
fn shrink_rejects_invalid_threshold(#[case] threshold: f64) {
    let mut graph = graph_with(1.0, &[(0.0, 0.0)]);
    let err = graph.shrink(threshold).expect_err("threshold is invalid");
    assert!(matches!(err, GraphError::InvalidThreshold { .. }));
}

#[test]
fn shrink_to_zero_removes_every_edge() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0), (0.0, 0.0), (0.5, 0.0)]);
    assert_eq!(graph.edge_count(), 3);
    graph.shrink(0.0).expect("zero is a valid lower threshold");
    assert_eq!(graph.edge_count(), 0);
    graph.validate().expect("invariants hold");
}

#[test]
fn vertices_inserted_after_shrink_use_insertion_threshold() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0)]);
    graph.shrink(0.2).expect("lower threshold");
    graph.add_vertex(p(0.5, 0.0)).expect("matching dimension");
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn edges_lists_each_connection_once() {
    let graph = graph_with(1.01, &[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
    let edges: Vec<_> = graph.edges().collect();
    assert_eq!(edges, vec![(0, 1, 1.0), (1, 2, 1.0)]);
}

#[test]
fn check_edge_count_detects_corruption() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0), (0.5, 0.0)]);
    graph.edge_count = 3;
    let err = graph.check_edge_count().expect_err("count was corrupted");
    assert!(matches!(
        err,
        GraphError::InvariantViolation {
            invariant: "edge_count",
            ..
        }
    ));
}

#[test]
fn check_mirror_symmetry_detects_missing_mirror() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0), (0.5, 0.0), (0.0, 0.5)]);
    graph.adjacency[1].clear();
    let err = graph
        .check_mirror_symmetry()
        .expect_err("mirror was removed");
    assert!(matches!(
        err,
        GraphError::InvariantViolation {
            invariant: "mirror_symmetry",
            ..
        }
    ));
}

#[test]
fn check_mirror_symmetry_detects_weight_divergence() {
    let mut graph = graph_with(1.0, &[(0.0, 0.0), (0.5, 0.0)]);
    graph.adjacency[0][0] = HalfEdge::new(1, 0.5000001);
    assert!(graph.check_mirror_symmetry().is_err());
}

#[test]
fn supports_higher_dimensions() {
    let mut graph = ProximityGraph::new(3, 1.5).expect("valid graph parameters");
    let origin = Point::try_from([0.0, 0.0, 0.0]).expect("finite");
    let corner = Point::try_from([1.0, 1.0, 1.0]).expect("finite");
    let near = Point::try_from([0.5, 0.5, 0.5]).expect("finite");
    graph.add_vertex(origin).expect("matching dimension");
    graph.add_vertex(corner).expect("matching dimension");
    graph.add_vertex(near).expect("matching dimension");
    // The corner is sqrt(3) ≈ 1.732 from the origin, beyond the threshold.
    assert_eq!(graph.edge_count(), 2);
    graph.validate().expect("invariants hold");
}
