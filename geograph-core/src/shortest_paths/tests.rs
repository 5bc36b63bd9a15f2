//! Unit tests for the Dijkstra shortest-path tree.

use rstest::{fixture, rstest};

use crate::error::GraphError;
use crate::graph::ProximityGraph;
use crate::point::Point;

use super::{QueueEntry, ShortestPathTree, UNREACHABLE};

#[fixture]
fn corner() -> ProximityGraph {
    let mut graph = ProximityGraph::new(2, 1.01).expect("valid graph parameters");
    for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)] {
        graph
            .add_vertex(Point::try_from([x, y]).expect("finite"))
            .expect("matching dimension");
    }
    graph
}

#[rstest]
fn distances_follow_the_corner(corner: ProximityGraph) {
    let tree = ShortestPathTree::new(&corner, 0).expect("source exists");
    assert_eq!(tree.source(), 0);
    assert_eq!(tree.dist(0), 0.0);
    assert_eq!(tree.dist(1), 1.0);
    assert_eq!(tree.dist(2), 2.0);
    assert!(tree.has_path(2));
}

#[rstest]
fn shrinking_disconnects_every_vertex(mut corner: ProximityGraph) {
    corner.shrink(0.5).expect("lower threshold");
    let tree = ShortestPathTree::new(&corner, 0).expect("source exists");
    assert_eq!(tree.dist(0), 0.0);
    assert_eq!(tree.dist(1), UNREACHABLE);
    assert_eq!(tree.dist(2), UNREACHABLE);
    assert!(!tree.has_path(1));
}

#[rstest]
fn path_lists_hops_from_source(corner: ProximityGraph) {
    let tree = ShortestPathTree::new(&corner, 2).expect("source exists");
    let path = tree.path_to(0).expect("reachable");
    let hops: Vec<_> = path.iter().map(|edge| (edge.to(), edge.weight())).collect();
    assert_eq!(hops, vec![(1, 1.0), (0, 1.0)]);
    let total: f64 = path.iter().map(|edge| edge.weight()).sum();
    assert_eq!(total, tree.dist(0));
}

#[rstest]
fn path_to_source_is_empty(corner: ProximityGraph) {
    let tree = ShortestPathTree::new(&corner, 1).expect("source exists");
    assert_eq!(tree.path_to(1), Ok(Vec::new()));
}

#[rstest]
fn unreachable_path_is_an_error(mut corner: ProximityGraph) {
    corner.shrink(0.5).expect("lower threshold");
    let tree = ShortestPathTree::new(&corner, 0).expect("source exists");
    assert_eq!(tree.path_to(2), Err(GraphError::NoPath { from: 0, to: 2 }));
}

#[rstest]
fn unknown_vertices_are_rejected(corner: ProximityGraph) {
    let err = ShortestPathTree::new(&corner, 3).expect_err("source is out of range");
    assert_eq!(
        err,
        GraphError::VertexOutOfRange {
            vertex: 3,
            vertex_count: 3
        }
    );

    let tree = ShortestPathTree::new(&corner, 0).expect("source exists");
    assert_eq!(tree.dist(99), UNREACHABLE);
    assert!(!tree.has_path(99));
    assert!(matches!(
        tree.path_to(99),
        Err(GraphError::VertexOutOfRange { vertex: 99, .. })
    ));
}

#[rstest]
fn tree_outlives_graph_mutation(mut corner: ProximityGraph) {
    let tree = ShortestPathTree::new(&corner, 0).expect("source exists");
    corner.shrink(0.5).expect("lower threshold");
    corner
        .add_vertex(Point::try_from([5.0, 5.0]).expect("finite"))
        .expect("matching dimension");
    assert_eq!(tree.dist(2), 2.0);
    assert_eq!(tree.dist(3), UNREACHABLE);
}

#[test]
fn chooses_the_cheaper_detour() {
    // The endpoints are too far apart to connect directly; two detours exist.
    let mut graph = ProximityGraph::new(2, 1.5).expect("valid graph parameters");
    for (x, y) in [(0.0, 0.0), (1.0, 0.5), (1.0, -0.2), (2.0, 0.0)] {
        graph
            .add_vertex(Point::try_from([x, y]).expect("finite"))
            .expect("matching dimension");
    }
    let tree = ShortestPathTree::new(&graph, 0).expect("source exists");
    let expected = 2.0 * 1.04_f64.sqrt();
    assert!((tree.dist(3) - expected).abs() < 1e-12);
    let via: Vec<_> = tree
        .path_to(3)
        .expect("reachable")
        .iter()
        .map(|edge| edge.to())
        .collect();
    assert_eq!(via, vec![2, 3]);
}

#[rstest]
#[case(1.0, 0, 2.0, 0, true)]
#[case(1.0, 1, 1.0, 3, true)]
#[case(1.0, 3, 1.0, 1, false)]
#[case(UNREACHABLE, 0, 1.0, 5, false)]
fn queue_pops_smallest_distance_then_lowest_id(
    #[case] left_distance: f64,
    #[case] left_vertex: usize,
    #[case] right_distance: f64,
    #[case] right_vertex: usize,
    #[case] left_pops_first: bool,
) {
    let left = QueueEntry {
        distance: left_distance,
        vertex: left_vertex,
    };
    let right = QueueEntry {
        distance: right_distance,
        vertex: right_vertex,
    };
    assert_eq!(left > right, left_pops_first);
}
