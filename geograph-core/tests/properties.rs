//! Property suites for graph construction, shrinking and shortest paths.

mod common;

use std::collections::BTreeSet;

use common::build_graph;
use geograph_core::{BallStatistics, Point, ProximityGraph, ShortestPathTree, UNREACHABLE};
use geograph_test_support::PropertyProfile;
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use test_strategy::Arbitrary;

const MAX_POINTS: usize = 40;

/// Shape of the generated point cloud.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum Layout {
    /// Independent uniform coordinates in the unit square.
    #[weight(3)]
    Uniform,
    /// Tight clusters around a few centres, producing many short edges.
    #[weight(2)]
    Clustered,
    /// Integer lattice points, producing many equal weights.
    #[weight(1)]
    Lattice,
    /// Uniform points with repeated positions.
    #[weight(1)]
    Duplicates,
}

/// Points plus the thresholds used to build and shrink the graph.
#[derive(Clone, Debug)]
struct GraphCase {
    layout: Layout,
    points: Vec<Vec<f64>>,
    threshold: f64,
    shrink_to: f64,
    seed: u64,
}

fn suite_config(default_cases: u32) -> ProptestConfig {
    ProptestConfig {
        cases: PropertyProfile::load(default_cases).cases(),
        ..ProptestConfig::default()
    }
}

fn generate_points(layout: Layout, rng: &mut SmallRng) -> Vec<Vec<f64>> {
    let count = rng.gen_range(1..=MAX_POINTS);
    match layout {
        Layout::Uniform => (0..count)
            .map(|_| vec![rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
            .collect(),
        Layout::Clustered => {
            let centres: Vec<(f64, f64)> = (0..rng.gen_range(1..=4))
                .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
                .collect();
            (0..count)
                .map(|_| {
                    let (cx, cy) = centres[rng.gen_range(0..centres.len())];
                    vec![cx + rng.gen_range(-0.05..0.05), cy + rng.gen_range(-0.05..0.05)]
                })
                .collect()
        }
        Layout::Lattice => (0..count)
            .map(|_| {
                vec![
                    f64::from(rng.gen_range(0_u8..6)),
                    f64::from(rng.gen_range(0_u8..6)),
                ]
            })
            .collect(),
        Layout::Duplicates => {
            let base: Vec<Vec<f64>> = (0..count.div_ceil(3))
                .map(|_| vec![rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)])
                .collect();
            (0..count)
                .map(|_| base[rng.gen_range(0..base.len())].clone())
                .collect()
        }
    }
}

fn graph_case_strategy() -> impl Strategy<Value = GraphCase> {
    (any::<Layout>(), any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        let points = generate_points(layout, &mut rng);
        let threshold = match layout {
            Layout::Lattice => rng.gen_range(1.0..3.0),
            _ => rng.gen_range(0.05..0.8),
        };
        let shrink_to = threshold * rng.gen_range(0.0..=1.0);
        GraphCase {
            layout,
            points,
            threshold,
            shrink_to,
            seed,
        }
    })
}

fn edge_set(graph: &ProximityGraph, relabel: &[usize]) -> BTreeSet<(usize, usize, u64)> {
    graph
        .edges()
        .map(|(a, b, weight)| {
            let (a, b) = (relabel[a], relabel[b]);
            (a.min(b), a.max(b), weight.to_bits())
        })
        .collect()
}

/// Reference distances computed by repeated relaxation over every edge.
fn relaxation_distances(graph: &ProximityGraph, source: usize) -> Vec<f64> {
    let mut distances = vec![UNREACHABLE; graph.vertex_count()];
    distances[source] = 0.0;
    for _ in 0..graph.vertex_count() {
        let mut changed = false;
        for (a, b, weight) in graph.edges() {
            for (from, to) in [(a, b), (b, a)] {
                let candidate = distances[from] + weight;
                if candidate < distances[to] {
                    distances[to] = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    distances
}

proptest! {
    #![proptest_config(suite_config(128))]

    #[test]
    fn edge_set_is_independent_of_insertion_order(case in graph_case_strategy()) {
        let original = build_graph(2, case.threshold, &case.points);

        let mut order: Vec<usize> = (0..case.points.len()).collect();
        order.shuffle(&mut SmallRng::seed_from_u64(case.seed.rotate_left(17)));
        let shuffled_points: Vec<Vec<f64>> =
            order.iter().map(|&index| case.points[index].clone()).collect();
        let shuffled = build_graph(2, case.threshold, &shuffled_points);

        let identity: Vec<usize> = (0..case.points.len()).collect();
        prop_assert_eq!(edge_set(&original, &identity), edge_set(&shuffled, &order));
        prop_assert_eq!(original.edge_count(), shuffled.edge_count());
    }

    #[test]
    fn invariants_hold_after_every_mutation(case in graph_case_strategy()) {
        let mut graph = ProximityGraph::new(2, case.threshold).expect("valid graph parameters");
        for coords in &case.points {
            graph
                .add_vertex(Point::new(coords.clone()).expect("finite"))
                .expect("matching dimension");
            prop_assert!(graph.validate().is_ok(), "layout {:?}", case.layout);
        }
        graph.shrink(case.shrink_to).expect("threshold does not grow");
        prop_assert!(graph.validate().is_ok());
        prop_assert!(graph.edges().all(|(_, _, weight)| weight < case.shrink_to));
    }

    #[test]
    fn shrink_is_idempotent(case in graph_case_strategy()) {
        let mut graph = build_graph(2, case.threshold, &case.points);
        graph.shrink(case.shrink_to).expect("threshold does not grow");
        let once: Vec<_> = graph.edges().collect();
        graph.shrink(case.shrink_to).expect("threshold does not grow");
        let twice: Vec<_> = graph.edges().collect();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn shortest_paths_match_relaxation(case in graph_case_strategy()) {
        let mut graph = build_graph(2, case.threshold, &case.points);
        graph.shrink(case.shrink_to).expect("threshold does not grow");
        let source = usize::try_from(case.seed % graph.vertex_count() as u64)
            .expect("index fits in usize");

        let tree = ShortestPathTree::new(&graph, source).expect("source exists");
        let reference = relaxation_distances(&graph, source);
        for (vertex, &expected) in reference.iter().enumerate() {
            let actual = tree.dist(vertex);
            if expected == UNREACHABLE {
                prop_assert_eq!(actual, UNREACHABLE);
                prop_assert!(!tree.has_path(vertex));
            } else {
                prop_assert!((actual - expected).abs() <= 1e-9 * expected.max(1.0));
            }
        }
    }

    #[test]
    fn path_weights_sum_to_distance(case in graph_case_strategy()) {
        let graph = build_graph(2, case.threshold, &case.points);
        let tree = ShortestPathTree::new(&graph, 0).expect("source exists");
        for vertex in 0..graph.vertex_count() {
            if !tree.has_path(vertex) {
                continue;
            }
            let path = tree.path_to(vertex).expect("reachable");
            let total: f64 = path.iter().map(|edge| edge.weight()).sum();
            prop_assert!((total - tree.dist(vertex)).abs() <= 1e-9 * total.max(1.0));
            if let Some(last) = path.last() {
                prop_assert_eq!(last.to(), vertex);
            }
            let mut previous = 0;
            for edge in &path {
                let links = graph.links(previous).expect("vertex exists");
                prop_assert!(links.iter().any(|link| link.to() == edge.to() && link.weight() == edge.weight()));
                previous = edge.to();
            }
        }
    }

    #[test]
    fn balls_grow_with_radius(case in graph_case_strategy(), small in 0.0..1.0_f64, extra in 0.0..1.0_f64) {
        let graph = build_graph(2, case.threshold, &case.points);
        let center = Point::try_from([0.5, 0.5]).expect("finite");
        let inner = BallStatistics::new(&graph, &center, small).expect("graph is not empty");
        let outer = BallStatistics::new(&graph, &center, small + extra).expect("graph is not empty");
        prop_assert!(inner.len() <= outer.len());
        prop_assert!(inner.points().iter().all(|point| outer.contains(point)));
    }

    #[test]
    fn closest_is_never_beaten(case in graph_case_strategy(), x in -0.5..1.5_f64, y in -0.5..1.5_f64) {
        let graph = build_graph(2, case.threshold, &case.points);
        let query = Point::try_from([x, y]).expect("finite");
        let best = graph.closest(&query).expect("matching dimension").expect("graph is not empty");
        let best_distance = query.distance(graph.position(best).expect("vertex exists")).expect("matching dimension");
        for (vertex, position) in graph.positions().iter().enumerate() {
            let distance = query.distance(position).expect("matching dimension");
            prop_assert!(distance >= best_distance);
            if distance == best_distance {
                prop_assert!(vertex >= best);
            }
        }
    }
}
