//! Property-based tests for nearest-neighbor graph construction.
//!
//! This module uses proptest to verify the guarantees of every built graph:
//! - Every vertex reaches the requested minimum degree
//! - No self-loops or duplicate edges, weights equal endpoint distances
//! - Construction is deterministic and invariant under translation
//! - Degree zero yields no edges, degree `n - 1` yields the complete graph
//! - Vertices map back to the input points they were built from
//! - Each searching vertex receives exactly its nearest unconnected points,
//!   checked against a brute-force reference builder

use knn_graph::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for point coordinates; small enough that random sets contain
/// duplicate x values and duplicate points.
fn coordinate() -> impl Strategy<Value = i32> {
    -50..=50
}

fn point() -> impl Strategy<Value = Point> {
    (coordinate(), coordinate()).prop_map(|(x, y)| Point::new(x, y))
}

/// Point sets with at least two points, paired with a degree below their size.
fn points_and_degree() -> impl Strategy<Value = (Vec<Point>, usize)> {
    prop::collection::vec(point(), 2..60).prop_flat_map(|points| {
        let n = points.len();
        (Just(points), 0..n)
    })
}

// =============================================================================
// STRUCTURAL PROPERTIES
// =============================================================================

proptest! {
    /// Property: every built graph passes full validation
    #[test]
    fn prop_graph_is_valid((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        prop_assert!(
            graph.validate().is_ok(),
            "validation failed for degree {}: {:?}",
            degree,
            graph.validate()
        );
    }

    /// Property: every vertex has at least `degree` incident edges
    #[test]
    fn prop_minimum_degree((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        for (vertex, &d) in graph.vertex_degrees().iter().enumerate() {
            prop_assert!(d >= degree, "vertex {} has degree {} < {}", vertex, d, degree);
        }
    }

    /// Property: no self-loops, no duplicate undirected edges
    #[test]
    fn prop_edges_are_simple((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        let mut keys: Vec<EdgeKey> = graph.edges().iter().map(WeightedEdge::key).collect();
        for key in &keys {
            prop_assert!(!key.is_loop(), "self-loop at {}", key.v0());
        }
        let before = keys.len();
        keys.sort_unstable();
        keys.dedup();
        prop_assert_eq!(keys.len(), before, "duplicate edges present");
    }

    /// Property: each weight is the Euclidean distance between its endpoints
    #[test]
    fn prop_weights_are_exact((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        for (a, b, weight) in graph.edge_points() {
            let dx = f64::from(a.x()) - f64::from(b.x());
            let dy = f64::from(a.y()) - f64::from(b.y());
            prop_assert!((dx.hypot(dy) - weight).abs() <= 1e-9, "{} - {}: {}", a, b, weight);
        }
    }

    /// Property: the number of edges lies between n*k/2 and n*k
    #[test]
    fn prop_edge_count_bounds((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        let n = points.len();
        prop_assert!(2 * graph.number_of_edges() >= n * degree);
        prop_assert!(graph.number_of_edges() <= n * degree);
    }
}

// =============================================================================
// BOUNDARY DEGREES
// =============================================================================

proptest! {
    /// Property: degree zero produces an edgeless graph
    #[test]
    fn prop_degree_zero_is_edgeless(points in prop::collection::vec(point(), 1..60)) {
        let graph = build_knn_graph(&points, 0).unwrap();
        prop_assert_eq!(graph.number_of_edges(), 0);
        prop_assert_eq!(graph.number_of_vertices(), points.len());
    }

    /// Property: degree n - 1 produces the complete graph
    #[test]
    fn prop_full_degree_is_complete(points in prop::collection::vec(point(), 2..25)) {
        let n = points.len();
        let graph = build_knn_graph(&points, n - 1).unwrap();
        prop_assert_eq!(graph.number_of_edges(), n * (n - 1) / 2);
        prop_assert!(graph.vertex_degrees().iter().all(|&d| d == n - 1));
    }

    /// Property: degree >= n is rejected
    #[test]
    fn prop_excess_degree_is_rejected(
        points in prop::collection::vec(point(), 0..20),
        extra in 0usize..5,
    ) {
        let degree = points.len() + extra;
        let result = build_knn_graph(&points, degree);
        let is_insufficient_data = matches!(result, Err(KnnGraphError::InsufficientData { .. }));
        prop_assert!(is_insufficient_data);
    }
}

// =============================================================================
// DETERMINISM AND SYMMETRY
// =============================================================================

proptest! {
    /// Property: building twice from the same input gives identical graphs
    #[test]
    fn prop_construction_is_deterministic((points, degree) in points_and_degree()) {
        let first = build_knn_graph(&points, degree).unwrap();
        let second = build_knn_graph(&points, degree).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: translating every point leaves the edge list unchanged
    #[test]
    fn prop_translation_invariance(
        (points, degree) in points_and_degree(),
        dx in -1000i32..=1000,
        dy in -1000i32..=1000,
    ) {
        let moved: Vec<Point> = points
            .iter()
            .map(|p| Point::new(p.x() + dx, p.y() + dy))
            .collect();
        let original = build_knn_graph(&points, degree).unwrap();
        let translated = build_knn_graph(&moved, degree).unwrap();
        prop_assert_eq!(original.edges(), translated.edges());
    }

    /// Property: every vertex maps back to the input point it holds
    #[test]
    fn prop_original_indices_roundtrip((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        let mut seen = vec![false; points.len()];
        for vertex in 0..graph.number_of_vertices() {
            let original = graph.original_index(vertex).unwrap();
            prop_assert_eq!(graph.point(vertex), Some(&points[original]));
            prop_assert!(!seen[original], "input index {} mapped twice", original);
            seen[original] = true;
        }
        // Vertices are in non-decreasing x order.
        prop_assert!(graph.points().windows(2).all(|w| w[0].x() <= w[1].x()));
    }

    /// Property: the adjacency index agrees with the edge list
    #[test]
    fn prop_adjacency_matches_edges((points, degree) in points_and_degree()) {
        let graph = build_knn_graph(&points, degree).unwrap();
        let adjacency = graph.adjacency();
        prop_assert_eq!(adjacency.number_of_edges(), graph.number_of_edges());
        for edge in graph.edges() {
            prop_assert!(adjacency.contains_edge(edge.u(), edge.v()));
            prop_assert!(adjacency.contains_edge(edge.v(), edge.u()));
        }
        let degrees = graph.vertex_degrees();
        for (vertex, &d) in degrees.iter().enumerate() {
            prop_assert_eq!(adjacency.degree(vertex), d);
        }
    }
}

// =============================================================================
// BRUTE-FORCE REFERENCE
// =============================================================================

fn squared_distance(a: &Point, b: &Point) -> i64 {
    let dx = i64::from(a.x()) - i64::from(b.x());
    let dy = i64::from(a.y()) - i64::from(b.y());
    dx * dx + dy * dy
}

/// Returns `true` if no two pairs of points are the same distance apart.
fn has_distinct_distances(points: &[Point]) -> bool {
    let mut seen = BTreeSet::new();
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            if !seen.insert(squared_distance(a, b)) {
                return false;
            }
        }
    }
    true
}

/// Builds the graph by exhaustive search: visit vertices in x order and give
/// each one the `degree - count` nearest points it is not yet connected to.
fn reference_edges(sorted: &[Point], degree: usize) -> BTreeSet<EdgeKey> {
    let mut edges = BTreeSet::new();
    let mut counts = vec![0usize; sorted.len()];
    for vertex in 0..sorted.len() {
        let needed = degree.saturating_sub(counts[vertex]);
        if needed == 0 {
            continue;
        }
        let mut others: Vec<usize> = (0..sorted.len())
            .filter(|&other| other != vertex && !edges.contains(&EdgeKey::new(vertex, other)))
            .collect();
        others.sort_by_key(|&other| squared_distance(&sorted[vertex], &sorted[other]));
        for &other in others.iter().take(needed) {
            edges.insert(EdgeKey::new(vertex, other));
            counts[vertex] += 1;
            counts[other] += 1;
        }
    }
    edges
}

/// Distinct points on a large grid, paired with a degree below their count.
fn sparse_points_and_degree() -> impl Strategy<Value = (Vec<Point>, usize)> {
    (any::<u64>(), 2usize..80).prop_flat_map(|(seed, n)| {
        let points = generate_points_seeded(1_000_000, n, seed).unwrap();
        (Just(points), 0..n.min(13))
    })
}

proptest! {
    /// Property: the pruned window search selects the same edges as an
    /// exhaustive nearest-neighbor search
    #[test]
    fn prop_matches_brute_force((points, degree) in sparse_points_and_degree()) {
        prop_assume!(has_distinct_distances(&points));

        let mut sorted = points.clone();
        sorted.sort_by_key(Point::x);
        let graph = build_knn_graph(&points, degree).unwrap();
        prop_assert_eq!(graph.points(), sorted.as_slice());

        let built: BTreeSet<EdgeKey> = graph.edges().iter().map(WeightedEdge::key).collect();
        let expected = reference_edges(&sorted, degree);
        prop_assert_eq!(
            &built,
            &expected,
            "edge sets differ for {} points at degree {}",
            points.len(),
            degree
        );
    }
}
