//! Property-based tests for convex hull operations.
//!
//! This module uses proptest to verify fundamental properties of the Graham
//! scan, including:
//! - All input points are on or inside the hull
//! - Every hull corner is a strict counter-clockwise turn
//! - Hull corners are distinct input points, starting at the lowest point
//! - The hull is independent of input order

use knn_graph::geometry::algorithms::convex_hull::{ccw, graham_scan};
use knn_graph::geometry::point::Point;
use proptest::prelude::*;

// =============================================================================
// TEST CONFIGURATION
// =============================================================================

/// Strategy for point sets on a small grid, so collinear and duplicate
/// points are common.
fn point_set() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-20i32..=20, -20i32..=20).prop_map(Point::from), 1..80)
}

// =============================================================================
// HULL PROPERTIES
// =============================================================================

proptest! {
    /// Property: every input point lies on or to the left of every hull edge
    #[test]
    fn prop_points_inside_hull(points in point_set()) {
        let hull = graham_scan(&points).unwrap();
        match hull.len() {
            1 => prop_assert!(points.iter().all(|p| *p == hull[0])),
            2 => {
                for p in &points {
                    prop_assert_eq!(ccw(&hull[0], &hull[1], p), 0, "{} off the hull segment", p);
                }
            }
            n => {
                for i in 0..n {
                    let (a, b) = (&hull[i], &hull[(i + 1) % n]);
                    for p in &points {
                        prop_assert!(ccw(a, b, p) >= 0, "{} outside hull edge {} -> {}", p, a, b);
                    }
                }
            }
        }
    }

    /// Property: hulls of three or more corners turn strictly left everywhere
    #[test]
    fn prop_hull_is_strictly_convex(points in point_set()) {
        let hull = graham_scan(&points).unwrap();
        let n = hull.len();
        prop_assume!(n >= 3);
        for i in 0..n {
            let turn = ccw(&hull[i], &hull[(i + 1) % n], &hull[(i + 2) % n]);
            prop_assert!(turn > 0, "non-convex turn at {}", hull[(i + 1) % n]);
        }
    }

    /// Property: hull corners are distinct input points and the first is the lowest
    #[test]
    fn prop_hull_corners_are_input_points(points in point_set()) {
        let hull = graham_scan(&points).unwrap();
        for corner in &hull {
            prop_assert!(points.contains(corner));
        }
        let mut unique = hull.clone();
        unique.sort_unstable_by_key(|p| (p.x(), p.y()));
        unique.dedup();
        prop_assert_eq!(unique.len(), hull.len(), "repeated hull corner");

        let lowest = points.iter().min_by_key(|p| (p.y(), p.x())).copied();
        prop_assert_eq!(hull.first().copied(), lowest);
    }

    /// Property: reversing the input does not change the hull
    #[test]
    fn prop_hull_ignores_input_order(points in point_set()) {
        let mut reversed = points.clone();
        reversed.reverse();
        prop_assert_eq!(graham_scan(&points).unwrap(), graham_scan(&reversed).unwrap());
    }
}
