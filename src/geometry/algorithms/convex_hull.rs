//! Convex hull of a 2D integer point set by Graham scan.
//!
//! All predicates are evaluated exactly in `i64`, so there is no floating-point
//! angle computation: points are ordered around the pivot by the sign of cross
//! products.

use std::cmp::Ordering;

use thiserror::Error;

use crate::geometry::point::Point;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during convex hull construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConvexHullError {
    /// Insufficient data to construct convex hull.
    #[error("Insufficient data for convex hull construction: {message}")]
    InsufficientData {
        /// Description of the data insufficiency.
        message: String,
    },
}

// =============================================================================
// PREDICATES
// =============================================================================

/// Twice the signed area of the triangle `a`, `b`, `c`.
///
/// Positive for a counter-clockwise turn `a -> b -> c`, negative for a
/// clockwise turn, zero when the points are collinear.
///
/// # Examples
///
/// ```rust
/// use knn_graph::geometry::algorithms::convex_hull::ccw;
/// use knn_graph::geometry::point::Point;
///
/// let (a, b) = (Point::new(0, 0), Point::new(1, 0));
/// assert!(ccw(&a, &b, &Point::new(1, 1)) > 0);
/// assert!(ccw(&a, &b, &Point::new(1, -1)) < 0);
/// assert_eq!(ccw(&a, &b, &Point::new(2, 0)), 0);
/// ```
#[must_use]
pub fn ccw(a: &Point, b: &Point, c: &Point) -> i64 {
    let dx21 = i64::from(b.x()) - i64::from(a.x());
    let dy31 = i64::from(c.y()) - i64::from(a.y());
    let dy21 = i64::from(b.y()) - i64::from(a.y());
    let dx31 = i64::from(c.x()) - i64::from(a.x());
    dx21 * dy31 - dy21 * dx31
}

/// Index of the lowest point (smallest y, ties broken by smallest x).
fn pivot_index(points: &[Point]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| (p.y(), p.x()))
        .map(|(index, _)| index)
}

/// Orders points by polar angle around `pivot`, nearer points first on ties.
///
/// Valid because every point lies in the half plane above the pivot (or on
/// its right along the same row), where angles span `[0, pi)` and the cross
/// product sign is a strict angular comparison.
fn polar_order(pivot: &Point, a: &Point, b: &Point) -> Ordering {
    match ccw(pivot, a, b).cmp(&0) {
        Ordering::Greater => Ordering::Less,
        Ordering::Less => Ordering::Greater,
        Ordering::Equal => pivot
            .manhattan_distance(a)
            .cmp(&pivot.manhattan_distance(b)),
    }
}

// =============================================================================
// GRAHAM SCAN
// =============================================================================

/// Computes the convex hull of `points`.
///
/// The hull is returned counter-clockwise, starting at the lowest point.
/// Points on a hull edge but not at a corner are dropped, as are duplicates.
///
/// # Errors
///
/// Returns [`ConvexHullError::InsufficientData`] if `points` is empty.
///
/// # Examples
///
/// ```rust
/// use knn_graph::geometry::algorithms::convex_hull::graham_scan;
/// use knn_graph::geometry::point::Point;
///
/// let points = [
///     Point::new(-1, 0),
///     Point::new(0, 1),
///     Point::new(0, -1),
///     Point::new(1, 0),
///     Point::new(0, 0), // interior
/// ];
/// let hull = graham_scan(&points).unwrap();
/// assert_eq!(
///     hull,
///     vec![Point::new(0, -1), Point::new(1, 0), Point::new(0, 1), Point::new(-1, 0)]
/// );
/// ```
pub fn graham_scan(points: &[Point]) -> Result<Vec<Point>, ConvexHullError> {
    let Some(pivot_at) = pivot_index(points) else {
        return Err(ConvexHullError::InsufficientData {
            message: "cannot compute the hull of an empty point set".to_string(),
        });
    };
    let pivot = points[pivot_at];

    let mut rest: Vec<Point> = points
        .iter()
        .enumerate()
        .filter_map(|(index, &p)| (index != pivot_at).then_some(p))
        .collect();
    rest.sort_by(|a, b| polar_order(&pivot, a, b));

    let mut hull: Vec<Point> = Vec::with_capacity(rest.len() + 1);
    hull.push(pivot);
    for point in rest {
        while let [.., second, top] = hull.as_slice() {
            if ccw(second, top, &point) > 0 {
                break;
            }
            hull.pop();
        }
        if hull.last() != Some(&point) {
            hull.push(point);
        }
    }

    tracing::debug!(
        n_points = points.len(),
        n_hull = hull.len(),
        "computed convex hull"
    );
    Ok(hull)
}
