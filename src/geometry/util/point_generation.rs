//! Random point generation functions.
//!
//! Points are drawn uniformly from the integer grid `[0, size] x [0, size]`
//! without repetition and returned in shuffled order, which is the shape of
//! test data the graph builder is exercised with.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::core::collections::FastHashSet;
use crate::geometry::point::Point;

// Re-export error type
pub use super::RandomPointGenerationError;

/// Number of distinct positions in the grid `[0, size]^2`.
fn grid_capacity(size: i32) -> u64 {
    let side = u64::from(size.unsigned_abs()) + 1;
    side * side
}

fn validate_request(size: i32, n_points: usize) -> Result<(), RandomPointGenerationError> {
    if size < 0 {
        return Err(RandomPointGenerationError::InvalidSize { size });
    }
    let capacity = grid_capacity(size);
    if !u64::try_from(n_points).is_ok_and(|n| n <= capacity) {
        return Err(RandomPointGenerationError::InsufficientSpace { n_points, capacity });
    }
    Ok(())
}

/// Draws `n_points` distinct grid points using `rng`, then shuffles them.
///
/// # Errors
///
/// * `RandomPointGenerationError::InvalidSize` if `size` is negative
/// * `RandomPointGenerationError::InsufficientSpace` if `n_points` exceeds
///   the `(size + 1)^2` grid positions
pub fn generate_points_with_rng<R: Rng>(
    size: i32,
    n_points: usize,
    rng: &mut R,
) -> Result<Vec<Point>, RandomPointGenerationError> {
    validate_request(size, n_points)?;

    let mut seen: FastHashSet<Point> = FastHashSet::default();
    seen.reserve(n_points);
    let mut points = Vec::with_capacity(n_points);
    while points.len() < n_points {
        let point = Point::new(rng.random_range(0..=size), rng.random_range(0..=size));
        if seen.insert(point) {
            points.push(point);
        }
    }
    points.shuffle(rng);

    tracing::debug!(size, n_points, "generated random points");
    Ok(points)
}

/// Generate `n_points` distinct random points in `[0, size]^2`.
///
/// # Errors
///
/// See [`generate_points_with_rng`].
///
/// # Examples
///
/// ```
/// use knn_graph::geometry::util::generate_points;
///
/// let points = generate_points(100, 50).unwrap();
/// assert_eq!(points.len(), 50);
/// assert!(points.iter().all(|p| (0..=100).contains(&p.x()) && (0..=100).contains(&p.y())));
///
/// // A 2x2 grid only has 4 positions.
/// assert!(generate_points(1, 5).is_err());
/// ```
pub fn generate_points(
    size: i32,
    n_points: usize,
) -> Result<Vec<Point>, RandomPointGenerationError> {
    generate_points_with_rng(size, n_points, &mut rand::rng())
}

/// Generate random points with a seeded RNG for reproducible results.
///
/// # Errors
///
/// See [`generate_points_with_rng`].
///
/// # Examples
///
/// ```
/// use knn_graph::geometry::util::generate_points_seeded;
///
/// let a = generate_points_seeded(1000, 200, 42).unwrap();
/// let b = generate_points_seeded(1000, 200, 42).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_points_seeded(
    size: i32,
    n_points: usize,
    seed: u64,
) -> Result<Vec<Point>, RandomPointGenerationError> {
    use rand::SeedableRng;

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    generate_points_with_rng(size, n_points, &mut rng)
}
