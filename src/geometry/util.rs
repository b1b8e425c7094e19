//! Geometric utilities: test-data generation for 2D integer point sets.

pub mod point_generation;

pub use point_generation::*;

use thiserror::Error;

/// Errors that can occur during random point generation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RandomPointGenerationError {
    /// The grid size was negative.
    #[error("Invalid grid size {size}: must be non-negative")]
    InvalidSize {
        /// The requested grid size.
        size: i32,
    },
    /// More distinct points were requested than the grid holds.
    #[error(
        "Cannot generate {n_points} distinct points: the grid only holds {capacity} positions"
    )]
    InsufficientSpace {
        /// Requested number of points.
        n_points: usize,
        /// Number of distinct grid positions.
        capacity: u64,
    },
}
