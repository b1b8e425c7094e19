//! # knn-graph
//!
//! This is a library for building bounded-degree nearest-neighbor graphs over sets of
//! 2D integer points: every point is connected to (at least) its `degree` closest other
//! points, and each edge carries the Euclidean distance between its endpoints.
//!
//! # Features
//!
//! - Exact nearest-neighbor graph construction by an x-sorted, bidirectional
//!   expanding-window search with distance pruning
//! - Edge sharing across vertices: a vertex that already has enough neighbors
//!   through edges created by earlier searches is not searched again
//! - Plain-text point and edge-list I/O in the `(x,y)` format
//! - Random test-data generation
//! - Graham-scan convex hulls with exact integer predicates
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use knn_graph::prelude::*;
//!
//! let points = vec![
//!     Point::new(0, 0),
//!     Point::new(0, 1),
//!     Point::new(1, 0),
//!     Point::new(1, 1),
//! ];
//!
//! let graph = build_knn_graph(&points, 1).unwrap();
//!
//! // Every vertex has at least one neighbor at distance 1.
//! assert!(graph.validate().is_ok());
//! assert!(graph.edges().iter().all(|e| e.weight() == 1.0));
//! ```
//!
//! # Graph Invariants
//!
//! A graph returned by [`build_knn_graph`](core::knn_graph::build_knn_graph) satisfies, and
//! [`KnnGraph::validate`](core::knn_graph::KnnGraph::validate) checks:
//!
//! - **Minimum degree** – every vertex has at least `degree` incident edges. Some vertices
//!   end up with more, because an edge chosen by one endpoint also counts for the other.
//! - **No duplicate edges** – each undirected edge appears once.
//! - **No self-loops**.
//! - **Exact weights** – each weight is the Euclidean distance between the endpoints.
//!
//! Construction is deterministic: the same input in the same order always produces the
//! same edges in the same order.
//!
//! ## Error handling
//!
//! Construction fails up front with
//! [`KnnGraphError::InsufficientData`](core::knn_graph::KnnGraphError::InsufficientData)
//! when the point set is empty or has no more than `degree` points:
//!
//! ```rust
//! use knn_graph::prelude::*;
//!
//! let points = [Point::new(0, 0), Point::new(5, 5)];
//! assert!(matches!(
//!     build_knn_graph(&points, 2),
//!     Err(KnnGraphError::InsufficientData { n_points: 2, degree: 2 })
//! ));
//! ```
//!
//! # Logging
//!
//! The library emits [`tracing`] events (`debug` summaries per build, `trace` per
//! skipped vertex). Install a subscriber, e.g. `tracing-subscriber` with an
//! `EnvFilter`, to see them.

#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the graph builder and the types it produces.
pub mod core {
    /// Weighted adjacency index over a built graph
    pub mod adjacency;
    /// Bounded, distance-sorted candidate lists
    pub mod candidates;
    /// Hash and small-vector collection aliases
    pub mod collections;
    pub mod edge;
    pub mod knn_graph;

    pub use adjacency::*;
    pub use edge::*;
    pub use knn_graph::*;
}

/// Contains the `Point` type and the geometric algorithms that operate on point sets.
pub mod geometry {
    /// Geometric algorithms on 2D point sets
    pub mod algorithms {
        /// Graham-scan convex hull
        pub mod convex_hull;
        pub use convex_hull::*;
    }
    pub mod point;
    pub mod util;

    pub use algorithms::*;
    pub use point::*;
    pub use util::*;
}

pub mod io;

/// A prelude module that re-exports commonly used types and functions.
pub mod prelude {
    pub use crate::core::{
        adjacency::AdjacencyIndex,
        edge::{EdgeKey, WeightedEdge},
        knn_graph::{
            KnnGraph, KnnGraphConfig, KnnGraphConfigBuilder, KnnGraphError,
            KnnGraphValidationError, build_knn_graph,
        },
    };
    pub use crate::geometry::{
        algorithms::convex_hull::{ConvexHullError, graham_scan},
        point::{Point, PointParseError},
        util::{RandomPointGenerationError, generate_points, generate_points_seeded},
    };
    pub use crate::io::{PointIoError, read_edges, read_points, write_edges, write_points};
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{adjacency::AdjacencyIndex, edge::WeightedEdge, knn_graph::KnnGraph},
        geometry::point::Point,
        is_normal,
    };

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point>());
        assert!(is_normal::<WeightedEdge>());
        assert!(is_normal::<KnnGraph>());
        assert!(is_normal::<AdjacencyIndex>());
    }

    #[test]
    fn test_prelude_exports() {
        use crate::prelude::*;

        let points = generate_points_seeded(50, 30, 3).unwrap();
        let graph = build_knn_graph(&points, 3).unwrap();
        assert!(graph.validate().is_ok());

        let hull = graham_scan(&points).unwrap();
        assert!(hull.len() >= 3);

        let mut out = Vec::new();
        write_edges(&graph, &mut out).unwrap();
        assert_eq!(read_edges(out.as_slice()).unwrap().len(), graph.number_of_edges());
    }
}
