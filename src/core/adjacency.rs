//! Immutable, weighted adjacency index over an undirected edge list.
//!
//! The graph builder produces a flat edge list. Downstream code that needs
//! per-vertex neighborhoods (shortest paths, degree statistics) can build an
//! `AdjacencyIndex` on demand with [`KnnGraph::adjacency`](crate::core::knn_graph::KnnGraph::adjacency).
//!
//! This index is:
//! - immutable once built
//! - undirected: every edge appears in the buckets of both endpoints
//! - ordered: each bucket lists neighbors in edge order

use crate::core::collections::{NEIGHBOR_BUFFER_SIZE, SmallBuffer};
use crate::core::edge::WeightedEdge;

/// Per-vertex neighbor lists with edge weights.
///
/// # Examples
///
/// ```rust
/// use knn_graph::core::adjacency::AdjacencyIndex;
/// use knn_graph::core::edge::WeightedEdge;
///
/// let edges = [WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(1, 2, 2.0)];
/// let index = AdjacencyIndex::from_edges(4, &edges);
///
/// assert_eq!(index.degree(1), 2);
/// assert_eq!(index.neighbors(1).collect::<Vec<_>>(), vec![(0, 1.0), (2, 2.0)]);
/// assert_eq!(index.degree(3), 0);
/// assert_eq!(index.number_of_edges(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AdjacencyIndex {
    buckets: Vec<SmallBuffer<(usize, f64), NEIGHBOR_BUFFER_SIZE>>,
    n_edges: usize,
}

impl AdjacencyIndex {
    /// Builds the index for `n_vertices` vertices.
    ///
    /// The vertex count grows to cover any endpoint in `edges` beyond it.
    #[must_use]
    pub fn from_edges(n_vertices: usize, edges: &[WeightedEdge]) -> Self {
        let needed = edges
            .iter()
            .map(|edge| edge.v() + 1)
            .max()
            .unwrap_or(0)
            .max(n_vertices);
        let mut buckets = vec![SmallBuffer::new(); needed];
        for edge in edges {
            buckets[edge.u()].push((edge.v(), edge.weight()));
            if edge.u() != edge.v() {
                buckets[edge.v()].push((edge.u(), edge.weight()));
            }
        }
        Self {
            buckets,
            n_edges: edges.len(),
        }
    }

    /// Number of vertices covered by the index.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.buckets.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub const fn number_of_edges(&self) -> usize {
        self.n_edges
    }

    /// Neighbors of `vertex` with edge weights; empty if `vertex` is unknown.
    pub fn neighbors(&self, vertex: usize) -> impl ExactSizeIterator<Item = (usize, f64)> + '_ {
        self.buckets
            .get(vertex)
            .map_or(&[][..], |bucket| bucket.as_slice())
            .iter()
            .copied()
    }

    /// Number of edges incident on `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.buckets.get(vertex).map_or(0, SmallBuffer::len)
    }

    /// Returns `true` if an edge joins `a` and `b`.
    #[must_use]
    pub fn contains_edge(&self, a: usize, b: usize) -> bool {
        self.neighbors(a).any(|(neighbor, _)| neighbor == b)
    }

    /// Smallest and largest vertex degree, or `None` for an empty index.
    #[must_use]
    pub fn degree_range(&self) -> Option<(usize, usize)> {
        let mut degrees = self.buckets.iter().map(SmallBuffer::len);
        let first = degrees.next()?;
        Some(degrees.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }
}
