//! Canonical and weighted edge types.
//!
//! Vertices are identified by their index in the x-sorted point sequence the
//! graph was built from. An [`EdgeKey`] canonicalizes endpoint order so that
//! `(a, b)` and `(b, a)` map to the same edge, which is what the builder uses
//! to avoid committing an edge twice. A [`WeightedEdge`] is a committed edge
//! together with its Euclidean length.

use serde::{Deserialize, Serialize};

/// Canonical identifier for an undirected edge.
///
/// # Examples
///
/// ```rust
/// use knn_graph::core::edge::EdgeKey;
///
/// let e1 = EdgeKey::new(7, 3);
/// let e2 = EdgeKey::new(3, 7);
/// assert_eq!(e1, e2);
/// assert_eq!(e1.endpoints(), (3, 7));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeKey {
    v0: usize,
    v1: usize,
}

impl EdgeKey {
    /// Creates a new canonical edge key with `v0 <= v1`.
    #[inline]
    #[must_use]
    pub const fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// Returns the smaller endpoint.
    #[inline]
    #[must_use]
    pub const fn v0(self) -> usize {
        self.v0
    }

    /// Returns the larger endpoint.
    #[inline]
    #[must_use]
    pub const fn v1(self) -> usize {
        self.v1
    }

    /// Returns the two endpoints, smaller first.
    #[inline]
    #[must_use]
    pub const fn endpoints(self) -> (usize, usize) {
        (self.v0, self.v1)
    }

    /// Returns `true` if both endpoints are the same vertex.
    #[inline]
    #[must_use]
    pub const fn is_loop(self) -> bool {
        self.v0 == self.v1
    }
}

impl From<(usize, usize)> for EdgeKey {
    #[inline]
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// An undirected edge with its Euclidean weight.
///
/// Endpoints are stored in canonical order (`u <= v`).
///
/// # Examples
///
/// ```rust
/// use knn_graph::core::edge::WeightedEdge;
///
/// let edge = WeightedEdge::new(4, 1, 2.5);
/// assert_eq!((edge.u(), edge.v()), (1, 4));
/// assert_eq!(edge.weight(), 2.5);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge {
    u: usize,
    v: usize,
    weight: f64,
}

impl WeightedEdge {
    /// Creates a weighted edge, canonicalizing the endpoint order.
    #[inline]
    #[must_use]
    pub const fn new(a: usize, b: usize, weight: f64) -> Self {
        let key = EdgeKey::new(a, b);
        Self {
            u: key.v0,
            v: key.v1,
            weight,
        }
    }

    /// The smaller endpoint.
    #[inline]
    #[must_use]
    pub const fn u(&self) -> usize {
        self.u
    }

    /// The larger endpoint.
    #[inline]
    #[must_use]
    pub const fn v(&self) -> usize {
        self.v
    }

    /// The Euclidean distance between the endpoints.
    #[inline]
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }

    /// The canonical key of this edge.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> EdgeKey {
        EdgeKey {
            v0: self.u,
            v1: self.v,
        }
    }

    /// Given one endpoint, returns the other; `None` if `vertex` is not an endpoint.
    #[inline]
    #[must_use]
    pub const fn opposite(&self, vertex: usize) -> Option<usize> {
        if vertex == self.u {
            Some(self.v)
        } else if vertex == self.v {
            Some(self.u)
        } else {
            None
        }
    }
}

impl From<WeightedEdge> for (usize, usize, f64) {
    #[inline]
    fn from(edge: WeightedEdge) -> Self {
        (edge.u, edge.v, edge.weight)
    }
}
