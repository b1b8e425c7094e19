//! Bounded-degree nearest-neighbor graph construction.
//!
//! [`build_knn_graph`] connects every point to (at least) its `degree` nearest
//! other points. The search works on the points sorted by x:
//!
//! 1. For each vertex, two cursors walk outward (left and right) over the
//!    sorted sequence, one step per direction per round.
//! 2. Every visited point is offered to a bounded [`CandidateList`] of the
//!    nearest points seen so far.
//! 3. A direction closes when its cursor reaches the end of the sequence, or
//!    when the x gap to the next point exceeds the pruning radius: the
//!    distance of the farthest retained candidate once the list is full, or a
//!    bound on every pairwise distance before then. Since points are sorted by
//!    x, the x gap is a lower bound on the distance of every point beyond the
//!    cursor.
//! 4. When both directions close the surviving candidates become edges.
//!
//! Vertices are processed in x order and all of them share one edge set and
//! one per-vertex edge count. A vertex that already reached `degree` through
//! edges committed by earlier vertices is skipped; otherwise it only searches
//! for the neighbors it is still missing, and points it is already connected
//! to are not offered again.
//!
//! Points with equal x keep their input order (the sort is stable). There is
//! no secondary sort on y.
//!
//! # Examples
//!
//! ```rust
//! use knn_graph::prelude::*;
//!
//! let points = [
//!     Point::new(0, 0),
//!     Point::new(10, 0),
//!     Point::new(20, 0),
//!     Point::new(30, 0),
//! ];
//! let graph = build_knn_graph(&points, 2).unwrap();
//!
//! assert!(graph.validate().is_ok());
//! assert!(graph.vertex_degrees().iter().all(|&d| d >= 2));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::adjacency::AdjacencyIndex;
use crate::core::candidates::CandidateList;
use crate::core::collections::{EdgeKeySet, edge_key_set_with_capacity};
use crate::core::edge::{EdgeKey, WeightedEdge};
use crate::geometry::point::Point;

/// Absolute tolerance used by [`KnnGraph::validate`] when comparing weights.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while building a [`KnnGraph`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum KnnGraphError {
    /// Not enough points to give every vertex `degree` neighbors.
    #[error(
        "Insufficient data for nearest-neighbor graph: {n_points} points cannot give every \
         vertex {degree} neighbors"
    )]
    InsufficientData {
        /// Number of input points.
        n_points: usize,
        /// Requested minimum degree.
        degree: usize,
    },
    /// The neighbor search ran out of points before filling a vertex's quota.
    ///
    /// This indicates a defect in the builder; valid input never produces it.
    #[error(
        "Neighbor search for vertex {vertex} exhausted both directions with {found} of {needed} \
         neighbors"
    )]
    SearchExhausted {
        /// Working index of the vertex being searched from.
        vertex: usize,
        /// Candidates found before the search ran out.
        found: usize,
        /// Candidates that were needed.
        needed: usize,
    },
    /// The built graph failed post-construction validation.
    #[error("Graph validation failed: {0}")]
    Validation(#[from] KnnGraphValidationError),
}

/// Structural and geometric violations detected by [`KnnGraph::validate`].
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum KnnGraphValidationError {
    /// The point table and the original-index table disagree in length.
    #[error("Graph has {points} points but {original_indices} original indices")]
    InconsistentVertexCount {
        /// Length of the point table.
        points: usize,
        /// Length of the original-index table.
        original_indices: usize,
    },
    /// An edge references a vertex that does not exist.
    #[error("Edge references vertex {vertex}, but the graph has {n_vertices} vertices")]
    VertexOutOfRange {
        /// The offending vertex index.
        vertex: usize,
        /// Number of vertices in the graph.
        n_vertices: usize,
    },
    /// An edge connects a vertex to itself.
    #[error("Self-loop on vertex {vertex}")]
    SelfLoop {
        /// The looping vertex.
        vertex: usize,
    },
    /// The same undirected edge appears more than once.
    #[error("Duplicate edge ({u}, {v})")]
    DuplicateEdge {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
    },
    /// An edge weight differs from the distance between its endpoints.
    #[error("Edge ({u}, {v}) has weight {actual}, expected {expected}")]
    WeightMismatch {
        /// Smaller endpoint.
        u: usize,
        /// Larger endpoint.
        v: usize,
        /// Euclidean distance between the endpoints.
        expected: f64,
        /// Weight stored on the edge.
        actual: f64,
    },
    /// A vertex has fewer incident edges than the graph's degree.
    #[error("Vertex {vertex} has degree {degree}, at least {required} required")]
    DegreeDeficit {
        /// The deficient vertex.
        vertex: usize,
        /// Its incident edge count.
        degree: usize,
        /// The graph's minimum degree.
        required: usize,
    },
}

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Options for building a [`KnnGraph`].
///
/// # Examples
///
/// ```rust
/// use knn_graph::core::knn_graph::KnnGraphConfigBuilder;
/// use knn_graph::geometry::point::Point;
///
/// let config = KnnGraphConfigBuilder::default()
///     .degree(1)
///     .validate(true)
///     .build()
///     .unwrap();
///
/// let points = [Point::new(0, 0), Point::new(3, 4)];
/// let graph = config.build_graph(&points).unwrap();
/// assert_eq!(graph.number_of_edges(), 1);
/// assert_eq!(graph.edges()[0].weight(), 5.0);
/// ```
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
pub struct KnnGraphConfig {
    /// Minimum number of incident edges per vertex.
    degree: usize,
    /// Run [`KnnGraph::validate`] on the result before returning it.
    #[builder(default)]
    validate: bool,
}

impl KnnGraphConfig {
    /// Configuration with the given degree and default options.
    #[must_use]
    pub const fn new(degree: usize) -> Self {
        Self {
            degree,
            validate: false,
        }
    }

    /// The configured minimum degree.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Whether the result is validated before it is returned.
    #[must_use]
    pub const fn validates(&self) -> bool {
        self.validate
    }

    /// Builds the nearest-neighbor graph of `points`.
    ///
    /// # Errors
    ///
    /// - [`KnnGraphError::InsufficientData`] if `points` is empty or
    ///   `degree >= points.len()`.
    /// - [`KnnGraphError::SearchExhausted`] on an internal invariant violation.
    /// - [`KnnGraphError::Validation`] if validation is enabled and fails.
    pub fn build_graph(&self, points: &[Point]) -> Result<KnnGraph, KnnGraphError> {
        let graph = construct(points, self.degree)?;
        if self.validate {
            graph.validate()?;
        }
        Ok(graph)
    }
}

/// Builds the nearest-neighbor graph of `points` with default options.
///
/// # Errors
///
/// See [`KnnGraphConfig::build_graph`].
///
/// # Examples
///
/// ```rust
/// use knn_graph::prelude::*;
///
/// let square = [
///     Point::new(0, 0),
///     Point::new(0, 1),
///     Point::new(1, 0),
///     Point::new(1, 1),
/// ];
///
/// // Every vertex needs all three others: the complete graph.
/// let graph = build_knn_graph(&square, 3).unwrap();
/// assert_eq!(graph.number_of_edges(), 6);
///
/// // Not enough points for degree 4.
/// assert!(matches!(
///     build_knn_graph(&square, 4),
///     Err(KnnGraphError::InsufficientData { n_points: 4, degree: 4 })
/// ));
/// ```
pub fn build_knn_graph(points: &[Point], degree: usize) -> Result<KnnGraph, KnnGraphError> {
    KnnGraphConfig::new(degree).build_graph(points)
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

/// Committed edges and per-vertex edge counts, shared by all vertex searches
/// of one construction.
struct EdgeAccumulator {
    edges: EdgeKeySet,
    edge_counts: Vec<usize>,
    output: Vec<WeightedEdge>,
}

impl EdgeAccumulator {
    fn new(n_vertices: usize, degree: usize) -> Self {
        let expected_edges = expected_edge_count(n_vertices, degree);
        Self {
            edges: edge_key_set_with_capacity(expected_edges),
            edge_counts: vec![0; n_vertices],
            output: Vec::with_capacity(expected_edges),
        }
    }

    fn edge_count(&self, vertex: usize) -> usize {
        self.edge_counts[vertex]
    }

    fn commit(&mut self, vertex: usize, candidates: CandidateList) {
        for candidate in candidates {
            let key = EdgeKey::new(vertex, candidate.vertex);
            let inserted = self.edges.insert(key);
            debug_assert!(inserted, "edge {key:?} offered twice");
            if inserted {
                self.edge_counts[key.v0()] += 1;
                self.edge_counts[key.v1()] += 1;
                self.output
                    .push(WeightedEdge::new(vertex, candidate.vertex, candidate.distance));
            }
        }
    }
}

/// Starting capacity for the edge set: every edge serves two endpoints, so
/// about `n * degree / 2` edges, plus a `degree` margin for vertices whose
/// quota is overfilled by earlier searches.
fn expected_edge_count(n_vertices: usize, degree: usize) -> usize {
    n_vertices
        .saturating_mul(degree)
        .div_ceil(2)
        .saturating_add(degree)
}

fn construct(points: &[Point], degree: usize) -> Result<KnnGraph, KnnGraphError> {
    let n_points = points.len();
    if n_points == 0 || degree >= n_points {
        return Err(KnnGraphError::InsufficientData { n_points, degree });
    }

    let mut original_indices: Vec<usize> = (0..n_points).collect();
    original_indices.sort_by_key(|&index| points[index].x());
    let sorted: Vec<Point> = original_indices.iter().map(|&index| points[index]).collect();

    let radius_bound = distance_upper_bound(&sorted);
    tracing::debug!(n_points, degree, radius_bound, "building nearest-neighbor graph");

    let mut accumulator = EdgeAccumulator::new(n_points, degree);
    let mut skipped = 0usize;
    for vertex in 0..n_points {
        let needed = degree.saturating_sub(accumulator.edge_count(vertex));
        if needed == 0 {
            tracing::trace!(vertex, "degree already satisfied by earlier vertices");
            skipped += 1;
            continue;
        }
        let candidates =
            search_neighbors(&sorted, vertex, needed, radius_bound, &accumulator.edges)?;
        accumulator.commit(vertex, candidates);
    }

    tracing::debug!(
        n_edges = accumulator.output.len(),
        skipped,
        "nearest-neighbor graph complete"
    );

    Ok(KnnGraph {
        degree,
        points: sorted,
        original_indices,
        edges: accumulator.output,
    })
}

/// Bound on every pairwise distance: the Manhattan extent of the bounding box.
fn distance_upper_bound(points: &[Point]) -> f64 {
    let Some(first) = points.first() else {
        return 0.0;
    };
    let (mut min_x, mut max_x, mut min_y, mut max_y) = (first.x(), first.x(), first.y(), first.y());
    for point in &points[1..] {
        min_x = min_x.min(point.x());
        max_x = max_x.max(point.x());
        min_y = min_y.min(point.y());
        max_y = max_y.max(point.y());
    }
    (f64::from(max_x) - f64::from(min_x)) + (f64::from(max_y) - f64::from(min_y))
}

/// Expands the search window around `vertex` until its `needed` nearest
/// unconnected neighbors are known.
fn search_neighbors(
    points: &[Point],
    vertex: usize,
    needed: usize,
    radius_bound: f64,
    committed: &EdgeKeySet,
) -> Result<CandidateList, KnnGraphError> {
    let origin = &points[vertex];
    let last = points.len() - 1;
    let mut left = vertex;
    let mut right = vertex;
    let mut candidates = CandidateList::new(needed);

    loop {
        let radius = match candidates.farthest() {
            Some(worst) if candidates.is_full() => worst.distance,
            _ => radius_bound,
        };
        let left_open = left > 0 && origin.x_distance_to(&points[left - 1]) <= radius;
        let right_open = right < last && origin.x_distance_to(&points[right + 1]) <= radius;

        if !left_open && !right_open {
            if candidates.is_full() {
                return Ok(candidates);
            }
            tracing::error!(
                vertex,
                found = candidates.len(),
                needed,
                "neighbor search exhausted the point set"
            );
            return Err(KnnGraphError::SearchExhausted {
                vertex,
                found: candidates.len(),
                needed,
            });
        }

        if left_open {
            left -= 1;
            offer_neighbor(points, vertex, left, committed, &mut candidates);
        }
        if right_open {
            right += 1;
            offer_neighbor(points, vertex, right, committed, &mut candidates);
        }
    }
}

fn offer_neighbor(
    points: &[Point],
    vertex: usize,
    neighbor: usize,
    committed: &EdgeKeySet,
    candidates: &mut CandidateList,
) {
    if committed.contains(&EdgeKey::new(vertex, neighbor)) {
        return;
    }
    let distance = points[vertex].distance_to(&points[neighbor]);
    candidates.offer(neighbor, distance);
}

// =============================================================================
// RESULT
// =============================================================================

/// A nearest-neighbor graph over a 2D point set.
///
/// Vertex `i` is the `i`-th point in x-sorted order; [`KnnGraph::original_index`]
/// maps it back to its position in the input slice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnnGraph {
    degree: usize,
    points: Vec<Point>,
    original_indices: Vec<usize>,
    edges: Vec<WeightedEdge>,
}

impl KnnGraph {
    /// The minimum degree the graph was built for.
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    /// Number of vertices (points).
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.points.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// The points in vertex (x-sorted) order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The point of vertex `vertex`.
    #[must_use]
    pub fn point(&self, vertex: usize) -> Option<&Point> {
        self.points.get(vertex)
    }

    /// Position of vertex `vertex` in the input slice the graph was built from.
    #[must_use]
    pub fn original_index(&self, vertex: usize) -> Option<usize> {
        self.original_indices.get(vertex).copied()
    }

    /// The edges in commit order.
    #[must_use]
    pub fn edges(&self) -> &[WeightedEdge] {
        &self.edges
    }

    /// Consumes the graph, returning its edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<WeightedEdge> {
        self.edges
    }

    /// Each edge as its two endpoint points and weight.
    pub fn edge_points(&self) -> impl Iterator<Item = (Point, Point, f64)> + '_ {
        self.edges
            .iter()
            .map(|edge| (self.points[edge.u()], self.points[edge.v()], edge.weight()))
    }

    /// Incident edge count of every vertex.
    #[must_use]
    pub fn vertex_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.points.len()];
        for edge in &self.edges {
            degrees[edge.u()] += 1;
            degrees[edge.v()] += 1;
        }
        degrees
    }

    /// Builds a weighted adjacency index over this graph.
    #[must_use]
    pub fn adjacency(&self) -> AdjacencyIndex {
        AdjacencyIndex::from_edges(self.points.len(), &self.edges)
    }

    /// Checks the structural and geometric invariants of the graph.
    ///
    /// # Errors
    ///
    /// Returns the first [`KnnGraphValidationError`] found: inconsistent
    /// tables, out-of-range vertices, self-loops, duplicate edges, weights
    /// that differ from the endpoint distance by more than
    /// [`WEIGHT_TOLERANCE`], or a vertex below the minimum degree.
    pub fn validate(&self) -> Result<(), KnnGraphValidationError> {
        let n_vertices = self.points.len();
        if self.original_indices.len() != n_vertices {
            return Err(KnnGraphValidationError::InconsistentVertexCount {
                points: n_vertices,
                original_indices: self.original_indices.len(),
            });
        }

        let mut seen = edge_key_set_with_capacity(self.edges.len());
        let mut degrees = vec![0usize; n_vertices];
        for edge in &self.edges {
            let (u, v) = (edge.u(), edge.v());
            if v >= n_vertices {
                return Err(KnnGraphValidationError::VertexOutOfRange {
                    vertex: v,
                    n_vertices,
                });
            }
            if u == v {
                return Err(KnnGraphValidationError::SelfLoop { vertex: u });
            }
            if !seen.insert(edge.key()) {
                return Err(KnnGraphValidationError::DuplicateEdge { u, v });
            }
            let expected = self.points[u].distance_to(&self.points[v]);
            let error = (expected - edge.weight()).abs();
            if error.is_nan() || error > WEIGHT_TOLERANCE {
                return Err(KnnGraphValidationError::WeightMismatch {
                    u,
                    v,
                    expected,
                    actual: edge.weight(),
                });
            }
            degrees[u] += 1;
            degrees[v] += 1;
        }

        if let Some((vertex, &degree)) = degrees
            .iter()
            .enumerate()
            .find(|&(_, &degree)| degree < self.degree)
        {
            return Err(KnnGraphValidationError::DegreeDeficit {
                vertex,
                degree,
                required: self.degree,
            });
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
