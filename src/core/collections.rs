//! Collection aliases used by the graph builder.
//!
//! The hashed collections use [`rustc_hash::FxHasher`]. It is fast but not
//! DoS-resistant; keys here are internal vertex indices, never attacker input.

use rustc_hash::{FxBuildHasher, FxHashSet};
use smallvec::SmallVec;

use crate::core::edge::EdgeKey;

/// Optimized `HashSet` for internal, non-adversarial keys.
pub type FastHashSet<T> = FxHashSet<T>;

/// Small-optimized `Vec`: inline storage for up to `N` elements, heap beyond.
///
/// # Examples
///
/// ```rust
/// use knn_graph::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<usize, 8> = SmallBuffer::new();
/// buffer.extend(0..5);
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Inline capacity for per-vertex neighbor buffers.
///
/// Typical degrees are small (1 to 8), so candidate lists and adjacency
/// buckets rarely spill to the heap.
pub const NEIGHBOR_BUFFER_SIZE: usize = 8;

/// Set of committed canonical edges.
pub type EdgeKeySet = FastHashSet<EdgeKey>;

/// Creates an [`EdgeKeySet`] sized for `capacity` edges.
#[inline]
#[must_use]
pub fn edge_key_set_with_capacity(capacity: usize) -> EdgeKeySet {
    EdgeKeySet::with_capacity_and_hasher(capacity, FxBuildHasher)
}
