//! Bounded, distance-sorted candidate list for one vertex's neighbor search.

use crate::core::collections::{NEIGHBOR_BUFFER_SIZE, SmallBuffer};

/// A prospective neighbor of the vertex being searched from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Candidate {
    /// Working index of the neighbor.
    pub vertex: usize,
    /// Euclidean distance from the search vertex.
    pub distance: f64,
}

/// Outcome of [`CandidateList::offer`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Offer {
    /// The list had room and the candidate was inserted.
    Inserted,
    /// The list was full; the farthest entry was evicted to make room.
    Replaced(Candidate),
    /// The candidate is not closer than the current farthest entry.
    Rejected,
}

/// The `capacity` nearest candidates seen so far, ascending by distance.
///
/// Equal distances keep insertion order: a later candidate is placed after
/// every entry at the same distance, and never evicts one.
///
/// # Examples
///
/// ```rust
/// use knn_graph::core::candidates::{CandidateList, Offer};
///
/// let mut list = CandidateList::new(2);
/// assert_eq!(list.offer(1, 3.0), Offer::Inserted);
/// assert_eq!(list.offer(2, 1.0), Offer::Inserted);
/// assert!(list.is_full());
/// assert!(matches!(list.offer(3, 2.0), Offer::Replaced(c) if c.vertex == 1));
/// assert_eq!(list.offer(4, 2.0), Offer::Rejected);
/// assert_eq!(list.vertices().collect::<Vec<_>>(), vec![2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct CandidateList {
    capacity: usize,
    entries: SmallBuffer<Candidate, NEIGHBOR_BUFFER_SIZE>,
}

impl CandidateList {
    /// Creates an empty list holding at most `capacity` candidates.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: SmallBuffer::with_capacity(capacity),
        }
    }

    /// Maximum number of candidates retained.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of candidates currently held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no candidates are held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` once `capacity` candidates are held.
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// The farthest retained candidate.
    #[inline]
    #[must_use]
    pub fn farthest(&self) -> Option<&Candidate> {
        self.entries.last()
    }

    /// Offers a candidate, keeping the list sorted and bounded.
    pub fn offer(&mut self, vertex: usize, distance: f64) -> Offer {
        let candidate = Candidate { vertex, distance };
        if !self.is_full() {
            self.insert_sorted(candidate);
            return Offer::Inserted;
        }
        match self.entries.last() {
            Some(worst) if distance < worst.distance => {
                let evicted = self.entries.pop();
                self.insert_sorted(candidate);
                evicted.map_or(Offer::Inserted, Offer::Replaced)
            }
            _ => Offer::Rejected,
        }
    }

    fn insert_sorted(&mut self, candidate: Candidate) {
        let at = self
            .entries
            .partition_point(|c| c.distance <= candidate.distance);
        self.entries.insert(at, candidate);
    }

    /// Retained candidates, nearest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Retained neighbor indices, nearest first.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = usize> + '_ {
        self.entries.iter().map(|c| c.vertex)
    }
}

impl IntoIterator for CandidateList {
    type Item = Candidate;
    type IntoIter = smallvec::IntoIter<[Candidate; NEIGHBOR_BUFFER_SIZE]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
