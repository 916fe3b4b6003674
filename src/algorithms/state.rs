use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::SccId;

/// Per-vertex SCC classification shared by all workers of a phase.
///
/// Each slot holds `0` while the vertex is unclassified and `id + 1` once it
/// is assigned. A slot goes from unclassified to assigned exactly once.
///
/// Write discipline:
/// * trimming: a worker only writes the slot of the vertex it is examining,
///   and reads neighbor slots that other workers may be writing. A stale read
///   only delays trimming of that vertex to a later pass.
/// * BFS: each task writes only vertices of its own color, and colors are
///   disjoint, so no two tasks write the same slot.
///
/// All accesses are `Relaxed`. Ordering across phases comes from the executor
/// joining its workers before the next phase starts.
pub struct ClassificationState {
    slots: Vec<AtomicUsize>,
}

impl ClassificationState {
    /// All vertices start unclassified.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            slots: (0..vertex_count).map(|_| AtomicUsize::new(0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, vertex: usize) -> SccId {
        match self.slots[vertex].load(Ordering::Relaxed) {
            0 => SccId::Unclassified,
            encoded => SccId::Assigned(encoded - 1),
        }
    }

    #[inline]
    pub fn is_unclassified(&self, vertex: usize) -> bool {
        self.slots[vertex].load(Ordering::Relaxed) == 0
    }

    /// Assigns `vertex` to SCC `id`.
    #[inline]
    pub fn assign(&self, vertex: usize, id: usize) {
        debug_assert!(
            self.is_unclassified(vertex),
            "vertex {vertex} classified twice"
        );
        self.slots[vertex].store(id + 1, Ordering::Relaxed);
    }

    /// Drops vertices that have been classified since the last call.
    pub fn retain_unclassified(&self, frontier: &mut Vec<usize>) {
        frontier.retain(|&v| self.is_unclassified(v));
    }

    /// Unwraps the final assignment.
    ///
    /// # Panics
    ///
    /// Panics if any vertex is still unclassified, which would mean the driver
    /// stopped before its frontier was empty.
    pub fn into_ids(self) -> Vec<usize> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(v, slot)| match slot.into_inner() {
                0 => panic!("vertex {v} left unclassified"),
                encoded => encoded - 1,
            })
            .collect()
    }
}

/// Source of fresh SCC identifiers for one computation.
///
/// Owned by the driver and lent to each phase, so concurrent computations
/// never share ids.
#[derive(Debug, Default)]
pub struct SccCounter {
    next: AtomicUsize,
}

impl SccCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes one fresh id. Safe to call from many workers at once.
    #[inline]
    pub fn next_id(&self) -> usize {
        self.next.fetch_add(1, Ordering::Relaxed)
    }

    /// Takes `count` consecutive fresh ids.
    pub fn reserve(&self, count: usize) -> Range<usize> {
        let start = self.next.fetch_add(count, Ordering::Relaxed);
        start..start + count
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod test_state {
    use super::*;

    #[test]
    fn test_assign_and_retain() {
        let state = ClassificationState::new(4);
        assert_eq!(state.get(2), SccId::Unclassified);
        state.assign(2, 0);
        state.assign(0, 7);
        assert_eq!(state.get(2), SccId::Assigned(0));
        assert_eq!(state.get(0), SccId::Assigned(7));

        let mut frontier = vec![0, 1, 2, 3];
        state.retain_unclassified(&mut frontier);
        assert_eq!(frontier, vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "left unclassified")]
    fn test_into_ids_requires_complete_assignment() {
        let state = ClassificationState::new(2);
        state.assign(0, 0);
        state.into_ids();
    }

    #[test]
    fn test_counter() {
        let counter = SccCounter::new();
        assert_eq!(counter.next_id(), 0);
        assert_eq!(counter.reserve(3), 1..4);
        assert_eq!(counter.next_id(), 4);
        assert_eq!(counter.issued(), 5);
    }
}
