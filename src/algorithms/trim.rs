//! Trimming removes every vertex that cannot sit on a cycle of unclassified
//! vertices, because it has no unclassified predecessor or no unclassified
//! successor. Each such vertex is a singleton SCC and gets a fresh id.
//!
//! A vertex whose only edge is a self-loop counts as its own predecessor and
//! successor, so it is never trimmed here and falls through to coloring.
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::trace;

use crate::algorithms::state::{ClassificationState, SccCounter};
use crate::executor::Executor;
use crate::types::graph_query::GraphQuery;
use crate::types::AdjacencyView;

/// Trimming over the incoming view, plus the outgoing view when available.
///
/// With both views, "has an unclassified successor" is read from the outgoing
/// lists directly. With the incoming view alone it is inferred by marking
/// every unclassified predecessor seen while scanning the frontier.
#[derive(Clone, Copy)]
pub struct Trimmer<'g> {
    incoming: &'g AdjacencyView,
    outgoing: Option<&'g AdjacencyView>,
}

impl<'g> Trimmer<'g> {
    pub fn new(incoming: &'g AdjacencyView, outgoing: Option<&'g AdjacencyView>) -> Self {
        Self { incoming, outgoing }
    }

    /// Whether trimming reads the outgoing view.
    pub fn is_dual(&self) -> bool {
        self.outgoing.is_some()
    }

    /// First trimming pass, while every vertex is still unclassified.
    ///
    /// Only raw emptiness of the neighbor lists is tested, and vertices
    /// trimmed during this pass are not discounted from their neighbors.
    /// Returns the number of trimmed vertices.
    pub fn first_pass<E: Executor>(
        &self,
        executor: &E,
        state: &ClassificationState,
        counter: &SccCounter,
        grain: usize,
    ) -> usize {
        let n = self.incoming.vertex_count();
        let trimmed = AtomicUsize::new(0);
        let trim = |v: usize| {
            state.assign(v, counter.next_id());
            trimmed.fetch_add(1, Ordering::Relaxed);
        };

        match self.outgoing {
            Some(outgoing) => {
                executor.for_each_parallel(0..n, grain, |v| {
                    if self.incoming.is_isolated(v) || outgoing.is_isolated(v) {
                        trim(v);
                    }
                });
            }
            None => {
                let has_successor: Vec<AtomicBool> = (0..n).map(|_| AtomicBool::new(false)).collect();
                executor.for_each_parallel(0..n, grain, |v| {
                    let predecessors = self.incoming.read_neighbor(v);
                    if predecessors.is_empty() {
                        trim(v);
                    } else {
                        for &u in predecessors {
                            has_successor[u].store(true, Ordering::Relaxed);
                        }
                    }
                });
                executor.for_each_parallel(0..n, grain, |v| {
                    if !has_successor[v].load(Ordering::Relaxed) && state.is_unclassified(v) {
                        trim(v);
                    }
                });
            }
        }

        let trimmed = trimmed.into_inner();
        trace!(target: "colorscc::trim", "First pass trimmed {} of {} vertices.", trimmed, n);
        trimmed
    }

    /// Trims the vertices of `frontier` against the current classification.
    ///
    /// `frontier` must hold exactly the unclassified vertices. It is not
    /// modified; the caller drops trimmed vertices afterwards. Returns the
    /// number of trimmed vertices.
    pub fn trim<E: Executor>(
        &self,
        executor: &E,
        frontier: &[usize],
        state: &ClassificationState,
        counter: &SccCounter,
        grain: usize,
    ) -> usize {
        let trimmed = AtomicUsize::new(0);
        let trim = |v: usize| {
            state.assign(v, counter.next_id());
            trimmed.fetch_add(1, Ordering::Relaxed);
        };
        let any_unclassified = |neighbors: &[usize]| neighbors.iter().any(|&u| state.is_unclassified(u));

        match self.outgoing {
            Some(outgoing) => {
                executor.for_each_parallel(0..frontier.len(), grain, |i| {
                    let v = frontier[i];
                    if !any_unclassified(self.incoming.read_neighbor(v))
                        || !any_unclassified(outgoing.read_neighbor(v))
                    {
                        trim(v);
                    }
                });
            }
            None => {
                let n = self.incoming.vertex_count();
                let has_successor: Vec<AtomicBool> = (0..n).map(|_| AtomicBool::new(false)).collect();
                executor.for_each_parallel(0..frontier.len(), grain, |i| {
                    let v = frontier[i];
                    let mut has_predecessor = false;
                    for &u in self.incoming.read_neighbor(v) {
                        if state.is_unclassified(u) {
                            has_predecessor = true;
                            has_successor[u].store(true, Ordering::Relaxed);
                        }
                    }
                    if !has_predecessor {
                        trim(v);
                    }
                });
                executor.for_each_parallel(0..frontier.len(), grain, |i| {
                    let v = frontier[i];
                    if !has_successor[v].load(Ordering::Relaxed) && state.is_unclassified(v) {
                        trim(v);
                    }
                });
            }
        }

        let trimmed = trimmed.into_inner();
        trace!(
            target: "colorscc::trim",
            "Trimmed {} of {} frontier vertices.",
            trimmed,
            frontier.len()
        );
        trimmed
    }
}
