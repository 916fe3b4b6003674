use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use log::trace;

use crate::algorithms::state::ClassificationState;
use crate::executor::Executor;
use crate::types::graph_query::GraphQuery;
use crate::types::{AdjacencyView, Color};

const REMOVED: usize = usize::MAX;

/// Per-vertex colors for one coloring round.
///
/// Slots hold the color's vertex id, or `usize::MAX` for `Color::Removed`.
/// No vertex id can reach that value because ids index a `Vec`. Updates go
/// through `fetch_min`, so concurrent lowering of the same slot never loses
/// the smaller value.
pub struct ColorMap {
    slots: Vec<AtomicUsize>,
}

impl ColorMap {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            slots: (0..vertex_count).map(|_| AtomicUsize::new(REMOVED)).collect(),
        }
    }

    #[inline]
    pub fn get(&self, vertex: usize) -> Color {
        match self.slots[vertex].load(Ordering::Relaxed) {
            REMOVED => Color::Removed,
            color => Color::Vertex(color),
        }
    }

    /// Resets every vertex: unclassified vertices take their own id as color,
    /// classified ones are pinned to `Color::Removed`.
    pub fn reset<E: Executor>(&self, executor: &E, state: &ClassificationState, grain: usize) {
        executor.for_each_parallel(0..self.slots.len(), grain, |v| {
            let color = if state.is_unclassified(v) { v } else { REMOVED };
            self.slots[v].store(color, Ordering::Relaxed);
        });
    }

    /// Lowers the color of `vertex` to `color` if smaller. Returns whether it
    /// changed.
    #[inline]
    fn lower(&self, vertex: usize, color: usize) -> bool {
        self.slots[vertex].fetch_min(color, Ordering::Relaxed) > color
    }

    #[inline]
    fn raw(&self, vertex: usize) -> usize {
        self.slots[vertex].load(Ordering::Relaxed)
    }
}

/// Propagates colors along incoming edges until no color changes.
///
/// At the fixpoint every frontier vertex carries the smallest vertex id that
/// reaches it through unclassified vertices. Classified vertices carry
/// `Removed`, which is larger than any id, so predecessor lists need no
/// filtering. Sweeps are separated by the executor barrier. Within a sweep
/// workers may read colors that are being lowered concurrently; a stale read
/// only costs an extra sweep because colors only decrease.
///
/// Returns the number of sweeps run, including the final one without change.
pub fn propagate_colors<E: Executor>(
    executor: &E,
    incoming: &AdjacencyView,
    frontier: &[usize],
    colors: &ColorMap,
    grain: usize,
) -> usize {
    let mut sweeps = 0;
    loop {
        sweeps += 1;
        let changed = AtomicBool::new(false);
        executor.for_each_parallel(0..frontier.len(), grain, |i| {
            let u = frontier[i];
            let mut lowered = false;
            for &v in incoming.read_neighbor(u) {
                let candidate = colors.raw(v);
                if candidate < colors.raw(u) && colors.lower(u, candidate) {
                    lowered = true;
                }
            }
            if lowered {
                changed.store(true, Ordering::Relaxed);
            }
        });
        trace!(target: "colorscc::coloring", "Sweep {} over {} vertices.", sweeps, frontier.len());
        if !changed.into_inner() {
            return sweeps;
        }
    }
}
