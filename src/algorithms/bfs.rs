use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashSet;
use log::trace;

use crate::algorithms::coloring::ColorMap;
use crate::algorithms::state::{ClassificationState, SccCounter};
use crate::executor::Executor;
use crate::types::graph_query::GraphQuery;
use crate::types::{AdjacencyView, Color};

/// Collects the distinct colors carried by frontier vertices, ascending.
///
/// `Removed` never shows up because every frontier vertex is unclassified.
pub fn unique_colors<E: Executor>(
    executor: &E,
    frontier: &[usize],
    colors: &ColorMap,
    grain: usize,
) -> Vec<usize> {
    let color_set = DashSet::<usize>::new();
    executor.for_each_parallel(0..frontier.len(), grain, |i| {
        if let Color::Vertex(color) = colors.get(frontier[i]) {
            color_set.insert(color);
        }
    });
    let mut unique = color_set.into_iter().collect::<Vec<_>>();
    unique.sort_unstable();
    unique
}

/// Walks incoming edges from the vertex `color`, assigning `scc_id` to every
/// reached unclassified vertex that carries the same color.
///
/// The root is the smallest vertex reaching every vertex of its color, so the
/// vertices found are exactly those that also reach the root: its SCC.
/// Returns the size of the component.
pub fn bfs_color(
    incoming: &AdjacencyView,
    color: usize,
    scc_id: usize,
    colors: &ColorMap,
    state: &ClassificationState,
) -> usize {
    let mut queue = VecDeque::new();
    state.assign(color, scc_id);
    queue.push_back(color);
    let mut size = 1;

    while let Some(current) = queue.pop_front() {
        for &neighbor in incoming.read_neighbor(current) {
            if colors.get(neighbor) == Color::Vertex(color) && state.is_unclassified(neighbor) {
                state.assign(neighbor, scc_id);
                queue.push_back(neighbor);
                size += 1;
            }
        }
    }
    size
}

/// Runs one color-restricted BFS per unique color, in parallel.
///
/// Color `i` of `unique` gets id `base + i` from a single reservation on
/// `counter`. Vertex sets of different colors are disjoint, so BFS tasks
/// never write the same classification slot. Returns the number of vertices
/// classified.
pub fn materialize<E: Executor>(
    executor: &E,
    incoming: &AdjacencyView,
    unique: &[usize],
    colors: &ColorMap,
    state: &ClassificationState,
    counter: &SccCounter,
    grain: usize,
) -> usize {
    let ids = counter.reserve(unique.len());
    let classified = AtomicUsize::new(0);
    executor.for_each_parallel(0..unique.len(), grain, |i| {
        let size = bfs_color(incoming, unique[i], ids.start + i, colors, state);
        classified.fetch_add(size, Ordering::Relaxed);
    });

    let classified = classified.into_inner();
    trace!(
        target: "colorscc::bfs",
        "Materialized {} components covering {} vertices.",
        unique.len(),
        classified
    );
    classified
}

#[cfg(test)]
mod test_bfs {
    use super::*;
    use crate::algorithms::coloring::propagate_colors;
    use crate::executor::{SerialExecutor, ThreadExecutor};
    use crate::types::{DirectedGraph, SccId};

    /// Two 2-cycles {0, 1} and {2, 3} joined by 1 -> 2, plus 4 fed by 3.
    fn colored_graph() -> (DirectedGraph, ClassificationState, ColorMap, Vec<usize>) {
        let graph = DirectedGraph::from_edges(5, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2), (3, 4)]).unwrap();
        let state = ClassificationState::new(5);
        let frontier: Vec<usize> = (0..5).collect();
        let colors = ColorMap::new(5);
        colors.reset(&SerialExecutor, &state, 1);
        propagate_colors(&SerialExecutor, graph.incoming(), &frontier, &colors, 1);
        (graph, state, colors, frontier)
    }

    #[test]
    fn test_unique_colors() {
        let (_graph, _state, colors, frontier) = colored_graph();
        assert_eq!(unique_colors(&ThreadExecutor::new(2), &frontier, &colors, 1), vec![0]);
    }

    #[test]
    fn test_bfs_only_takes_root_component() {
        let (graph, state, colors, _frontier) = colored_graph();
        let size = bfs_color(graph.incoming(), 0, 9, &colors, &state);
        assert_eq!(size, 2);
        assert_eq!(state.get(0), SccId::Assigned(9));
        assert_eq!(state.get(1), SccId::Assigned(9));
        for v in 2..5 {
            assert_eq!(state.get(v), SccId::Unclassified);
        }
    }

    #[test]
    fn test_materialize_reserves_ids() {
        // disjoint 2-cycles {0, 1} and {2, 3}
        let graph = DirectedGraph::from_edges(4, &[(0, 1), (1, 0), (2, 3), (3, 2)]).unwrap();
        let state = ClassificationState::new(4);
        let frontier: Vec<usize> = (0..4).collect();
        let colors = ColorMap::new(4);
        colors.reset(&SerialExecutor, &state, 1);
        propagate_colors(&SerialExecutor, graph.incoming(), &frontier, &colors, 1);

        let unique = unique_colors(&SerialExecutor, &frontier, &colors, 1);
        assert_eq!(unique, vec![0, 2]);

        let counter = SccCounter::new();
        counter.next_id();
        let classified = materialize(&ThreadExecutor::new(2), graph.incoming(), &unique, &colors, &state, &counter, 1);
        assert_eq!(classified, 4);
        assert_eq!(counter.issued(), 3);
        assert_eq!(state.get(0), SccId::Assigned(1));
        assert_eq!(state.get(1), SccId::Assigned(1));
        assert_eq!(state.get(2), SccId::Assigned(2));
        assert_eq!(state.get(3), SccId::Assigned(2));
    }
}
