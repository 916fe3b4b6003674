use std::sync::Arc;

use log::debug;

use crate::algorithms::bfs::{materialize, unique_colors};
use crate::algorithms::coloring::{propagate_colors, ColorMap};
use crate::algorithms::state::{ClassificationState, SccCounter};
use crate::algorithms::trim::Trimmer;
use crate::config::{Backend, SCCConfig};
use crate::error::{Error, Result};
use crate::executor::{Executor, RayonExecutor, SerialExecutor, ThreadExecutor};
use crate::types::graph_query::GraphQuery;
use crate::types::{AdjacencyView, DirectedGraph};
use crate::util::{components_from_ids, same_partition};

/// Trait for computing Strongly Connected Components (SCC) in a graph
///
/// # Type Parameters
///
/// * `T` - The type of node identifiers in the graph
pub trait SCC<T> {
    /// Computes strongly connected components in the graph
    ///
    /// # Returns
    ///
    /// * `Vec<Vec<T>>` - One entry per component, each listing its vertices
    fn scc(&self, scc_config: SCCConfig) -> Result<Vec<Vec<T>>>;
}

/// Outcome of an SCC computation.
///
/// `scc_id[v]` is the identifier of the component holding `v`. Identifiers are
/// unique per component and lie in `0..scc_count`, but their order follows
/// allocation (trimming and BFS batches), not vertex order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SccResult {
    pub scc_id: Vec<usize>,
    pub scc_count: usize,
}

impl SccResult {
    /// Groups vertices by component. Components are ordered by their
    /// smallest vertex, and vertices ascend within each component.
    pub fn components(&self) -> Vec<Vec<usize>> {
        components_from_ids(&self.scc_id)
    }

    /// Whether both results induce the same partition of the vertices,
    /// regardless of the identifiers used.
    pub fn same_partition(&self, other: &SccResult) -> bool {
        same_partition(&self.scc_id, &other.scc_id)
    }
}

/// Runs the coloring SCC algorithm with trimming on the given executor.
///
/// Pass `outgoing` to trim with both edge directions; with `None` the
/// successor test is inferred from the incoming view. The loop alternates
/// coloring, one BFS per surviving color, and trimming until every vertex is
/// classified. Each iteration classifies at least the root of every color,
/// so the frontier strictly shrinks.
pub fn color_scc<E: Executor>(
    executor: &E,
    incoming: &AdjacencyView,
    outgoing: Option<&AdjacencyView>,
    config: &SCCConfig,
) -> SccResult {
    let n = incoming.vertex_count();
    let state = ClassificationState::new(n);
    let counter = SccCounter::new();
    let trimmer = Trimmer::new(incoming, outgoing);

    let first_trimmed = trimmer.first_pass(executor, &state, &counter, config.trim_grain);
    let mut frontier: Vec<usize> = (0..n).collect();
    state.retain_unclassified(&mut frontier);
    debug!(
        target: "colorscc",
        "First trim removed {} of {} vertices (dual: {}, workers: {}).",
        first_trimmed,
        n,
        trimmer.is_dual(),
        executor.worker_count()
    );

    let colors = ColorMap::new(n);
    let mut iteration = 0usize;
    while !frontier.is_empty() {
        iteration += 1;
        let frontier_size = frontier.len();

        colors.reset(executor, &state, config.trim_grain);
        let sweeps = propagate_colors(executor, incoming, &frontier, &colors, config.color_grain);
        let unique = unique_colors(executor, &frontier, &colors, config.color_grain);
        let classified = materialize(
            executor,
            incoming,
            &unique,
            &colors,
            &state,
            &counter,
            config.bfs_grain,
        );
        state.retain_unclassified(&mut frontier);

        let trimmed = trimmer.trim(executor, &frontier, &state, &counter, config.trim_grain);
        state.retain_unclassified(&mut frontier);

        debug_assert!(frontier.len() < frontier_size, "frontier did not shrink");
        debug!(
            target: "colorscc",
            "Iteration {}: {} frontier vertices, {} sweeps, {} colors covering {} vertices, {} trimmed, {} left.",
            iteration,
            frontier_size,
            sweeps,
            unique.len(),
            classified,
            trimmed,
            frontier.len()
        );
    }

    let scc_count = counter.issued();
    debug!(
        target: "colorscc",
        "Found {} SCCs in {} iterations.",
        scc_count,
        iteration
    );
    SccResult {
        scc_id: state.into_ids(),
        scc_count,
    }
}

/// Computes SCCs with an explicit configuration.
///
/// The outgoing view is used only when `config.use_outgoing` is set.
///
/// # Errors
///
/// * `Error::VertexCountMismatch` if the two views disagree on the vertex count
/// * `Error::ThreadPool` if a dedicated rayon pool cannot be built
pub fn compute_scc_with(
    incoming: &AdjacencyView,
    outgoing: Option<&AdjacencyView>,
    config: &SCCConfig,
) -> Result<SccResult> {
    let outgoing = outgoing.filter(|_| config.use_outgoing);
    if let Some(outgoing) = outgoing {
        if outgoing.vertex_count() != incoming.vertex_count() {
            return Err(Error::VertexCountMismatch {
                incoming: incoming.vertex_count(),
                outgoing: outgoing.vertex_count(),
            });
        }
    }

    let result = match config.backend {
        Backend::Serial => color_scc(&SerialExecutor, incoming, outgoing, config),
        Backend::Rayon => {
            let executor = if config.thread_num == 0 {
                RayonExecutor::global()
            } else {
                RayonExecutor::new(config.thread_num)?
            };
            color_scc(&executor, incoming, outgoing, config)
        }
        Backend::Threads => {
            let executor = ThreadExecutor::new(config.effective_threads());
            color_scc(&executor, incoming, outgoing, config)
        }
    };
    Ok(result)
}

/// Computes the SCC identifier of every vertex.
///
/// Runs on rayon's global pool with the default grain sizes. `outgoing` is
/// ignored unless `use_outgoing` is set.
///
/// # Panics
///
/// Panics if `outgoing` is used and has a different vertex count than
/// `incoming`. Both views must describe the same vertex numbering.
pub fn compute_scc(
    incoming: &AdjacencyView,
    outgoing: Option<&AdjacencyView>,
    use_outgoing: bool,
) -> Vec<usize> {
    let outgoing = outgoing.filter(|_| use_outgoing);
    if let Some(outgoing) = outgoing {
        assert_eq!(
            incoming.vertex_count(),
            outgoing.vertex_count(),
            "incoming and outgoing views must have the same vertex count"
        );
    }
    color_scc(&RayonExecutor::global(), incoming, outgoing, &SCCConfig::default()).scc_id
}

/// Controller for SCC computations over a shared graph.
///
/// # Fields
///
/// * `graph` - Thread-safe reference (Arc) to the graph to be analyzed
pub struct SCCController {
    graph: Arc<DirectedGraph>,
}

impl SCCController {
    pub fn new(graph: Arc<DirectedGraph>) -> Self {
        Self { graph }
    }

    /// Runs the coloring algorithm and returns the per-vertex identifiers.
    pub fn compute(&self, scc_config: &SCCConfig) -> Result<SccResult> {
        compute_scc_with(self.graph.incoming(), self.graph.outgoing(), scc_config)
    }
}

impl SCC<usize> for SCCController {
    fn scc(&self, scc_config: SCCConfig) -> Result<Vec<Vec<usize>>> {
        Ok(self.compute(&scc_config)?.components())
    }
}

#[cfg(test)]
mod test_scc {
    use super::*;

    fn all_configs() -> Vec<SCCConfig> {
        let mut configs = Vec::new();
        for backend in [Backend::Serial, Backend::Rayon, Backend::Threads] {
            for use_outgoing in [true, false] {
                configs.push(SCCConfig {
                    thread_num: 3,
                    backend,
                    use_outgoing,
                    color_grain: 1,
                    bfs_grain: 1,
                    trim_grain: 1,
                });
            }
        }
        configs
    }

    #[test]
    fn test_cycle_and_chain() {
        let graph = Arc::new(
            DirectedGraph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5)]).unwrap(),
        );
        let controller = SCCController::new(graph);
        for config in all_configs() {
            let result = controller.compute(&config).unwrap();
            assert_eq!(result.scc_count, 4);
            assert_eq!(
                result.components(),
                vec![vec![0, 1, 2], vec![3], vec![4], vec![5]]
            );
            assert_eq!(controller.scc(config).unwrap().len(), 4);
        }
    }

    #[test]
    fn test_empty_graph() {
        let graph = DirectedGraph::from_edges(0, &[]).unwrap();
        for config in all_configs() {
            let result = compute_scc_with(graph.incoming(), graph.outgoing(), &config).unwrap();
            assert!(result.scc_id.is_empty());
            assert_eq!(result.scc_count, 0);
        }
    }

    #[test]
    fn test_self_loop_resolved_by_coloring() {
        let graph = DirectedGraph::from_edges(3, &[(0, 0), (1, 2)]).unwrap();
        for config in all_configs() {
            let result = compute_scc_with(graph.incoming(), graph.outgoing(), &config).unwrap();
            assert_eq!(result.scc_count, 3);
            assert_eq!(result.components(), vec![vec![0], vec![1], vec![2]]);
        }
    }

    #[test]
    fn test_vertex_count_mismatch() {
        let incoming = AdjacencyView::empty(2);
        let outgoing = AdjacencyView::empty(3);
        let config = SCCConfig::default();
        assert!(matches!(
            compute_scc_with(&incoming, Some(&outgoing), &config),
            Err(Error::VertexCountMismatch { incoming: 2, outgoing: 3 })
        ));

        let config = SCCConfig {
            use_outgoing: false,
            ..SCCConfig::default()
        };
        let result = compute_scc_with(&incoming, Some(&outgoing), &config).unwrap();
        assert_eq!(result.scc_count, 2);
    }

    #[test]
    fn test_compute_scc_entry_point() {
        let graph = DirectedGraph::from_edges(4, &[(0, 1), (1, 0), (2, 3)]).unwrap();
        let with_outgoing = compute_scc(graph.incoming(), graph.outgoing(), true);
        let incoming_only = compute_scc(graph.incoming(), None, false);
        assert!(same_partition(&with_outgoing, &incoming_only));
        assert_eq!(with_outgoing[0], with_outgoing[1]);
        assert_ne!(with_outgoing[2], with_outgoing[3]);
    }
}
