use crate::types::graph_query::GraphQuery;

/// Computes strongly connected components (SCCs) using Tarjan's algorithm.
///
/// Sequential reference implementation used to cross-check the coloring
/// algorithm. The DFS is driven by an explicit stack so deep graphs cannot
/// overflow the call stack. Works on either edge direction, since a graph and
/// its transpose have the same SCCs.
///
/// # Returns
///
/// One vector per component, in the order Tarjan's algorithm completes them.
///
/// # Time Complexity
/// O(V + E)
pub fn tarjan_scc<G: GraphQuery>(graph: &G) -> Vec<Vec<usize>> {
    let n = graph.vertex_count();
    let mut index = 0;
    let mut indices = vec![usize::MAX; n];
    let mut low_links = vec![usize::MAX; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut components = Vec::new();

    #[derive(Clone, Copy)]
    enum State {
        Start,
        ProcessNeighbor(usize),
        Finish,
    }

    for start_idx in 0..n {
        if indices[start_idx] != usize::MAX {
            continue;
        }

        let mut dfs_stack = vec![(start_idx, State::Start)];
        while let Some((v_idx, state)) = dfs_stack.pop() {
            match state {
                State::Start => {
                    indices[v_idx] = index;
                    low_links[v_idx] = index;
                    index += 1;
                    stack.push(v_idx);
                    on_stack[v_idx] = true;
                    dfs_stack.push((v_idx, State::ProcessNeighbor(0)));
                }
                State::ProcessNeighbor(neighbor_pos) => {
                    let neighbors = graph.read_neighbor(v_idx);
                    if let Some(&n_idx) = neighbors.get(neighbor_pos) {
                        dfs_stack.push((v_idx, State::ProcessNeighbor(neighbor_pos + 1)));
                        if indices[n_idx] == usize::MAX {
                            dfs_stack.push((n_idx, State::Start));
                        } else if on_stack[n_idx] {
                            // back edge
                            low_links[v_idx] = low_links[v_idx].min(indices[n_idx]);
                        }
                    } else {
                        dfs_stack.push((v_idx, State::Finish));
                    }
                }
                State::Finish => {
                    // children still on the stack share their low link
                    for &n_idx in graph.read_neighbor(v_idx) {
                        if on_stack[n_idx] {
                            low_links[v_idx] = low_links[v_idx].min(low_links[n_idx]);
                        }
                    }

                    if indices[v_idx] == low_links[v_idx] {
                        let mut component = Vec::new();
                        while let Some(w_idx) = stack.pop() {
                            on_stack[w_idx] = false;
                            component.push(w_idx);
                            if w_idx == v_idx {
                                break;
                            }
                        }
                        components.push(component);
                    }
                }
            }
        }
    }

    components
}
