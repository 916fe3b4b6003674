use crate::error::{Error, Result};
use crate::types::graph_query::GraphQuery;

pub mod graph_query;

/// A compressed adjacency view of one edge direction (CSR layout).
///
/// For each vertex `v`, its neighbors are stored in
/// `neighbor_list[offsets[v]..offsets[v + 1]]`. Two instances describe a
/// directed graph: the incoming view (predecessors) and the outgoing view
/// (successors). Views are immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyView {
    /// Total number of vertices in the graph
    vertex_count: usize,

    /// Offset array with `vertex_count + 1` entries
    offsets: Vec<usize>,

    /// Flattened neighbor lists of all vertices, segmented by `offsets`
    neighbor_list: Vec<usize>,
}

impl AdjacencyView {
    /// Builds a view from raw CSR arrays, validating the layout.
    ///
    /// # Errors
    ///
    /// * `Error::InvalidOffsets` if `offsets` is empty, does not start at 0,
    ///   decreases, or does not end at `neighbor_list.len()`
    /// * `Error::NeighborOutOfRange` if a neighbor id is `>= vertex_count`
    pub fn try_new(offsets: Vec<usize>, neighbor_list: Vec<usize>) -> Result<Self> {
        let Some(&last) = offsets.last() else {
            return Err(Error::InvalidOffsets {
                vertex: 0,
                message: "offset array is empty".to_string(),
            });
        };
        if offsets[0] != 0 {
            return Err(Error::InvalidOffsets {
                vertex: 0,
                message: format!("first offset is {}, expected 0", offsets[0]),
            });
        }
        if last != neighbor_list.len() {
            return Err(Error::InvalidOffsets {
                vertex: offsets.len() - 1,
                message: format!(
                    "last offset is {}, expected neighbor count {}",
                    last,
                    neighbor_list.len()
                ),
            });
        }

        let vertex_count = offsets.len() - 1;
        for vertex in 0..vertex_count {
            let (start, end) = (offsets[vertex], offsets[vertex + 1]);
            if end < start {
                return Err(Error::InvalidOffsets {
                    vertex,
                    message: format!("offsets decrease from {} to {}", start, end),
                });
            }
            if let Some(&neighbor) = neighbor_list[start..end].iter().find(|&&n| n >= vertex_count) {
                return Err(Error::NeighborOutOfRange {
                    vertex,
                    neighbor,
                    vertex_count,
                });
            }
        }

        Ok(Self {
            vertex_count,
            offsets,
            neighbor_list,
        })
    }

    /// A view over `vertex_count` vertices without any edge.
    pub fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            offsets: vec![0; vertex_count + 1],
            neighbor_list: Vec::new(),
        }
    }

    /// Builds a view where the neighbors of `key(edge)` are `value(edge)`.
    ///
    /// Uses a counting sort, so neighbor lists keep the relative order of
    /// `edges`. Every endpoint must already be checked against `vertex_count`.
    fn from_keyed_edges<K, V>(vertex_count: usize, edges: &[(usize, usize)], key: K, value: V) -> Self
    where
        K: Fn(&(usize, usize)) -> usize,
        V: Fn(&(usize, usize)) -> usize,
    {
        let mut offsets = vec![0usize; vertex_count + 1];
        for edge in edges {
            offsets[key(edge) + 1] += 1;
        }
        for v in 0..vertex_count {
            offsets[v + 1] += offsets[v];
        }

        let mut cursor = offsets.clone();
        let mut neighbor_list = vec![0usize; edges.len()];
        for edge in edges {
            let slot = &mut cursor[key(edge)];
            neighbor_list[*slot] = value(edge);
            *slot += 1;
        }

        Self {
            vertex_count,
            offsets,
            neighbor_list,
        }
    }

    /// Returns the view of the opposite edge direction.
    pub fn transpose(&self) -> Self {
        let mut edges = Vec::with_capacity(self.neighbor_list.len());
        for v in 0..self.vertex_count {
            for &n in self.read_neighbor(v) {
                edges.push((n, v));
            }
        }
        Self::from_keyed_edges(self.vertex_count, &edges, |e| e.0, |e| e.1)
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn neighbor_list(&self) -> &[usize] {
        &self.neighbor_list
    }

    /// Whether the vertex has no stored neighbor at all.
    #[inline]
    pub fn is_isolated(&self, vertex_id: usize) -> bool {
        self.offsets[vertex_id] == self.offsets[vertex_id + 1]
    }
}

impl GraphQuery for AdjacencyView {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.neighbor_list.len()
    }

    #[inline]
    fn read_neighbor(&self, vertex_id: usize) -> &[usize] {
        &self.neighbor_list[self.offsets[vertex_id]..self.offsets[vertex_id + 1]]
    }
}

/// A directed graph held as an incoming view and an optional outgoing view.
///
/// The incoming view is always present because coloring and the per-color
/// BFS both walk predecessor lists. The outgoing view only speeds up trimming.
#[derive(Debug, Clone)]
pub struct DirectedGraph {
    incoming: AdjacencyView,
    outgoing: Option<AdjacencyView>,
}

impl DirectedGraph {
    /// Builds both views from an edge list of `(source, target)` pairs.
    ///
    /// Duplicate edges and self-loops are kept as given.
    ///
    /// # Errors
    ///
    /// `Error::NeighborOutOfRange` if an endpoint is `>= vertex_count`.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        if let Some(&(src, dst)) = edges
            .iter()
            .find(|(src, dst)| *src >= vertex_count || *dst >= vertex_count)
        {
            let (vertex, neighbor) = if src >= vertex_count { (dst, src) } else { (src, dst) };
            return Err(Error::NeighborOutOfRange {
                vertex,
                neighbor,
                vertex_count,
            });
        }

        let incoming = AdjacencyView::from_keyed_edges(vertex_count, edges, |e| e.1, |e| e.0);
        let outgoing = AdjacencyView::from_keyed_edges(vertex_count, edges, |e| e.0, |e| e.1);
        Ok(Self {
            incoming,
            outgoing: Some(outgoing),
        })
    }

    /// Pairs an incoming view with an optional outgoing view.
    ///
    /// # Errors
    ///
    /// `Error::VertexCountMismatch` if the two views disagree on the vertex count.
    pub fn from_views(incoming: AdjacencyView, outgoing: Option<AdjacencyView>) -> Result<Self> {
        if let Some(outgoing) = &outgoing {
            if outgoing.vertex_count() != incoming.vertex_count() {
                return Err(Error::VertexCountMismatch {
                    incoming: incoming.vertex_count(),
                    outgoing: outgoing.vertex_count(),
                });
            }
        }
        Ok(Self { incoming, outgoing })
    }

    pub fn incoming(&self) -> &AdjacencyView {
        &self.incoming
    }

    pub fn outgoing(&self) -> Option<&AdjacencyView> {
        self.outgoing.as_ref()
    }

    /// Drops the outgoing view, keeping only predecessor lists.
    pub fn into_incoming_only(self) -> Self {
        Self {
            incoming: self.incoming,
            outgoing: None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.incoming.vertex_count()
    }
}

/// Classification of a vertex: not yet in any SCC, or assigned to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SccId {
    Unclassified,
    Assigned(usize),
}

impl SccId {
    pub fn is_assigned(self) -> bool {
        matches!(self, SccId::Assigned(_))
    }
}

/// Color of a vertex during one coloring round.
///
/// `Removed` orders above every vertex color, so it never wins a minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Vertex(usize),
    Removed,
}
