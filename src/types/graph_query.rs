/// A trait that defines query operations over one direction of a graph.
///
/// Vertex ids are dense indices in `0..vertex_count()`. Implementors hand out
/// neighbor lists as borrowed slices so the hot loops of the SCC phases never
/// allocate.
pub trait GraphQuery {
    /// Total number of vertices.
    fn vertex_count(&self) -> usize;

    /// Total number of stored edges.
    fn edge_count(&self) -> usize;

    /// Retrieves the neighbors of a given vertex, in stored order.
    ///
    /// # Panics
    ///
    /// Panics if `vertex_id >= vertex_count()`.
    fn read_neighbor(&self, vertex_id: usize) -> &[usize];

    /// Number of neighbors of a vertex.
    fn degree(&self, vertex_id: usize) -> usize {
        self.read_neighbor(vertex_id).len()
    }

    /// Checks if a specific vertex exists.
    fn has_vertex(&self, vertex_id: usize) -> bool {
        vertex_id < self.vertex_count()
    }

    /// Determines if `dst_id` appears in the neighbor list of `src_id`.
    fn has_edge(&self, src_id: usize, dst_id: usize) -> bool {
        self.has_vertex(src_id) && self.read_neighbor(src_id).contains(&dst_id)
    }
}
