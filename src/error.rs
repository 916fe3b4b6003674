use thiserror::Error;

/// Errors raised while preparing an SCC computation.
///
/// The coloring algorithm itself never fails once it has a well-formed pair of
/// adjacency views. Everything here is reported by the constructors that build
/// those views, or by the setup of the execution backend.
#[derive(Error, Debug)]
pub enum Error {
    /// The offset array does not describe a valid compressed adjacency layout.
    #[error("invalid offsets at vertex {vertex}: {message}")]
    InvalidOffsets {
        vertex: usize,
        message: String,
    },

    /// A neighbor id points outside of `0..vertex_count`.
    #[error("neighbor {neighbor} of vertex {vertex} is out of range (vertex count {vertex_count})")]
    NeighborOutOfRange {
        vertex: usize,
        neighbor: usize,
        vertex_count: usize,
    },

    /// The incoming and outgoing views disagree on the number of vertices.
    #[error("incoming view has {incoming} vertices but outgoing view has {outgoing}")]
    VertexCountMismatch {
        incoming: usize,
        outgoing: usize,
    },

    /// The rayon worker pool could not be created.
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A YAML configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
