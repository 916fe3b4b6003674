//! Strongly connected components of large sparse directed graphs, computed
//! with the coloring variant of the forward-backward algorithm plus trimming.
//!
//! ```
//! use colorscc::{compute_scc, DirectedGraph};
//!
//! // 3-cycle {0, 1, 2} and chain 3 -> 4 -> 5
//! let graph = DirectedGraph::from_edges(6, &[(0, 1), (1, 2), (2, 0), (3, 4), (4, 5)]).unwrap();
//! let scc_id = compute_scc(graph.incoming(), graph.outgoing(), true);
//! assert_eq!(scc_id[0], scc_id[1]);
//! assert_eq!(scc_id[1], scc_id[2]);
//! assert_ne!(scc_id[3], scc_id[4]);
//! ```
pub mod algorithms;
pub mod config;
pub mod error;
pub mod executor;
pub mod types;
pub mod util;

pub use algorithms::scc::{compute_scc, compute_scc_with, SCCController, SccResult, SCC};
pub use config::{Backend, SCCConfig};
pub use error::{Error, Result};
pub use types::{AdjacencyView, Color, DirectedGraph, SccId};
pub use types::graph_query::GraphQuery;
