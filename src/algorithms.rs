//! The coloring SCC algorithm and its phases.
//!
//! [`scc::color_scc`] drives the loop: a first trimming pass, then coloring to a
//! fixpoint, one BFS per surviving color, and incremental trimming until
//! no vertex is left unclassified.
pub mod bfs;
pub mod coloring;
pub mod scc;
pub mod state;
pub mod tarjan;
pub mod trim;
