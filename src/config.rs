use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Minimum number of frontier vertices a coloring worker should receive.
pub const COLOR_GRAIN_SIZE: usize = 1000;

/// Minimum number of colors a BFS worker should receive.
pub const BFS_GRAIN_SIZE: usize = 3;

/// Minimum number of vertices a trimming worker should receive.
pub const TRIM_GRAIN_SIZE: usize = 1000;

/// Concurrency strategy used to run every phase of the algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Single-threaded loops.
    Serial,
    /// Data-parallel loops on a dedicated rayon pool.
    #[default]
    Rayon,
    /// Explicit scoped worker threads over contiguous chunks.
    Threads,
}

/// Configuration for the coloring SCC algorithm.
///
/// # Fields
///
/// * `thread_num` - Number of workers; `0` means the available parallelism
/// * `backend` - Which executor runs the parallel phases
/// * `use_outgoing` - Use the outgoing view for trimming when one is supplied
/// * `color_grain` / `bfs_grain` / `trim_grain` - Minimum work per worker
///   before another worker is added
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SCCConfig {
    pub thread_num: usize,
    pub backend: Backend,
    pub use_outgoing: bool,
    pub color_grain: usize,
    pub bfs_grain: usize,
    pub trim_grain: usize,
}

impl Default for SCCConfig {
    fn default() -> Self {
        Self {
            thread_num: 0,
            backend: Backend::default(),
            use_outgoing: true,
            color_grain: COLOR_GRAIN_SIZE,
            bfs_grain: BFS_GRAIN_SIZE,
            trim_grain: TRIM_GRAIN_SIZE,
        }
    }
}

impl SCCConfig {
    /// Parses a configuration from YAML. Missing fields keep their defaults.
    ///
    /// ```
    /// use colorscc::config::{Backend, SCCConfig};
    ///
    /// let config = SCCConfig::from_yaml_str("backend: threads\nthread_num: 2\n").unwrap();
    /// assert_eq!(config.backend, Backend::Threads);
    /// assert_eq!(config.thread_num, 2);
    /// assert!(config.use_outgoing);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Number of workers to use, resolving `0` to the machine's parallelism.
    pub fn effective_threads(&self) -> usize {
        if self.thread_num == 0 {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        } else {
            self.thread_num
        }
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SCCConfig::default();
        assert_eq!(config.backend, Backend::Rayon);
        assert_eq!(config.color_grain, COLOR_GRAIN_SIZE);
        assert_eq!(config.bfs_grain, BFS_GRAIN_SIZE);
        assert!(config.effective_threads() >= 1);
    }

    #[test]
    fn test_yaml_partial() {
        let config = SCCConfig::from_yaml_str("use_outgoing: false\nbfs_grain: 8\n").unwrap();
        assert!(!config.use_outgoing);
        assert_eq!(config.bfs_grain, 8);
        assert_eq!(config.trim_grain, TRIM_GRAIN_SIZE);
    }

    #[test]
    fn test_yaml_rejects_unknown_backend() {
        assert!(SCCConfig::from_yaml_str("backend: gpu\n").is_err());
    }
}
