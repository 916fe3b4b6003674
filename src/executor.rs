use std::ops::Range;

use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;

/// A fork-join runner for the phases of the SCC algorithm.
///
/// `for_each_parallel` calls `body` exactly once for every index in `range`
/// and returns only after all of those calls have finished. That return is
/// the barrier between phases: every write made inside `body` is visible to
/// the caller and to the next phase.
pub trait Executor: Sync {
    /// Upper bound on the number of workers a single call may use.
    fn worker_count(&self) -> usize;

    /// Runs `body` over `range`, giving each worker at least `grain` indices
    /// before another worker is added.
    fn for_each_parallel<F>(&self, range: Range<usize>, grain: usize, body: F)
    where
        F: Fn(usize) + Sync + Send;
}

/// Number of workers to use for `len` items: one per `grain` items, between
/// one and `max_workers`.
pub fn worker_split(len: usize, grain: usize, max_workers: usize) -> usize {
    (len / grain.max(1)).clamp(1, max_workers.max(1))
}

/// Runs every phase on the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialExecutor;

impl Executor for SerialExecutor {
    fn worker_count(&self) -> usize {
        1
    }

    fn for_each_parallel<F>(&self, range: Range<usize>, _grain: usize, body: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        range.for_each(body);
    }
}

/// Data-parallel loops on rayon, either on a dedicated pool or on the global one.
pub struct RayonExecutor {
    pool: Option<ThreadPool>,
}

impl RayonExecutor {
    /// Builds a dedicated pool with `thread_num` workers.
    pub fn new(thread_num: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(thread_num)
            .thread_name(|i| format!("colorscc-rayon-{i}"))
            .build()?;
        Ok(Self { pool: Some(pool) })
    }

    /// Runs on rayon's global pool.
    pub fn global() -> Self {
        Self { pool: None }
    }
}

impl Executor for RayonExecutor {
    fn worker_count(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    fn for_each_parallel<F>(&self, range: Range<usize>, grain: usize, body: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        let run = || {
            range
                .into_par_iter()
                .with_min_len(grain.max(1))
                .for_each(body);
        };
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

/// Explicit worker threads, each owning one contiguous chunk of the range.
///
/// Workers are spawned per call and joined before returning. Small inputs
/// run on fewer workers, down to the calling thread alone.
#[derive(Debug, Clone, Copy)]
pub struct ThreadExecutor {
    thread_num: usize,
}

impl ThreadExecutor {
    pub fn new(thread_num: usize) -> Self {
        Self {
            thread_num: thread_num.max(1),
        }
    }
}

impl Executor for ThreadExecutor {
    fn worker_count(&self) -> usize {
        self.thread_num
    }

    fn for_each_parallel<F>(&self, range: Range<usize>, grain: usize, body: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        let len = range.len();
        if len == 0 {
            return;
        }
        let workers = worker_split(len, grain, self.thread_num);
        if workers == 1 {
            range.for_each(body);
            return;
        }

        let body = &body;
        std::thread::scope(|scope| {
            for worker in 0..workers {
                let start = range.start + worker * len / workers;
                let end = range.start + (worker + 1) * len / workers;
                scope.spawn(move || (start..end).for_each(body));
            }
        });
    }
}

#[cfg(test)]
mod test_executor {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn check_each_index_once<E: Executor>(executor: &E) {
        let hits: Vec<AtomicUsize> = (0..1000).map(|_| AtomicUsize::new(0)).collect();
        executor.for_each_parallel(100..1000, 7, |i| {
            hits[i].fetch_add(1, Ordering::Relaxed);
        });
        for (i, hit) in hits.iter().enumerate() {
            let expected = usize::from(i >= 100);
            assert_eq!(hit.load(Ordering::Relaxed), expected, "index {i}");
        }
    }

    #[test]
    fn test_worker_split() {
        assert_eq!(worker_split(0, 1000, 8), 1);
        assert_eq!(worker_split(999, 1000, 8), 1);
        assert_eq!(worker_split(2500, 1000, 8), 2);
        assert_eq!(worker_split(1_000_000, 1000, 8), 8);
        assert_eq!(worker_split(10, 0, 4), 4);
        assert_eq!(worker_split(10, 3, 0), 1);
    }

    #[test]
    fn test_serial_executor() {
        check_each_index_once(&SerialExecutor);
    }

    #[test]
    fn test_rayon_executor() {
        let executor = RayonExecutor::new(4).unwrap();
        assert_eq!(executor.worker_count(), 4);
        check_each_index_once(&executor);
        check_each_index_once(&RayonExecutor::global());
    }

    #[test]
    fn test_thread_executor() {
        check_each_index_once(&ThreadExecutor::new(4));
        check_each_index_once(&ThreadExecutor::new(1));
        ThreadExecutor::new(3).for_each_parallel(5..5, 1, |_| panic!("empty range"));
    }
}
