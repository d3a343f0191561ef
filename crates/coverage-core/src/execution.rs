//! Execution engines for scheduling chunks of trials
//!
//! A coverage bucket is split into independent chunks of Monte Carlo trials.
//! The engine decides whether those chunks run one after another on the
//! calling thread or on a rayon pool. Either way `execute_batch` returns the
//! chunk results in index order.

#[cfg(feature = "parallel")]
use crate::Result;

/// Trait for execution engines that control how batches are performed
pub trait ExecutionEngine: Clone + Send + Sync {
    /// Execute `f(0)..f(count)` and collect the results in index order
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send;

    /// Get the number of threads available
    fn num_threads(&self) -> usize;

    /// Chunk size this engine would pick for `n_items` units of work
    fn preferred_chunk_size(&self, n_items: usize) -> usize;
}

/// Sequential execution engine
///
/// Executes all operations sequentially in the current thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialEngine;

impl SequentialEngine {
    /// Create a new sequential engine
    pub fn new() -> Self {
        Self
    }
}

impl ExecutionEngine for SequentialEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        (0..count).map(f).collect()
    }

    fn num_threads(&self) -> usize {
        1
    }

    fn preferred_chunk_size(&self, n_items: usize) -> usize {
        // One chunk holds every trial
        n_items.max(1)
    }
}

/// Parallel execution engine using Rayon
///
/// Runs on the global pool unless built with [`ParallelEngine::with_num_threads`].
#[cfg(feature = "parallel")]
#[derive(Clone, Debug, Default)]
pub struct ParallelEngine {
    thread_pool: Option<std::sync::Arc<rayon::ThreadPool>>,
}

#[cfg(feature = "parallel")]
impl ParallelEngine {
    /// Create a new parallel engine on the global thread pool
    pub fn new() -> Self {
        Self { thread_pool: None }
    }

    /// Create with a dedicated pool of `num_threads` workers
    pub fn with_num_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| crate::Error::Execution(format!("Failed to create thread pool: {e}")))?;

        Ok(Self {
            thread_pool: Some(std::sync::Arc::new(pool)),
        })
    }
}

#[cfg(feature = "parallel")]
impl ExecutionEngine for ParallelEngine {
    fn execute_batch<F, R>(&self, count: usize, f: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync + Send,
        R: Send,
    {
        use rayon::prelude::*;

        match &self.thread_pool {
            Some(pool) => pool.install(|| (0..count).into_par_iter().map(f).collect()),
            None => (0..count).into_par_iter().map(f).collect(),
        }
    }

    fn num_threads(&self) -> usize {
        self.thread_pool
            .as_ref()
            .map_or_else(rayon::current_num_threads, |pool| pool.current_num_threads())
    }

    fn preferred_chunk_size(&self, n_items: usize) -> usize {
        // About six chunks per worker, never below 64 trials
        let target_chunks = self.num_threads().max(1) * 6;
        n_items.div_ceil(target_chunks).max(64).min(n_items.max(1))
    }
}

/// Create a sequential engine
pub fn sequential() -> SequentialEngine {
    SequentialEngine::new()
}

/// Create a parallel engine on the global rayon pool
#[cfg(feature = "parallel")]
pub fn parallel() -> ParallelEngine {
    ParallelEngine::new()
}

/// Engine selected by the enabled features
#[cfg(feature = "parallel")]
pub type AutoEngine = ParallelEngine;

/// Engine selected by the enabled features
#[cfg(not(feature = "parallel"))]
pub type AutoEngine = SequentialEngine;

/// Create the engine selected by the enabled features
pub fn auto_engine() -> AutoEngine {
    AutoEngine::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_engine() {
        let engine = sequential();
        assert_eq!(engine.num_threads(), 1);

        let squares = engine.execute_batch(5, |i| i * i);
        assert_eq!(squares, vec![0, 1, 4, 9, 16]);
    }

    #[test]
    fn test_sequential_chunk_size() {
        let engine = sequential();
        assert_eq!(engine.preferred_chunk_size(10_000), 10_000);
        assert_eq!(engine.preferred_chunk_size(0), 1);
    }

    #[test]
    fn test_empty_batch() {
        let results: Vec<usize> = sequential().execute_batch(0, |i| i);
        assert!(results.is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_engine_preserves_order() {
        let engine = ParallelEngine::with_num_threads(4).unwrap();
        assert_eq!(engine.num_threads(), 4);

        let results = engine.execute_batch(1000, |i| i as u64 * 3);
        let expected: Vec<u64> = (0..1000).map(|i| i * 3).collect();
        assert_eq!(results, expected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_chunk_size_bounds() {
        let engine = ParallelEngine::with_num_threads(8).unwrap();
        let chunk = engine.preferred_chunk_size(10_000);
        assert_eq!(chunk, 209);
        assert_eq!(engine.preferred_chunk_size(10), 10);
        assert_eq!(engine.preferred_chunk_size(1000), 64);
    }
}
