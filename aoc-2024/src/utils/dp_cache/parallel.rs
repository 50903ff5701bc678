//! Parallel DP cache implementation with pluggable backends.

use std::hash::Hash;
use std::marker::PhantomData;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::ThreadPool;

use super::backend::ParallelBackend;
use super::problem::ParallelDpProblem;

/// Thread-safe counterpart of [`DpCache`](super::DpCache).
///
/// Dependencies are resolved in parallel with Rayon, either on the global
/// pool or on a caller-supplied one. Two threads may compute the same index
/// concurrently; the first insert wins and both observe the stored value.
///
/// # Warning: No Cycle Detection
///
/// Dependencies must form a DAG. A cycle overflows the stack.
///
/// # Example
///
/// ```rust
/// use aoc_2024::utils::dp_cache::{DashMapBackend, DpProblem, ParallelDpCache};
///
/// struct Collatz;
///
/// impl DpProblem<u64, u64> for Collatz {
///     fn base_case(&self, n: &u64) -> Option<u64> {
///         (*n <= 1).then_some(0)
///     }
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         if n % 2 == 0 { vec![n / 2] } else { vec![3 * n + 1] }
///     }
///     fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
///         1 + deps[0]
///     }
/// }
///
/// let cache = ParallelDpCache::new(DashMapBackend::new(), Collatz);
/// assert_eq!(cache.get(&27), 111);
/// ```
pub struct ParallelDpCache<I, K, B, P>
where
    I: Hash + Eq + Clone + Send + Sync,
    K: Clone + Send + Sync,
    B: ParallelBackend<I, K>,
    P: ParallelDpProblem<I, K>,
{
    backend: B,
    problem: P,
    pool: Option<Arc<ThreadPool>>,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> ParallelDpCache<I, K, B, P>
where
    I: Hash + Eq + Clone + Send + Sync,
    K: Clone + Send + Sync,
    B: ParallelBackend<I, K>,
    P: ParallelDpProblem<I, K>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend,
            problem,
            pool: None,
            _phantom: PhantomData,
        }
    }

    /// Resolve dependencies on `pool` instead of the global Rayon pool.
    pub fn with_pool(backend: B, problem: P, pool: Arc<ThreadPool>) -> Self {
        Self {
            backend,
            problem,
            pool: Some(pool),
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        match &self.pool {
            Some(pool) => pool.install(|| self.resolve(index)),
            None => self.resolve(index),
        }
    }

    /// Values for many indices, resolved in parallel.
    pub fn get_many(&self, indices: &[I]) -> Vec<K> {
        let resolve_all = || {
            indices
                .par_iter()
                .map(|index| self.resolve(index))
                .collect()
        };

        match &self.pool {
            Some(pool) => pool.install(resolve_all),
            None => resolve_all(),
        }
    }

    /// Number of memoized entries
    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.is_empty()
    }

    fn resolve(&self, index: &I) -> K {
        if let Some(value) = self.problem.base_case(index) {
            return value;
        }

        if let Some(value) = self.backend.get(index) {
            return value;
        }

        let deps = self.problem.deps(index);
        let dep_values: Vec<K> = if deps.len() > 1 {
            deps.par_iter().map(|dep| self.resolve(dep)).collect()
        } else {
            deps.iter().map(|dep| self.resolve(dep)).collect()
        };

        // No lock is held while dependencies resolve; only compute runs under it
        self.backend
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
    }
}
