//! Trait-based DP problem definition.

/// Dependency structure and combination step of a memoized recurrence.
///
/// # Type Parameters
///
/// - `I`: index (memo key) type
/// - `K`: value type stored in the cache
///
/// # Example
///
/// ```rust
/// use aoc_2024::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Fibonacci;
///
/// impl DpProblem<u64, u64> for Fibonacci {
///     fn base_case(&self, n: &u64) -> Option<u64> {
///         (*n <= 1).then_some(*n)
///     }
///
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         vec![n - 1, n - 2]
///     }
///
///     fn compute(&self, _n: &u64, deps: Vec<u64>) -> u64 {
///         deps[0] + deps[1]
///     }
/// }
///
/// let cache = DpCache::new(HashMapBackend::new(), Fibonacci);
/// assert_eq!(cache.get(&50), 12_586_269_025);
/// ```
pub trait DpProblem<I, K> {
    /// Value for indices answered directly, without dependencies or a cache
    /// entry. Defaults to none.
    fn base_case(&self, _index: &I) -> Option<K> {
        None
    }

    /// Indices this index depends on.
    ///
    /// Only called for indices where [`base_case`](Self::base_case) returned
    /// `None`.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Combines the resolved dependency values, given in the order returned
    /// by [`deps`](Self::deps).
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}

/// DP problems usable from several threads at once.
pub trait ParallelDpProblem<I, K>: DpProblem<I, K> + Send + Sync {}

impl<T, I, K> ParallelDpProblem<I, K> for T where T: DpProblem<I, K> + Send + Sync {}
