//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;

/// Memoizing evaluator for a [`DpProblem`].
///
/// Each index outside the problem's base cases is computed at most once per
/// cache; later lookups return a clone of the stored value.
///
/// # Warning: No Cycle Detection
///
/// Dependencies must form a DAG. A cycle overflows the stack.
///
/// # Example
///
/// ```rust
/// use aoc_2024::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Factorial;
///
/// impl DpProblem<u64, u64> for Factorial {
///     fn base_case(&self, n: &u64) -> Option<u64> {
///         (*n == 0).then_some(1)
///     }
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         vec![n - 1]
///     }
///     fn compute(&self, n: &u64, deps: Vec<u64>) -> u64 {
///         n * deps[0]
///     }
/// }
///
/// let cache = DpCache::new(HashMapBackend::new(), Factorial);
/// assert_eq!(cache.get(&5), 120);
/// assert_eq!(cache.len(), 5);
/// ```
pub struct DpCache<I, K, B, P>
where
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<(I, K)>,
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value for `index`, computing it and its dependencies if needed.
    pub fn get(&self, index: &I) -> K {
        if let Some(value) = self.problem.base_case(index) {
            return value;
        }

        if let Some(value) = self.backend.borrow().get(index) {
            return value.clone();
        }

        // No borrow is held while recursing
        let dep_values: Vec<K> = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect();

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .clone()
    }

    /// Number of memoized entries
    pub fn len(&self) -> usize {
        self.backend.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.backend.borrow().is_empty()
    }
}
