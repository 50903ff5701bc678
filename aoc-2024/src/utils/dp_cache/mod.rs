//! Memoization caches for recurrences whose dependencies form a DAG
//!
//! A [`DpProblem`] says which indices an index depends on and how to combine
//! their values; a cache evaluates it lazily, computing each index at most
//! once.
//!
//! # Cache Types
//!
//! - [`DpCache`]: single-threaded, `RefCell` for interior mutability
//! - [`ParallelDpCache`]: thread-safe, resolves dependencies with Rayon
//!
//! # Backend Types
//!
//! Sequential backends (for `DpCache`):
//! - [`HashMapBackend`]: arbitrary hashable indices
//! - [`NoCacheBackend`]: stores nothing; recomputes every lookup
//!
//! Parallel backends (for `ParallelDpCache`):
//! - [`DashMapBackend`]: sharded locking, good under write contention
//! - [`RwLockHashMapBackend`]: a single `RwLock` around a `HashMap`
//!
//! # Warning: Cycle Behavior
//!
//! **These caches do NOT detect cycles.** A cyclic dependency graph recurses
//! until the stack overflows. Callers must guarantee a DAG, typically by
//! having every dependency strictly decrease some measure of the index.
//!
//! # Example
//!
//! ```rust
//! use aoc_2024::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
//!
//! /// Lattice paths from (0, 0) to (r, c) moving right or down
//! struct GridPaths;
//!
//! impl DpProblem<(u32, u32), u64> for GridPaths {
//!     fn base_case(&self, &(r, c): &(u32, u32)) -> Option<u64> {
//!         (r == 0 || c == 0).then_some(1)
//!     }
//!     fn deps(&self, &(r, c): &(u32, u32)) -> Vec<(u32, u32)> {
//!         vec![(r - 1, c), (r, c - 1)]
//!     }
//!     fn compute(&self, _pos: &(u32, u32), deps: Vec<u64>) -> u64 {
//!         deps.iter().sum()
//!     }
//! }
//!
//! let cache = DpCache::new(HashMapBackend::new(), GridPaths);
//! assert_eq!(cache.get(&(4, 4)), 70);
//! ```

mod backend;
mod cache;
mod parallel;
mod problem;

pub use backend::{
    Backend, DashMapBackend, HashMapBackend, NoCacheBackend, ParallelBackend,
    RwLockHashMapBackend,
};
pub use cache::DpCache;
pub use parallel::ParallelDpCache;
pub use problem::{DpProblem, ParallelDpProblem};
