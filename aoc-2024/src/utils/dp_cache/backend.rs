//! Storage backends for the DP caches.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

/// Single-threaded storage for [`DpCache`](super::DpCache).
///
/// # Contract
///
/// - `get_or_insert` calls `compute` only when the index has no value yet
/// - a stored value never changes
pub trait Backend<I, K> {
    fn get(&self, index: &I) -> Option<&K>;

    fn get_or_insert<F>(&mut self, index: I, compute: F) -> &K
    where
        F: FnOnce() -> K;

    /// Number of stored entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// HashMap storage for arbitrary hashable indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F>(&mut self, index: I, compute: F) -> &K
    where
        F: FnOnce() -> K,
    {
        self.data.entry(index).or_insert_with(compute)
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// Backend that remembers nothing, so every lookup recomputes.
///
/// Only useful to check that a memoized recurrence gives the same answers
/// without its cache. Exponential for most real problems.
#[derive(Debug)]
pub struct NoCacheBackend<K> {
    last: Option<K>,
}

impl<K> NoCacheBackend<K> {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl<K> Default for NoCacheBackend<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K> Backend<I, K> for NoCacheBackend<K> {
    fn get(&self, _index: &I) -> Option<&K> {
        None
    }

    fn get_or_insert<F>(&mut self, _index: I, compute: F) -> &K
    where
        F: FnOnce() -> K,
    {
        self.last.insert(compute())
    }

    fn len(&self) -> usize {
        0
    }
}

/// Thread-safe storage for [`ParallelDpCache`](super::ParallelDpCache).
///
/// Values are returned by clone since no reference can outlive the lock.
pub trait ParallelBackend<I, K>: Send + Sync {
    fn get(&self, index: &I) -> Option<K>;

    /// Insert the computed value unless another thread got there first, and
    /// return whichever value is stored.
    fn get_or_insert<F>(&self, index: I, compute: F) -> K
    where
        F: FnOnce() -> K;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sharded concurrent map; writers only lock the shard owning the key.
pub struct DashMapBackend<I, K>
where
    I: Hash + Eq,
{
    data: DashMap<I, K>,
}

impl<I: Hash + Eq, K> DashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: DashMap::new(),
        }
    }
}

impl<I: Hash + Eq, K> Default for DashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K> ParallelBackend<I, K> for DashMapBackend<I, K>
where
    I: Hash + Eq + Send + Sync,
    K: Clone + Send + Sync,
{
    fn get(&self, index: &I) -> Option<K> {
        self.data.get(index).map(|entry| entry.value().clone())
    }

    fn get_or_insert<F>(&self, index: I, compute: F) -> K
    where
        F: FnOnce() -> K,
    {
        self.data.entry(index).or_insert_with(compute).value().clone()
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// One `RwLock` around a `HashMap`. Fine for read-heavy workloads.
pub struct RwLockHashMapBackend<I, K> {
    data: RwLock<HashMap<I, K>>,
}

impl<I, K> RwLockHashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl<I, K> Default for RwLockHashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

// Entries are inserted whole, so a poisoned lock still guards a consistent map.
impl<I, K> ParallelBackend<I, K> for RwLockHashMapBackend<I, K>
where
    I: Hash + Eq + Send + Sync,
    K: Clone + Send + Sync,
{
    fn get(&self, index: &I) -> Option<K> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(index)
            .cloned()
    }

    fn get_or_insert<F>(&self, index: I, compute: F) -> K
    where
        F: FnOnce() -> K,
    {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(index)
            .or_insert_with(compute)
            .clone()
    }

    fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
