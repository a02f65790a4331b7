//! Buffer pools: the [`BufferPool`] contract and the bucketed [`SharedPool`].

use std::{
    any::{Any, TypeId},
    sync::{
        Arc, Mutex, PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use poolsort_common::Result;

use crate::config::PoolConfig;

/// A thread-safe source of reusable storage blocks for elements of type `T`.
///
/// Storage handed out by [`BufferPool::rent`] is fully initialized: its `len()` is the
/// physical length of the block, which is at least the requested length. Callers that
/// need a view of an exact length wrap the storage into a
/// [`PooledBuffer`](crate::PooledBuffer).
pub trait BufferPool<T>: Send + Sync {
    /// Rents a storage block holding at least `min_len` initialized elements.
    ///
    /// A request for zero elements may be served with an empty, unallocated vector.
    fn rent(&self, min_len: usize) -> Vec<T>;

    /// Hands a block previously obtained from [`BufferPool::rent`] back to the pool.
    ///
    /// When `clear` is set, every element of the block (its full physical length) is
    /// reset before the block becomes available to other renters, so that values
    /// holding resources are not kept alive by the pool.
    fn recycle(&self, storage: Vec<T>, clear: bool);
}

/// A snapshot of pool activity counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Number of served `rent` calls.
    pub rents: u64,
    /// Number of `recycle` calls.
    pub recycles: u64,
    /// Number of storage blocks allocated because no idle block was available.
    pub allocations: u64,
    /// Number of returned blocks dropped instead of being retained.
    pub discards: u64,
    /// Number of idle blocks currently held by the pool.
    pub retained: usize,
}

impl PoolStats {
    /// Number of rented blocks not yet returned.
    pub fn outstanding(&self) -> u64 {
        self.rents.saturating_sub(self.recycles)
    }
}

/// A bucketed pool of storage blocks, safe for concurrent use.
///
/// Every bucket holds idle blocks of a single power-of-two length and is guarded by
/// its own mutex, so renters of different sizes never contend. A request is served
/// from the smallest bucket whose length is sufficient; requests larger than
/// [`PoolConfig::max_bucket_len`] get exactly sized storage that is not retained.
///
/// [`SharedPool::shared`] returns the process-wide pool for an element type.
pub struct SharedPool<T> {
    config: PoolConfig,
    buckets: Box<[Bucket<T>]>,
    counters: Counters,
}

struct Bucket<T> {
    len: usize,
    idle: Mutex<Vec<Vec<T>>>,
}

#[derive(Default)]
struct Counters {
    rents: AtomicU64,
    recycles: AtomicU64,
    allocations: AtomicU64,
    discards: AtomicU64,
}

impl<T: Default + Send> SharedPool<T> {
    /// Creates a pool with the default configuration.
    pub fn new() -> SharedPool<T> {
        Self::build(PoolConfig::default())
    }

    /// Creates a pool with the given configuration.
    pub fn with_config(config: PoolConfig) -> Result<SharedPool<T>> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PoolConfig) -> SharedPool<T> {
        let buckets = (0..config.bucket_count())
            .map(|i| Bucket {
                len: config.bucket_len(i),
                idle: Mutex::new(Vec::new()),
            })
            .collect();
        SharedPool {
            config,
            buckets,
            counters: Counters::default(),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns a snapshot of the activity counters.
    ///
    /// In a concurrent environment the counters are read independently and may be
    /// mutually inconsistent by the time the snapshot is returned.
    pub fn stats(&self) -> PoolStats {
        let retained = self
            .buckets
            .iter()
            .map(|bucket| lock(&bucket.idle).len())
            .sum();
        PoolStats {
            rents: self.counters.rents.load(Ordering::Relaxed),
            recycles: self.counters.recycles.load(Ordering::Relaxed),
            allocations: self.counters.allocations.load(Ordering::Relaxed),
            discards: self.counters.discards.load(Ordering::Relaxed),
            retained,
        }
    }

    /// Drops every idle block held by the pool and returns how many were dropped.
    pub fn trim(&self) -> usize {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut idle = lock(&bucket.idle);
                let count = idle.len();
                idle.clear();
                count
            })
            .sum()
    }

    fn allocate(&self, len: usize) -> Vec<T> {
        self.counters.allocations.fetch_add(1, Ordering::Relaxed);
        let mut storage = Vec::with_capacity(len);
        storage.resize_with(len, T::default);
        storage
    }

    fn bucket_for_storage(&self, len: usize) -> Option<&Bucket<T>> {
        let index = self.config.bucket_index(len)?;
        self.buckets.get(index).filter(|bucket| bucket.len == len)
    }
}

impl<T: Default + Send + 'static> SharedPool<T> {
    /// Returns the process-wide pool for elements of type `T`, creating it with the
    /// default configuration on first use.
    pub fn shared() -> Arc<SharedPool<T>> {
        let existing = registered::<T>(&SHARED_POOLS.read().unwrap_or_else(PoisonError::into_inner));
        if let Some(pool) = existing {
            return pool;
        }
        let mut pools = SHARED_POOLS.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(pool) = registered::<T>(&pools) {
            return pool;
        }
        let pool = Arc::new(SharedPool::<T>::new());
        pools.insert(TypeId::of::<T>(), pool.clone() as AnyPool);
        pool
    }
}

impl<T: Default + Send> Default for SharedPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default + Send> BufferPool<T> for SharedPool<T> {
    fn rent(&self, min_len: usize) -> Vec<T> {
        if min_len == 0 {
            return Vec::new();
        }
        self.counters.rents.fetch_add(1, Ordering::Relaxed);

        let Some(bucket) = self
            .config
            .bucket_index(min_len)
            .and_then(|index| self.buckets.get(index))
        else {
            log::trace!("rent({min_len}): above the largest bucket, allocating exact storage");
            return self.allocate(min_len);
        };

        let reused = lock(&bucket.idle).pop();
        match reused {
            Some(storage) => {
                log::trace!("rent({min_len}): reusing a block of {}", bucket.len);
                storage
            }
            None => {
                log::trace!("rent({min_len}): allocating a block of {}", bucket.len);
                self.allocate(bucket.len)
            }
        }
    }

    fn recycle(&self, mut storage: Vec<T>, clear: bool) {
        if storage.is_empty() {
            return;
        }
        self.counters.recycles.fetch_add(1, Ordering::Relaxed);

        let Some(bucket) = self.bucket_for_storage(storage.len()) else {
            log::debug!(
                "recycle: dropping a block of {} that matches no bucket",
                storage.len()
            );
            self.counters.discards.fetch_add(1, Ordering::Relaxed);
            return;
        };

        if clear {
            storage.iter_mut().for_each(|value| *value = T::default());
        }

        let mut idle = lock(&bucket.idle);
        if idle.len() < self.config.max_retained_per_bucket {
            idle.push(storage);
        } else {
            drop(idle);
            log::debug!(
                "recycle: bucket of {} is full, dropping the returned block",
                bucket.len
            );
            self.counters.discards.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Idle block lists stay structurally valid when a holder panics, so a poisoned lock
/// is simply taken over.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type AnyPool = Arc<dyn Any + Send + Sync>;

/// Looks up the pool registered for `T`; entries are keyed by `TypeId::of::<T>()`.
fn registered<T: Default + Send + 'static>(
    pools: &ahash::HashMap<TypeId, AnyPool>,
) -> Option<Arc<SharedPool<T>>> {
    pools
        .get(&TypeId::of::<T>())
        .cloned()
        .and_then(|pool| pool.downcast::<SharedPool<T>>().ok())
}

/// Process-wide pools keyed by element type.
static SHARED_POOLS: RwLock<ahash::HashMap<TypeId, AnyPool>> =
    RwLock::new(ahash::HashMap::with_hasher(ahash::RandomState::with_seeds(
        30517724, 8714629051, 442109371, 1992734606,
    )));
