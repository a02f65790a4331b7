//! Configuration of a [`SharedPool`](crate::pool::SharedPool).

use poolsort_common::{Result, verify_arg};
use serde::{Deserialize, Serialize};

/// Bucket layout and retention limits of a shared buffer pool.
///
/// The pool keeps one bucket per power-of-two storage length, starting at
/// `min_bucket_len` and ending at `max_bucket_len`. Requests above `max_bucket_len`
/// are served with exactly sized storage that is dropped rather than retained when
/// it comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Length of the smallest bucket. Must be a power of two.
    pub min_bucket_len: usize,
    /// Length of the largest bucket. Must be a power of two, not below `min_bucket_len`.
    pub max_bucket_len: usize,
    /// Maximum number of idle storage blocks a single bucket retains.
    pub max_retained_per_bucket: usize,
}

impl PoolConfig {
    pub const DEFAULT_MIN_BUCKET_LEN: usize = 16;
    pub const DEFAULT_MAX_BUCKET_LEN: usize = 1 << 20;
    pub const DEFAULT_MAX_RETAINED_PER_BUCKET: usize = 32;

    pub fn with_min_bucket_len(mut self, len: usize) -> Self {
        self.min_bucket_len = len;
        self
    }

    pub fn with_max_bucket_len(mut self, len: usize) -> Self {
        self.max_bucket_len = len;
        self
    }

    pub fn with_max_retained_per_bucket(mut self, count: usize) -> Self {
        self.max_retained_per_bucket = count;
        self
    }

    /// Checks that the bucket bounds describe a non-empty power-of-two ladder.
    pub fn validate(&self) -> Result<()> {
        verify_arg!(min_bucket_len, self.min_bucket_len.is_power_of_two());
        verify_arg!(max_bucket_len, self.max_bucket_len.is_power_of_two());
        verify_arg!(
            max_bucket_len,
            self.max_bucket_len >= self.min_bucket_len
        );
        Ok(())
    }

    /// Number of buckets described by this configuration.
    ///
    /// Only meaningful for a configuration that passes [`PoolConfig::validate`].
    pub fn bucket_count(&self) -> usize {
        (self.max_bucket_len.trailing_zeros() - self.min_bucket_len.trailing_zeros()) as usize
            + 1
    }

    /// Storage length of the bucket at `index`.
    pub fn bucket_len(&self, index: usize) -> usize {
        self.min_bucket_len << index
    }

    /// Index of the smallest bucket able to hold `len` elements, or `None` when `len`
    /// exceeds `max_bucket_len`.
    pub fn bucket_index(&self, len: usize) -> Option<usize> {
        if len > self.max_bucket_len {
            return None;
        }
        let rounded = len.max(self.min_bucket_len).next_power_of_two();
        Some((rounded.trailing_zeros() - self.min_bucket_len.trailing_zeros()) as usize)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        PoolConfig {
            min_bucket_len: Self::DEFAULT_MIN_BUCKET_LEN,
            max_bucket_len: Self::DEFAULT_MAX_BUCKET_LEN,
            max_retained_per_bucket: Self::DEFAULT_MAX_RETAINED_PER_BUCKET,
        }
    }
}
