//! Pooled scratch buffers.
//!
//! Storage is rented from a [`BufferPool`] and handed back when the owning buffer is
//! dropped, so a buffer's lifetime is its scope:
//!
//! * [`PooledBuffer`] - a fixed-length, bounds-checked view over one rented block.
//! * [`PooledVec`] - a growable buffer that re-rents a larger block on overflow.
//! * [`SharedPool`] - a bucketed, thread-safe pool; [`SharedPool::shared`] returns the
//!   process-wide instance for an element type.
//!
//! ```
//! use poolsort_buffers::{PooledBuffer, PooledVec};
//!
//! let mut scratch = PooledBuffer::<u32>::rent(10);
//! scratch[0] = 5;
//! assert_eq!(scratch.len(), 10);
//!
//! let mut values = PooledVec::<u32>::new();
//! values.push(3);
//! values.push(1);
//! let fixed = values.finalize();
//! assert_eq!(fixed.as_slice(), &[3, 1]);
//! ```

pub mod config;
pub mod dynamic;
pub mod fixed;
pub mod pool;

pub use config::PoolConfig;
pub use dynamic::PooledVec;
pub use fixed::PooledBuffer;
pub use pool::{BufferPool, PoolStats, SharedPool};
