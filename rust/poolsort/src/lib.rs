//! # Poolsort: pooled scratch buffers and in-place sorting
//!
//! Poolsort pairs a shared buffer pool with a family of in-place sorting and
//! compaction algorithms that work over any mutable, indexable sequence.
//!
//! ## Key Features
//!
//! * **Scoped rentals**: fixed and growable buffers rent their storage from a pool and
//!   hand it back when dropped, on success and on unwinding alike
//! * **Bucketed shared pool**: one thread-safe pool per element type, with size buckets
//!   and a bounded number of retained blocks per bucket
//! * **Range-based sorting**: insertion, quick, merge, heap, intro and Tim sorts over
//!   any sub-range, with any comparator
//! * **Integer sorts**: counting and radix sorts for primitive integers
//! * **Parallel merge sort** over slices, producing the same arrangement as the
//!   sequential one
//!
//! ## Module Organization
//!
//! * [`common`] - The error type and argument verification helpers
//! * [`buffers`] - Buffer pools and pooled buffers
//! * [`sort`] - Sequences, comparators and the sorting algorithms
//!
//! ```
//! use poolsort::buffers::PooledVec;
//! use poolsort::sort::{SortAlgorithm, SortExt};
//!
//! let mut values = PooledVec::<i64>::new();
//! values.extend_from_slice(&[42, -7, 19, 0]);
//! values.sort_with(SortAlgorithm::Tim).unwrap();
//! assert_eq!(values.as_slice(), &[-7, 0, 19, 42]);
//! ```

pub use poolsort_buffers as buffers;
pub use poolsort_common as common;
pub use poolsort_sort as sort;

pub use poolsort_common::{Result, error::Error};
