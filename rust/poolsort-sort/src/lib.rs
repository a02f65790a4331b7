//! In-place sorting and compaction over any [`Sequence`].
//!
//! Every entry point works on the sub-range `[index, index + length)` of a sequence
//! and leaves everything outside it untouched. Ranges are validated before the first
//! element moves, so a rejected call never leaves a partially sorted range. Empty and
//! single-element ranges are no-ops.
//!
//! Comparison sorts take any [`Comparator`] (a plain `Fn(&T, &T) -> Ordering` closure
//! included); [`counting_sort`] and [`radix_sort`] order primitive integers by value.
//! Scratch space for the merging algorithms and the integer sorts is rented from the
//! shared buffer pool and returned when the call completes.

pub mod algorithm;
pub mod comparator;
pub mod compaction;
pub mod counting;
pub mod heap;
pub mod insertion;
pub mod intro;
pub mod key;
pub mod merge;
pub mod quick;
pub mod radix;
pub mod sequence;
pub mod tim;

/// Ranges of at most this many elements are finished with insertion sort.
pub const INSERTION_THRESHOLD: usize = 16;

pub use algorithm::{
    SortAlgorithm, SortExt, SortOptions, is_sorted_by, sort_range_by, sort_slice_with,
};
pub use comparator::{ByKey, Comparator, NaturalOrder, Reversed};
pub use compaction::{dedup_sorted, retain_range};
pub use counting::{MAX_COUNTING_DOMAIN, counting_sort, counting_sort_with_domain};
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use intro::intro_sort;
pub use key::SortKey;
pub use merge::{merge_sort, merge_sort_with_scratch, par_merge_sort};
pub use quick::quick_sort;
pub use radix::{RADIX_MAGNITUDE_CAP, radix_sort};
pub use sequence::Sequence;
pub use tim::{min_run, tim_sort};
