//! Introsort: quicksort that bails out to heapsort when partitioning degenerates.

use poolsort_common::{Result, verify_range};

use crate::{
    INSERTION_THRESHOLD, comparator::Comparator, heap::heap_sort_range,
    insertion::insertion_sort_range, quick::partition, sequence::Sequence,
};

/// Sorts `seq[index..index + length]` with introsort.
///
/// Partitions like [`quick_sort`](crate::quick::quick_sort) while a depth budget of
/// `2 * floor(log2(length))` lasts; a sub-range that exhausts it is heapsorted, which
/// bounds the worst case at `O(n log n)`.
pub fn intro_sort<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<()>
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    if length < 2 {
        return Ok(());
    }
    intro_sort_range(seq, index, index + length, depth_budget(length), &cmp);
    Ok(())
}

#[cfg(test)]
thread_local! {
    static HEAP_FALLBACKS: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

pub(crate) fn depth_budget(length: usize) -> usize {
    2 * length.max(1).ilog2() as usize
}

pub(crate) fn intro_sort_range<S, C>(
    seq: &mut S,
    mut lo: usize,
    mut hi: usize,
    mut budget: usize,
    cmp: &C,
) where
    S: Sequence + ?Sized,
    C: Comparator<S::Item> + ?Sized,
{
    while hi - lo > INSERTION_THRESHOLD {
        if budget == 0 {
            log::debug!(
                "intro_sort: depth budget exhausted, heapsorting {} elements",
                hi - lo
            );
            #[cfg(test)]
            HEAP_FALLBACKS.with(|c| c.set(c.get() + 1));
            heap_sort_range(seq, lo, hi, cmp);
            return;
        }
        budget -= 1;
        let p = partition(seq, lo, hi, cmp);
        if p - lo < hi - p {
            intro_sort_range(seq, lo, p, budget, cmp);
            lo = p + 1;
        } else {
            intro_sort_range(seq, p + 1, hi, budget, cmp);
            hi = p;
        }
    }
    insertion_sort_range(seq, lo, hi, cmp);
}
