//! Unstable quicksort with median-of-three pivot selection.

use poolsort_common::{Result, verify_range};

use crate::{
    INSERTION_THRESHOLD, comparator::Comparator, insertion::insertion_sort_range,
    sequence::Sequence,
};

/// Sorts `seq[index..index + length]` with quicksort.
///
/// Ranges of at most [`INSERTION_THRESHOLD`] elements are finished by insertion sort.
/// Recursion always descends into the smaller partition, so stack depth stays
/// logarithmic even for adversarial inputs; the running time does not.
pub fn quick_sort<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<()>
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    quick_sort_range(seq, index, index + length, &cmp);
    Ok(())
}

pub(crate) fn quick_sort_range<S, C>(seq: &mut S, mut lo: usize, mut hi: usize, cmp: &C)
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item> + ?Sized,
{
    while hi - lo > INSERTION_THRESHOLD {
        let p = partition(seq, lo, hi, cmp);
        if p - lo < hi - p {
            quick_sort_range(seq, lo, p, cmp);
            lo = p + 1;
        } else {
            quick_sort_range(seq, p + 1, hi, cmp);
            hi = p;
        }
    }
    insertion_sort_range(seq, lo, hi, cmp);
}

/// Partitions `seq[lo..hi]` (at least three elements) around the median of its first,
/// middle and last elements. Returns the pivot's final position `p`: everything in
/// `lo..p` orders at or before it, everything in `p + 1..hi` at or after it.
pub(crate) fn partition<S, C>(seq: &mut S, lo: usize, hi: usize, cmp: &C) -> usize
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item> + ?Sized,
{
    debug_assert!(hi - lo >= 3);
    let mid = lo + (hi - lo) / 2;
    let last = hi - 1;
    if cmp.is_less(seq.get(mid), seq.get(lo)) {
        seq.swap(mid, lo);
    }
    if cmp.is_less(seq.get(last), seq.get(lo)) {
        seq.swap(last, lo);
    }
    if cmp.is_less(seq.get(last), seq.get(mid)) {
        seq.swap(last, mid);
    }
    // Pivot moves to `lo`; `last` now holds an element no smaller than the pivot. The
    // explicit bounds only matter for comparators that are not a strict weak order.
    seq.swap(lo, mid);

    let mut i = lo;
    let mut j = hi;
    loop {
        i += 1;
        while i < last && cmp.is_less(seq.get(i), seq.get(lo)) {
            i += 1;
        }
        j -= 1;
        while j > lo && cmp.is_less(seq.get(lo), seq.get(j)) {
            j -= 1;
        }
        if i >= j {
            break;
        }
        seq.swap(i, j);
    }
    seq.swap(lo, j);
    j
}
