//! In-place heapsort.

use poolsort_common::{Result, verify_range};

use crate::{
    INSERTION_THRESHOLD, comparator::Comparator, insertion::insertion_sort_range,
    sequence::Sequence,
};

/// Sorts `seq[index..index + length]` with heapsort: guaranteed `O(n log n)`,
/// no extra memory, not stable.
pub fn heap_sort<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<()>
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    heap_sort_range(seq, index, index + length, &cmp);
    Ok(())
}

pub(crate) fn heap_sort_range<S, C>(seq: &mut S, lo: usize, hi: usize, cmp: &C)
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item> + ?Sized,
{
    let n = hi - lo;
    if n <= INSERTION_THRESHOLD {
        insertion_sort_range(seq, lo, hi, cmp);
        return;
    }
    for root in (0..n / 2).rev() {
        sift_down(seq, lo, root, n, cmp);
    }
    for end in (1..n).rev() {
        seq.swap(lo, lo + end);
        sift_down(seq, lo, 0, end, cmp);
    }
}

/// Restores the max-heap property for the subtree at `root` of the heap occupying
/// `seq[base..base + n]`.
fn sift_down<S, C>(seq: &mut S, base: usize, mut root: usize, n: usize, cmp: &C)
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item> + ?Sized,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= n {
            break;
        }
        if child + 1 < n && cmp.is_less(seq.get(base + child), seq.get(base + child + 1)) {
            child += 1;
        }
        if !cmp.is_less(seq.get(base + root), seq.get(base + child)) {
            break;
        }
        seq.swap(base + root, base + child);
        root = child;
    }
}
