//! Stable insertion sort, also the small-range finisher for every other algorithm.

use poolsort_common::{Result, verify_range};

use crate::{comparator::Comparator, sequence::Sequence};

/// Sorts `seq[index..index + length]` with a stable insertion sort.
pub fn insertion_sort<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<()>
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    insertion_sort_range(seq, index, index + length, &cmp);
    Ok(())
}

/// Sorts `seq[lo..hi]`, shifting each element left past every strictly greater
/// predecessor. Equal elements never pass each other.
pub(crate) fn insertion_sort_range<S, C>(seq: &mut S, lo: usize, hi: usize, cmp: &C)
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item> + ?Sized,
{
    for i in lo + 1..hi {
        let mut j = i;
        while j > lo && cmp.is_less(seq.get(j), seq.get(j - 1)) {
            seq.swap(j - 1, j);
            j -= 1;
        }
    }
}
