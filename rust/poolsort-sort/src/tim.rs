//! Simplified bottom-up Timsort.

use poolsort_buffers::PooledBuffer;
use poolsort_common::{Result, verify_range};

use crate::{
    comparator::Comparator, insertion::insertion_sort_range, merge::merge_runs,
    sequence::Sequence,
};

const MIN_MERGE: usize = 32;

/// Run length for a range of `n` elements: `n` itself below [`MIN_MERGE`], otherwise
/// a value in `MIN_MERGE / 2..=MIN_MERGE` chosen so that `n / run` is close to, but
/// not above, a power of two.
pub fn min_run(mut n: usize) -> usize {
    let mut r = 0;
    while n >= MIN_MERGE {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

/// Sorts `seq[index..index + length]` with a stable Timsort: runs of [`min_run`]
/// elements are insertion-sorted, then merged pairwise with doubling widths.
pub fn tim_sort<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: Default + Send + 'static,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    if length < 2 {
        return Ok(());
    }
    let lo = index;
    let hi = index + length;
    let run = min_run(length);
    for start in (lo..hi).step_by(run) {
        insertion_sort_range(seq, start, hi.min(start + run), &cmp);
    }
    if run >= length {
        return Ok(());
    }

    let mut scratch = PooledBuffer::<S::Item>::rent(length);
    let mut width = run;
    while width < length {
        for left in (lo..hi).step_by(2 * width) {
            let mid = left + width;
            if mid >= hi {
                break;
            }
            let right = hi.min(left + 2 * width);
            if cmp.is_less(seq.get(mid), seq.get(mid - 1)) {
                merge_runs(seq, left, mid, right, &mut scratch, &cmp);
            }
        }
        width *= 2;
    }
    Ok(())
}
