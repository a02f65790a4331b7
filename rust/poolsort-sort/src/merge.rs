//! Stable top-down merge sort, sequential over any [`Sequence`] and fork-join
//! parallel over slices.
//!
//! Both variants merge through a scratch buffer rented once per call from the shared
//! pool and reused at every recursion level by slicing. A merge step is skipped when
//! the two sorted halves are already in order.

use poolsort_buffers::PooledBuffer;
use poolsort_common::{Result, verify_arg, verify_range};

use crate::{
    INSERTION_THRESHOLD, comparator::Comparator, insertion::insertion_sort_range,
    sequence::Sequence,
};

/// Sorts `seq[index..index + length]` with a stable merge sort.
pub fn merge_sort<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: Default + Send + 'static,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    if length <= INSERTION_THRESHOLD {
        insertion_sort_range(seq, index, index + length, &cmp);
        return Ok(());
    }
    let mut scratch = PooledBuffer::<S::Item>::rent(length / 2);
    merge_sort_range(seq, index, index + length, &mut scratch, &cmp);
    Ok(())
}

/// Like [`merge_sort`], merging through caller-provided `scratch`, which must hold at
/// least `length / 2` elements.
///
/// Scratch slots read as `T::default()` once the call returns.
pub fn merge_sort_with_scratch<S, C>(
    seq: &mut S,
    index: usize,
    length: usize,
    cmp: C,
    scratch: &mut [S::Item],
) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: Default,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    verify_arg!(scratch, scratch.len() >= length / 2);
    merge_sort_range(seq, index, index + length, scratch, &cmp);
    Ok(())
}

/// Sorts `slice[index..index + length]` with a stable merge sort whose halves are
/// sorted concurrently on the rayon pool.
///
/// Produces exactly the arrangement [`merge_sort`] produces for the same input and
/// comparator.
pub fn par_merge_sort<T, C>(slice: &mut [T], index: usize, length: usize, cmp: C) -> Result<()>
where
    T: Default + Send + 'static,
    C: Comparator<T> + Sync,
{
    verify_range!(index, length, slice.len());
    if length <= INSERTION_THRESHOLD {
        insertion_sort_range(slice, index, index + length, &cmp);
        return Ok(());
    }
    log::trace!("par_merge_sort: {length} elements");
    let mut scratch = PooledBuffer::<T>::rent(length);
    par_merge_sort_range(&mut slice[index..index + length], &mut scratch, &cmp);
    Ok(())
}

pub(crate) fn merge_sort_range<S, C>(
    seq: &mut S,
    lo: usize,
    hi: usize,
    scratch: &mut [S::Item],
    cmp: &C,
) where
    S: Sequence + ?Sized,
    S::Item: Default,
    C: Comparator<S::Item> + ?Sized,
{
    if hi - lo <= INSERTION_THRESHOLD {
        insertion_sort_range(seq, lo, hi, cmp);
        return;
    }
    let mid = lo + (hi - lo) / 2;
    merge_sort_range(seq, lo, mid, scratch, cmp);
    merge_sort_range(seq, mid, hi, scratch, cmp);
    if cmp.is_less(seq.get(mid), seq.get(mid - 1)) {
        merge_runs(seq, lo, mid, hi, scratch, cmp);
    }
}

/// `data` and `scratch` have equal lengths and are split at the same point, so each
/// half owns its share of the scratch space while the halves run concurrently.
fn par_merge_sort_range<T, C>(data: &mut [T], scratch: &mut [T], cmp: &C)
where
    T: Default + Send,
    C: Comparator<T> + Sync + ?Sized,
{
    let n = data.len();
    if n <= INSERTION_THRESHOLD {
        insertion_sort_range(data, 0, n, cmp);
        return;
    }
    let mid = n / 2;
    {
        let (left, right) = data.split_at_mut(mid);
        let (left_scratch, right_scratch) = scratch.split_at_mut(mid);
        rayon::join(
            || par_merge_sort_range(left, left_scratch, cmp),
            || par_merge_sort_range(right, right_scratch, cmp),
        );
    }
    if cmp.is_less(&data[mid], &data[mid - 1]) {
        merge_runs(data, 0, mid, n, scratch, cmp);
    }
}

/// Merges the adjacent sorted runs `seq[lo..mid]` and `seq[mid..hi]`.
///
/// The left run moves into `scratch`, leaving default placeholders behind. Output is
/// written from `lo` upward; the placeholders always sit between the output cursor
/// and the right-run cursor, so taking from the right run is a single swap. Ties go
/// to the left run, which keeps the merge stable.
///
/// If the comparator panics, the unmerged rest of the left run is written back into
/// the placeholder gap, so `seq` still holds every element it held before.
pub(crate) fn merge_runs<S, C>(
    seq: &mut S,
    lo: usize,
    mid: usize,
    hi: usize,
    scratch: &mut [S::Item],
    cmp: &C,
) where
    S: Sequence + ?Sized,
    S::Item: Default,
    C: Comparator<S::Item> + ?Sized,
{
    let left_len = mid - lo;
    let scratch = &mut scratch[..left_len];
    for (i, slot) in scratch.iter_mut().enumerate() {
        *slot = seq.replace(lo + i, Default::default());
    }

    let mut hole = MergeHole {
        seq,
        scratch,
        next: 0,
        out: lo,
    };
    let mut j = mid;
    while hole.next < left_len && j < hi {
        if cmp.is_less(hole.seq.get(j), &hole.scratch[hole.next]) {
            hole.seq.swap(hole.out, j);
            j += 1;
        } else {
            let value = std::mem::take(&mut hole.scratch[hole.next]);
            hole.seq.set(hole.out, value);
            hole.next += 1;
        }
        hole.out += 1;
    }
}

/// Owns the part of a merge that still lives in scratch space: `scratch[next..]` is
/// the unmerged left run and `seq[out..out + scratch.len() - next]` the placeholders
/// waiting for it. Dropping the hole moves the former into the latter.
struct MergeHole<'a, S>
where
    S: Sequence + ?Sized,
    S::Item: Default,
{
    seq: &'a mut S,
    scratch: &'a mut [S::Item],
    next: usize,
    out: usize,
}

impl<S> Drop for MergeHole<'_, S>
where
    S: Sequence + ?Sized,
    S::Item: Default,
{
    fn drop(&mut self) {
        while self.next < self.scratch.len() {
            let value = std::mem::take(&mut self.scratch[self.next]);
            self.seq.set(self.out, value);
            self.next += 1;
            self.out += 1;
        }
    }
}
