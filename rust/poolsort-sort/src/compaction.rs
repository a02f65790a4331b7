//! In-place compaction of a sub-range.
//!
//! Both operations move the surviving elements to the front of the range, keeping
//! their relative order, and return how many survived. Elements past the survivors
//! are the discarded ones in unspecified order; the sequence length never changes.

use poolsort_common::{Result, verify_range};

use crate::{comparator::Comparator, sequence::Sequence};

/// Keeps the elements of `seq[index..index + length]` for which `keep` returns true.
pub fn retain_range<S, F>(seq: &mut S, index: usize, length: usize, mut keep: F) -> Result<usize>
where
    S: Sequence + ?Sized,
    F: FnMut(&S::Item) -> bool,
{
    verify_range!(index, length, seq.len());
    let mut write = index;
    for read in index..index + length {
        if keep(seq.get(read)) {
            if read != write {
                seq.swap(read, write);
            }
            write += 1;
        }
    }
    Ok(write - index)
}

/// Collapses each run of consecutive equal elements of `seq[index..index + length]`
/// to its first element. On a sorted range this removes every duplicate.
pub fn dedup_sorted<S, C>(seq: &mut S, index: usize, length: usize, cmp: C) -> Result<usize>
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    if length == 0 {
        return Ok(0);
    }
    let mut last = index;
    for read in index + 1..index + length {
        if cmp.compare(seq.get(last), seq.get(read)).is_ne() {
            last += 1;
            if read != last {
                seq.swap(read, last);
            }
        }
    }
    Ok(last + 1 - index)
}
