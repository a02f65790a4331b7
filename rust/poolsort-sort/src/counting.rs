//! Counting sort for integer keys over a bounded value domain.

use poolsort_buffers::PooledBuffer;
use poolsort_common::{Result, error::Error, verify_arg, verify_range};

use crate::{key::SortKey, sequence::Sequence};

/// Largest number of distinct values (`max - min + 1`) a counting sort will allocate
/// counters for.
pub const MAX_COUNTING_DOMAIN: usize = 1 << 24;

/// Sorts `seq[index..index + length]` by value, deriving the domain from the range's
/// own minimum and maximum.
///
/// Fails with `InvalidArgument`, leaving the range untouched, when the observed
/// domain exceeds [`MAX_COUNTING_DOMAIN`].
pub fn counting_sort<S>(seq: &mut S, index: usize, length: usize, descending: bool) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: SortKey,
{
    verify_range!(index, length, seq.len());
    if length < 2 {
        return Ok(());
    }
    let mut min = *seq.get(index);
    let mut max = min;
    for i in index + 1..index + length {
        let v = *seq.get(i);
        min = min.min(v);
        max = max.max(v);
    }
    counting_sort_in_domain(seq, index, length, min, max, descending)
}

/// Sorts `seq[index..index + length]` by value, counting over the caller-supplied
/// domain `min_value..=max_value`.
///
/// Fails with `InvalidArgument`, leaving the range untouched, when
/// `max_value < min_value`, when the domain exceeds [`MAX_COUNTING_DOMAIN`], or when
/// any element of the range lies outside the domain.
pub fn counting_sort_with_domain<S>(
    seq: &mut S,
    index: usize,
    length: usize,
    min_value: S::Item,
    max_value: S::Item,
    descending: bool,
) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: SortKey,
{
    verify_range!(index, length, seq.len());
    counting_sort_in_domain(seq, index, length, min_value, max_value, descending)
}

fn counting_sort_in_domain<S>(
    seq: &mut S,
    index: usize,
    length: usize,
    min_value: S::Item,
    max_value: S::Item,
    descending: bool,
) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: SortKey,
{
    verify_arg!(max_value, max_value >= min_value);
    let min = min_value.to_key();
    let domain = usize::try_from(max_value.to_key() - min + 1)
        .ok()
        .filter(|&d| d <= MAX_COUNTING_DOMAIN)
        .ok_or_else(|| {
            Error::invalid_arg(
                "max_value",
                format!("counting domain exceeds {MAX_COUNTING_DOMAIN} values"),
            )
        })?;
    if length == 0 {
        return Ok(());
    }

    let mut counts = PooledBuffer::<usize>::rent(domain);
    counts.clear();
    let max = min + domain as i128 - 1;
    for i in index..index + length {
        let key = seq.get(i).to_key();
        if key < min || key > max {
            return Err(Error::invalid_arg(
                "seq",
                format!("element {key} at {i} lies outside {min}..={max}"),
            ));
        }
        counts[(key - min) as usize] += 1;
    }
    log::trace!("counting_sort: {length} elements over a domain of {domain}");

    let mut out = index;
    let mut emit = |bucket: usize, count: usize| {
        let value = <S::Item as SortKey>::from_key(min + bucket as i128);
        for _ in 0..count {
            seq.set(out, value);
            out += 1;
        }
    };
    if descending {
        counts.iter().enumerate().rev().for_each(|(b, &c)| emit(b, c));
    } else {
        counts.iter().enumerate().for_each(|(b, &c)| emit(b, c));
    }
    Ok(())
}
