//! LSD radix sort (base 10) for integer keys.

use num_traits::Zero;
use poolsort_buffers::PooledBuffer;
use poolsort_common::{Result, verify_range};

use crate::{key::SortKey, sequence::Sequence};

/// Magnitudes above this bound do not add digit passes: values of `10^10` and beyond
/// share their highest processed digit and keep their relative input order.
pub const RADIX_MAGNITUDE_CAP: u128 = 1_000_000_000;

const RADIX: usize = 10;

/// Sorts `seq[index..index + length]` ascending by value.
///
/// The range is split in place into negatives and non-negatives. Each side is then
/// digit-sorted on absolute value, and the negative side is reversed. Each side's
/// pass count follows its largest magnitude, up to [`RADIX_MAGNITUDE_CAP`].
pub fn radix_sort<S>(seq: &mut S, index: usize, length: usize) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: SortKey,
{
    verify_range!(index, length, seq.len());
    if length < 2 {
        return Ok(());
    }
    let zero = <S::Item as Zero>::zero();
    let mut negative_max = 0u128;
    let mut positive_max = 0u128;
    let mut i = index;
    let mut j = index + length;
    loop {
        while i < j && *seq.get(i) < zero {
            negative_max = negative_max.max(seq.get(i).to_key().unsigned_abs());
            i += 1;
        }
        while i < j && *seq.get(j - 1) >= zero {
            positive_max = positive_max.max(seq.get(j - 1).to_key().unsigned_abs());
            j -= 1;
        }
        if i >= j {
            break;
        }
        seq.swap(i, j - 1);
    }
    let split = i;

    lsd_passes(seq, index, split, negative_max);
    lsd_passes(seq, split, index + length, positive_max);
    let (mut a, mut b) = (index, split);
    while a + 1 < b {
        seq.swap(a, b - 1);
        a += 1;
        b -= 1;
    }
    Ok(())
}

/// Stable base-10 passes over `seq[lo..hi]`, keyed by absolute value.
fn lsd_passes<S>(seq: &mut S, lo: usize, hi: usize, max_magnitude: u128)
where
    S: Sequence + ?Sized,
    S::Item: SortKey,
{
    let n = hi - lo;
    if n < 2 {
        return;
    }
    if max_magnitude > RADIX_MAGNITUDE_CAP {
        log::debug!("radix_sort: magnitude {max_magnitude} exceeds the digit pass cap");
    }
    let max_magnitude = max_magnitude.min(RADIX_MAGNITUDE_CAP);
    let mut scratch = PooledBuffer::<S::Item>::rent(n);
    let mut exp = 1u128;
    while max_magnitude / exp > 0 {
        let digit = |v: &S::Item| ((v.to_key().unsigned_abs() / exp) % RADIX as u128) as usize;
        let mut starts = [0usize; RADIX];
        for k in lo..hi {
            starts[digit(seq.get(k))] += 1;
        }
        let mut offset = 0;
        for slot in starts.iter_mut() {
            let count = *slot;
            *slot = offset;
            offset += count;
        }
        for k in lo..hi {
            let v = *seq.get(k);
            let d = digit(&v);
            scratch[starts[d]] = v;
            starts[d] += 1;
        }
        for (k, v) in scratch.iter().enumerate() {
            seq.set(lo + k, *v);
        }
        exp *= RADIX as u128;
    }
}
