//! Algorithm selection and the method-style entry points.

use serde::{Deserialize, Serialize};

use poolsort_common::{Result, verify_range};

use crate::{
    comparator::{Comparator, NaturalOrder},
    heap::heap_sort,
    insertion::insertion_sort,
    intro::intro_sort,
    merge::{merge_sort, par_merge_sort},
    quick::quick_sort,
    sequence::Sequence,
    tim::tim_sort,
};

/// The comparison-based sorting algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortAlgorithm {
    Insertion,
    Quick,
    Merge,
    Heap,
    #[default]
    Intro,
    Tim,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Insertion,
        SortAlgorithm::Quick,
        SortAlgorithm::Merge,
        SortAlgorithm::Heap,
        SortAlgorithm::Intro,
        SortAlgorithm::Tim,
    ];

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            SortAlgorithm::Insertion | SortAlgorithm::Merge | SortAlgorithm::Tim
        )
    }
}

/// How a caller wants ranges sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    pub algorithm: SortAlgorithm,
    /// Sort merge halves concurrently. Honored by [`sort_slice_with`] when the
    /// algorithm is [`SortAlgorithm::Merge`]; ignored otherwise.
    pub parallel: bool,
}

impl SortOptions {
    pub fn new(algorithm: SortAlgorithm) -> SortOptions {
        SortOptions {
            algorithm,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> SortOptions {
        self.parallel = parallel;
        self
    }
}

/// Sorts `seq[index..index + length]` with `algorithm`.
pub fn sort_range_by<S, C>(
    algorithm: SortAlgorithm,
    seq: &mut S,
    index: usize,
    length: usize,
    cmp: C,
) -> Result<()>
where
    S: Sequence + ?Sized,
    S::Item: Default + Send + 'static,
    C: Comparator<S::Item>,
{
    log::trace!("sort_range_by: {algorithm:?} over {length} elements at {index}");
    match algorithm {
        SortAlgorithm::Insertion => insertion_sort(seq, index, length, cmp),
        SortAlgorithm::Quick => quick_sort(seq, index, length, cmp),
        SortAlgorithm::Merge => merge_sort(seq, index, length, cmp),
        SortAlgorithm::Heap => heap_sort(seq, index, length, cmp),
        SortAlgorithm::Intro => intro_sort(seq, index, length, cmp),
        SortAlgorithm::Tim => tim_sort(seq, index, length, cmp),
    }
}

/// Sorts `slice[index..index + length]` as `options` describe.
pub fn sort_slice_with<T, C>(
    options: SortOptions,
    slice: &mut [T],
    index: usize,
    length: usize,
    cmp: C,
) -> Result<()>
where
    T: Default + Send + 'static,
    C: Comparator<T> + Sync,
{
    if options.parallel && options.algorithm == SortAlgorithm::Merge {
        par_merge_sort(slice, index, length, cmp)
    } else {
        sort_range_by(options.algorithm, slice, index, length, cmp)
    }
}

/// Whether `seq[index..index + length]` is ordered under `cmp`.
pub fn is_sorted_by<S, C>(seq: &S, index: usize, length: usize, cmp: C) -> Result<bool>
where
    S: Sequence + ?Sized,
    C: Comparator<S::Item>,
{
    verify_range!(index, length, seq.len());
    Ok((index + 1..index + length).all(|i| !cmp.is_less(seq.get(i), seq.get(i - 1))))
}

/// Sorting methods for every [`Sequence`], including pooled buffers.
///
/// ```
/// use poolsort_buffers::PooledBuffer;
/// use poolsort_sort::{NaturalOrder, SortAlgorithm, SortExt};
///
/// let mut buf = PooledBuffer::<i32>::rent(4);
/// buf.copy_from_slice(0, &[3, -1, 2, 0]).unwrap();
/// buf.sort_range_by(SortAlgorithm::Quick, 1, 3, NaturalOrder).unwrap();
/// assert_eq!(buf.as_slice(), &[3, -1, 0, 2]);
/// ```
pub trait SortExt: Sequence {
    fn sort_range_by<C>(
        &mut self,
        algorithm: SortAlgorithm,
        index: usize,
        length: usize,
        cmp: C,
    ) -> Result<()>
    where
        Self::Item: Default + Send + 'static,
        C: Comparator<Self::Item>,
    {
        sort_range_by(algorithm, self, index, length, cmp)
    }

    /// Sorts the whole sequence ascending with `algorithm`.
    fn sort_with(&mut self, algorithm: SortAlgorithm) -> Result<()>
    where
        Self::Item: Ord + Default + Send + 'static,
    {
        let len = self.len();
        sort_range_by(algorithm, self, 0, len, NaturalOrder)
    }

    fn is_sorted_range_by<C>(&self, index: usize, length: usize, cmp: C) -> Result<bool>
    where
        C: Comparator<Self::Item>,
    {
        is_sorted_by(self, index, length, cmp)
    }
}

impl<S: Sequence + ?Sized> SortExt for S {}
