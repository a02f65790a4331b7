//! The [`Sequence`] capability the sort engine operates on.

use std::collections::VecDeque;

use poolsort_buffers::{PooledBuffer, PooledVec};

/// A mutable, indexable, length-reporting container.
///
/// This is everything the sort engine needs from the data it rearranges; it never
/// allocates or resizes a sequence. Indexed methods may panic when `index` is out of
/// bounds: the engine validates ranges before touching any element.
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> &Self::Item;

    fn set(&mut self, index: usize, value: Self::Item);

    /// Stores `value` at `index` and returns the value it displaced.
    fn replace(&mut self, index: usize, value: Self::Item) -> Self::Item;

    fn swap(&mut self, a: usize, b: usize);
}

impl<T> Sequence for [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }

    #[inline]
    fn replace(&mut self, index: usize, value: T) -> T {
        std::mem::replace(&mut self[index], value)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        <[T]>::swap(self, a, b);
    }
}

/// Forwards every [`Sequence`] method to the slice a container dereferences to.
macro_rules! impl_sequence_via_slice {
    ($($ty:ident),*) => {
        $(
            impl<T> Sequence for $ty<T> {
                type Item = T;

                #[inline]
                fn len(&self) -> usize {
                    self.as_slice().len()
                }

                #[inline]
                fn get(&self, index: usize) -> &T {
                    &self.as_slice()[index]
                }

                #[inline]
                fn set(&mut self, index: usize, value: T) {
                    self.as_mut_slice()[index] = value;
                }

                #[inline]
                fn replace(&mut self, index: usize, value: T) -> T {
                    std::mem::replace(&mut self.as_mut_slice()[index], value)
                }

                #[inline]
                fn swap(&mut self, a: usize, b: usize) {
                    self.as_mut_slice().swap(a, b);
                }
            }
        )*
    };
}

impl_sequence_via_slice!(Vec, PooledBuffer, PooledVec);

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        &self[index]
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self[index] = value;
    }

    #[inline]
    fn replace(&mut self, index: usize, value: T) -> T {
        std::mem::replace(&mut self[index], value)
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        VecDeque::swap(self, a, b);
    }
}
