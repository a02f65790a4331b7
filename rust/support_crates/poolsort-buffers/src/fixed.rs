//! [`PooledBuffer`]: a fixed-length view over storage rented from a [`BufferPool`].

use std::{
    fmt,
    ops::{Deref, DerefMut},
    sync::Arc,
};

use poolsort_common::{Result, verify_arg, verify_index, verify_range};

use crate::pool::{BufferPool, SharedPool};

/// A fixed-length buffer backed by storage rented from a [`BufferPool`].
///
/// The pool may hand out a block larger than requested; the buffer exposes exactly
/// the requested logical length and never lets an index reach past it. The block is
/// returned to its pool exactly once, when the buffer is dropped or explicitly
/// [released](PooledBuffer::release). Since `release` consumes the buffer and the
/// buffer is not `Clone`, neither a second release nor an access after release can
/// be expressed.
///
/// When `clear_on_return` is set, the whole block (including the part beyond the
/// logical length) is reset to `T::default()` as it goes back to the pool.
pub struct PooledBuffer<T> {
    storage: Vec<T>,
    len: usize,
    clear_on_return: bool,
    pool: Arc<dyn BufferPool<T>>,
}

impl<T: Default + Send + 'static> PooledBuffer<T> {
    /// Rents a buffer of `len` elements from the process-wide pool for `T`.
    ///
    /// The storage is cleared on return when `T` needs to be dropped, i.e. when its
    /// values may own memory or other resources.
    pub fn rent(len: usize) -> PooledBuffer<T> {
        Self::rent_in(
            len,
            SharedPool::<T>::shared(),
            std::mem::needs_drop::<T>(),
        )
    }
}

impl<T: Default> PooledBuffer<T> {
    /// Rents a buffer of `len` elements from the given pool.
    ///
    /// Elements of a freshly allocated block are `T::default()`; a reused block may
    /// still hold values left by a previous renter unless it was cleared on return.
    pub fn rent_in(
        len: usize,
        pool: Arc<dyn BufferPool<T>>,
        clear_on_return: bool,
    ) -> PooledBuffer<T> {
        let mut storage = pool.rent(len);
        if storage.len() < len {
            storage.resize_with(len, T::default);
        }
        PooledBuffer {
            storage,
            len,
            clear_on_return,
            pool,
        }
    }

    /// Rents a buffer for a caller that tracks lengths as signed integers.
    ///
    /// Fails with `InvalidArgument` if `len` is negative or does not fit in `usize`.
    pub fn try_rent_signed(
        len: i64,
        pool: Arc<dyn BufferPool<T>>,
        clear_on_return: bool,
    ) -> Result<PooledBuffer<T>> {
        verify_arg!(len, len >= 0);
        let len = usize::try_from(len)
            .map_err(|_| poolsort_common::error::Error::invalid_arg("len", "exceeds usize"))?;
        Ok(Self::rent_in(len, pool, clear_on_return))
    }

    /// Resets every element of the logical view to `T::default()`.
    pub fn clear(&mut self) {
        self.as_mut_slice()
            .iter_mut()
            .for_each(|value| *value = T::default());
    }
}

impl<T> PooledBuffer<T> {
    /// Logical length of the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Physical length of the rented block, never less than [`PooledBuffer::len`].
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline]
    pub fn clear_on_return(&self) -> bool {
        self.clear_on_return
    }

    /// The pool this buffer returns its storage to.
    pub fn pool(&self) -> &Arc<dyn BufferPool<T>> {
        &self.pool
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage[..self.len]
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.len);
        Ok(&self.storage[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.len);
        Ok(&mut self.storage[index])
    }

    /// Stores `value` at `index`, dropping the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        verify_index!(index, self.len);
        self.storage[index] = value;
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        verify_index!(a, self.len);
        verify_index!(b, self.len);
        self.storage.swap(a, b);
        Ok(())
    }

    /// Returns the `length` elements starting at `start`.
    pub fn slice(&self, start: usize, length: usize) -> Result<&[T]> {
        verify_range!(start, length, self.len);
        Ok(&self.storage[start..start + length])
    }

    pub fn slice_mut(&mut self, start: usize, length: usize) -> Result<&mut [T]> {
        verify_range!(start, length, self.len);
        Ok(&mut self.storage[start..start + length])
    }

    /// Reverses the order of the `length` elements starting at `start`.
    pub fn reverse(&mut self, start: usize, length: usize) -> Result<()> {
        self.slice_mut(start, length)?.reverse();
        Ok(())
    }

    /// Returns the storage to the pool. Equivalent to dropping the buffer.
    pub fn release(self) {}

    /// Replaces the logical length. `len` must not exceed the physical length.
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.storage.len());
        self.len = len;
    }
}

impl<T: Clone> PooledBuffer<T> {
    /// Sets every element of the logical view to `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }

    /// Clones `src` into the buffer starting at `offset`.
    pub fn copy_from_slice(&mut self, offset: usize, src: &[T]) -> Result<()> {
        self.slice_mut(offset, src.len())?.clone_from_slice(src);
        Ok(())
    }
}

impl<T> Drop for PooledBuffer<T> {
    fn drop(&mut self) {
        let storage = std::mem::take(&mut self.storage);
        if !storage.is_empty() {
            self.pool.recycle(storage, self.clear_on_return);
        }
    }
}

impl<T> Deref for PooledBuffer<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for PooledBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for PooledBuffer<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for PooledBuffer<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for PooledBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("values", &self.as_slice())
            .field("capacity", &self.capacity())
            .field("clear_on_return", &self.clear_on_return)
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a PooledBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut PooledBuffer<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::RecordingPool;

    #[test]
    fn test_logical_view_is_bounded() {
        let pool = RecordingPool::<u32>::new();
        let mut buf = PooledBuffer::rent_in(5, pool.clone(), false);
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.as_slice().len(), 5);
        buf.set(4, 9).unwrap();
        assert_eq!(*buf.get(4).unwrap(), 9);
        assert!(buf.get(5).unwrap_err().is_index_out_of_range());
        assert!(buf.set(5, 1).unwrap_err().is_index_out_of_range());
        assert!(buf.get_mut(7).is_err());
    }

    #[test]
    fn test_zero_length_buffer() {
        let pool = RecordingPool::<u32>::new();
        let buf = PooledBuffer::rent_in(0, pool.clone(), false);
        assert!(buf.is_empty());
        assert!(buf.get(0).is_err());
        assert_eq!(buf.slice(0, 0).unwrap(), &[] as &[u32]);
        drop(buf);
        assert_eq!(pool.returned(), 0);
    }

    #[test]
    fn test_negative_length_is_rejected() {
        let pool = RecordingPool::<u32>::new();
        let err = PooledBuffer::try_rent_signed(-1, pool.clone(), false).unwrap_err();
        assert!(err.is_invalid_arg());
        let buf = PooledBuffer::try_rent_signed(3, pool.clone(), false).unwrap();
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_release_returns_storage_once() {
        let pool = RecordingPool::<u64>::new();
        let buf = PooledBuffer::rent_in(6, pool.clone(), false);
        assert_eq!(pool.outstanding(), 1);
        buf.release();
        assert_eq!(pool.outstanding(), 0);
        assert_eq!(pool.returned(), 1);
        assert_eq!(pool.returned_lens(), vec![8]);
    }

    #[test]
    fn test_clear_on_return_resets_physical_storage() {
        let pool = RecordingPool::<String>::new();
        let mut buf = PooledBuffer::rent_in(3, pool.clone(), true);
        buf.fill("x".to_string());
        buf.release();
        assert_eq!(pool.cleared(), vec![true]);

        let again = PooledBuffer::rent_in(4, pool.clone(), true);
        assert_eq!(again.capacity(), 4);
        assert!(again.iter().all(String::is_empty));
    }

    #[test]
    fn test_slice_and_reverse() {
        let pool = RecordingPool::<i32>::new();
        let mut buf = PooledBuffer::rent_in(6, pool, false);
        buf.copy_from_slice(0, &[1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buf.slice(1, 3).unwrap(), &[2, 3, 4]);
        buf.reverse(1, 4).unwrap();
        assert_eq!(buf.as_slice(), &[1, 5, 4, 3, 2, 6]);
        assert!(buf.reverse(4, 3).unwrap_err().is_index_out_of_range());
        assert_eq!(buf.as_slice(), &[1, 5, 4, 3, 2, 6]);
        assert!(buf.copy_from_slice(5, &[0, 0]).is_err());
        buf.swap(0, 5).unwrap();
        assert_eq!(buf[0], 6);
        assert_eq!(buf[5], 1);
    }

    #[test]
    fn test_clear_resets_logical_view() {
        let pool = RecordingPool::<i32>::new();
        let mut buf = PooledBuffer::rent_in(3, pool, false);
        buf.fill(7);
        buf.clear();
        assert_eq!(buf.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn test_rent_from_shared_pool() {
        let mut buf = PooledBuffer::<u128>::rent(10);
        assert_eq!(buf.len(), 10);
        assert!(!buf.clear_on_return());
        buf[3] = 42;
        assert_eq!(buf.iter().copied().max(), Some(42));

        let names = PooledBuffer::<String>::rent(2);
        assert!(names.clear_on_return());
    }

    #[test]
    #[should_panic]
    fn test_index_past_logical_length_panics() {
        let pool = RecordingPool::<u8>::new();
        let buf = PooledBuffer::rent_in(3, pool, false);
        let _ = buf[3];
    }
}
