//! [`PooledVec`]: a growable buffer whose storage is rented from a [`BufferPool`].

use std::{
    fmt,
    ops::{Deref, DerefMut},
    sync::Arc,
};

use poolsort_common::{Result, verify_index, verify_range};

use crate::{fixed::PooledBuffer, pool::BufferPool};

/// A growable, vector-like buffer backed by pooled storage.
///
/// `PooledVec` wraps a [`PooledBuffer`] whose logical length is the capacity of the
/// vector. When an insertion needs more room, a larger buffer is rented from the same
/// pool, the live elements are moved over and the old buffer is returned; this is the
/// only place where storage is reallocated. Capacity grows to
/// `max(max(capacity, 4) * 2, required)`.
///
/// All indexed operations are checked against [`PooledVec::len`] rather than the
/// capacity and fail before anything is modified.
pub struct PooledVec<T> {
    buffer: PooledBuffer<T>,
    len: usize,
}

impl<T: Default + Send + 'static> PooledVec<T> {
    /// Creates an empty vector that rents from the process-wide pool for `T`.
    pub fn new() -> PooledVec<T> {
        Self::with_capacity(0)
    }

    /// Creates an empty vector with room for `capacity` elements, rented from the
    /// process-wide pool for `T`.
    pub fn with_capacity(capacity: usize) -> PooledVec<T> {
        PooledVec {
            buffer: PooledBuffer::rent(capacity),
            len: 0,
        }
    }
}

impl<T: Default + Send + 'static> Default for PooledVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> PooledVec<T> {
    /// Creates an empty vector that rents from `pool`.
    pub fn new_in(pool: Arc<dyn BufferPool<T>>, clear_on_return: bool) -> PooledVec<T> {
        Self::with_capacity_in(0, pool, clear_on_return)
    }

    /// Creates an empty vector with room for `capacity` elements, rented from `pool`.
    pub fn with_capacity_in(
        capacity: usize,
        pool: Arc<dyn BufferPool<T>>,
        clear_on_return: bool,
    ) -> PooledVec<T> {
        PooledVec {
            buffer: PooledBuffer::rent_in(capacity, pool, clear_on_return),
            len: 0,
        }
    }

    /// Makes sure the vector can hold `required` elements without reallocating.
    pub fn ensure_capacity(&mut self, required: usize) {
        let capacity = self.capacity();
        if required <= capacity {
            return;
        }
        let new_capacity = (capacity.max(4) * 2).max(required);
        log::trace!(
            "PooledVec: growing from {capacity} to {new_capacity} ({} live)",
            self.len
        );

        let mut grown = PooledBuffer::rent_in(
            new_capacity,
            self.buffer.pool().clone(),
            self.buffer.clear_on_return(),
        );
        grown[..self.len].swap_with_slice(&mut self.buffer[..self.len]);
        let old = std::mem::replace(&mut self.buffer, grown);
        old.release();
    }

    /// Appends `value` to the end of the vector.
    pub fn push(&mut self, value: T) {
        self.ensure_capacity(self.len + 1);
        self.buffer[self.len] = value;
        self.len += 1;
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(std::mem::take(&mut self.buffer[self.len]))
    }

    /// Inserts `value` at `index`, shifting the elements after it to the right.
    ///
    /// `index` may be equal to `len`, which appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        verify_range!(index, 0, self.len);
        self.ensure_capacity(self.len + 1);
        self.buffer[self.len] = value;
        self.buffer[index..=self.len].rotate_right(1);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the elements after it to
    /// the left. The vacated slot is reset to `T::default()`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        verify_index!(index, self.len);
        self.buffer[index..self.len].rotate_left(1);
        self.len -= 1;
        Ok(std::mem::take(&mut self.buffer[self.len]))
    }

    /// Removes `count` elements starting at `index`.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Result<()> {
        verify_range!(index, count, self.len);
        self.buffer[index..self.len].rotate_left(count);
        self.truncate(self.len - count);
        Ok(())
    }

    /// Shortens the vector to `len` elements. Has no effect if `len` is not below the
    /// current length.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        if std::mem::needs_drop::<T>() {
            self.buffer[len..self.len]
                .iter_mut()
                .for_each(|value| *value = T::default());
        }
        self.len = len;
    }

    /// Removes all elements, keeping the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Keeps only the elements for which `keep` returns `true`, preserving their order.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let mut kept = 0;
        for i in 0..self.len {
            if keep(&self.buffer[i]) {
                if i != kept {
                    self.buffer.as_mut_slice().swap(kept, i);
                }
                kept += 1;
            }
        }
        self.truncate(kept);
    }

    /// Collapses consecutive elements considered equal by `same` into the first one.
    pub fn dedup_by(&mut self, mut same: impl FnMut(&T, &T) -> bool) {
        if self.len < 2 {
            return;
        }
        let mut last = 0;
        for i in 1..self.len {
            if !same(&self.buffer[last], &self.buffer[i]) {
                last += 1;
                if i != last {
                    self.buffer.as_mut_slice().swap(last, i);
                }
            }
        }
        self.truncate(last + 1);
    }

    /// Converts the vector into a fixed buffer holding exactly its live elements.
    ///
    /// The storage moves into the returned buffer without copying; its logical length
    /// becomes [`PooledVec::len`] rather than the capacity.
    pub fn finalize(self) -> PooledBuffer<T> {
        let PooledVec { mut buffer, len } = self;
        buffer.set_len(len);
        buffer
    }
}

impl<T: Default + Clone> PooledVec<T> {
    /// Inserts clones of `values` at `index`, shifting the elements after them right.
    pub fn insert_from_slice(&mut self, index: usize, values: &[T]) -> Result<()> {
        verify_range!(index, 0, self.len);
        let count = values.len();
        self.ensure_capacity(self.len + count);
        self.buffer[self.len..self.len + count].clone_from_slice(values);
        self.buffer[index..self.len + count].rotate_right(count);
        self.len += count;
        Ok(())
    }

    /// Appends clones of `values`.
    pub fn extend_from_slice(&mut self, values: &[T]) {
        self.ensure_capacity(self.len + values.len());
        self.buffer[self.len..self.len + values.len()].clone_from_slice(values);
        self.len += values.len();
    }
}

impl<T> PooledVec<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the vector can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.buffer[..self.len]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buffer[..self.len]
    }

    pub fn get(&self, index: usize) -> Result<&T> {
        verify_index!(index, self.len);
        Ok(&self.buffer[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        verify_index!(index, self.len);
        Ok(&mut self.buffer[index])
    }

    pub fn set(&mut self, index: usize, value: T) -> Result<()> {
        verify_index!(index, self.len);
        self.buffer[index] = value;
        Ok(())
    }

    pub fn swap(&mut self, a: usize, b: usize) -> Result<()> {
        verify_index!(a, self.len);
        verify_index!(b, self.len);
        self.buffer.as_mut_slice().swap(a, b);
        Ok(())
    }

    pub fn reverse(&mut self, start: usize, length: usize) -> Result<()> {
        verify_range!(start, length, self.len);
        self.buffer[start..start + length].reverse();
        Ok(())
    }

    /// Returns the storage to the pool. Equivalent to dropping the vector.
    pub fn release(self) {}
}

impl<T: PartialEq> PooledVec<T> {
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.as_slice().iter().position(|v| v == value)
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }
}

impl<T> Deref for PooledVec<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for PooledVec<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for PooledVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledVec")
            .field("values", &self.as_slice())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl<'a, T> IntoIterator for &'a PooledVec<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<T: Default> Extend<T> for PooledVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_capacity(self.len + iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::RecordingPool;

    fn vec_in<T: Default + Send + 'static>(pool: &Arc<RecordingPool<T>>) -> PooledVec<T> {
        PooledVec::new_in(pool.clone(), std::mem::needs_drop::<T>())
    }

    #[test]
    fn test_add_grows_from_zero() {
        let pool = RecordingPool::<i32>::new();
        let mut v = vec_in(&pool);
        assert_eq!(v.capacity(), 0);
        for i in 0..5 {
            v.push(i);
        }
        assert_eq!(v.len(), 5);
        assert!(v.capacity() >= 5);
        assert_eq!(v.capacity(), 8);
        assert_eq!(v.as_slice(), &[0, 1, 2, 3, 4]);

        let fixed = v.finalize();
        assert_eq!(fixed.len(), 5);
        assert_eq!(fixed.as_slice(), &[0, 1, 2, 3, 4]);
        drop(fixed);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn test_capacity_doubles() {
        let pool = RecordingPool::<u8>::new();
        let mut v = PooledVec::with_capacity_in(4, pool.clone(), false);
        let mut seen = vec![v.capacity()];
        for i in 0..100u8 {
            v.push(i);
            if *seen.last().unwrap() != v.capacity() {
                seen.push(v.capacity());
            }
        }
        assert_eq!(seen, vec![4, 8, 16, 32, 64, 128]);
        assert_eq!(v.len(), 100);
        assert!(v.iter().copied().eq(0..100u8));
        // Every replaced buffer went back to the pool.
        assert_eq!(pool.outstanding(), 1);
    }

    #[test]
    fn test_ensure_capacity_honors_large_requests() {
        let pool = RecordingPool::<u8>::new();
        let mut v = vec_in(&pool);
        v.ensure_capacity(3);
        assert_eq!(v.capacity(), 8);
        v.ensure_capacity(100);
        assert_eq!(v.capacity(), 100);
        v.ensure_capacity(50);
        assert_eq!(v.capacity(), 100);
    }

    #[test]
    fn test_insert_and_remove() {
        let pool = RecordingPool::<String>::new();
        let mut v = vec_in(&pool);
        v.extend_from_slice(&["a".to_string(), "d".to_string()]);
        v.insert(1, "b".to_string()).unwrap();
        v.insert(3, "e".to_string()).unwrap();
        v.insert_from_slice(2, &["c".to_string()]).unwrap();
        assert_eq!(v.as_slice(), &["a", "b", "c", "d", "e"]);

        assert!(v.insert(6, "x".to_string()).unwrap_err().is_index_out_of_range());
        assert_eq!(v.len(), 5);

        assert_eq!(v.remove_at(0).unwrap(), "a");
        assert_eq!(v.as_slice(), &["b", "c", "d", "e"]);
        assert!(v.remove_at(4).unwrap_err().is_index_out_of_range());

        v.remove_range(1, 2).unwrap();
        assert_eq!(v.as_slice(), &["b", "e"]);
        assert!(v.remove_range(1, 2).is_err());
        assert_eq!(v.as_slice(), &["b", "e"]);

        assert_eq!(v.index_of(&"e".to_string()), Some(1));
        assert!(!v.contains(&"a".to_string()));
    }

    #[test]
    fn test_vacated_slots_release_values() {
        let pool = RecordingPool::<Option<Arc<u32>>>::new();
        let shared = Arc::new(7u32);
        let mut v = vec_in(&pool);
        for _ in 0..4 {
            v.push(Some(shared.clone()));
        }
        assert_eq!(Arc::strong_count(&shared), 5);

        let removed = v.remove_at(1).unwrap();
        drop(removed);
        assert_eq!(Arc::strong_count(&shared), 4);

        v.truncate(1);
        assert_eq!(Arc::strong_count(&shared), 2);

        v.remove_range(0, 1).unwrap();
        assert_eq!(Arc::strong_count(&shared), 1);
        assert!(v.is_empty());
    }

    #[test]
    fn test_insert_into_full_vector_moves_storage() {
        let pool = RecordingPool::<u32>::new();
        let mut v = PooledVec::with_capacity_in(2, pool.clone(), false);
        v.push(1);
        v.push(3);
        v.insert(1, 2).unwrap();
        assert_eq!(v.as_slice(), &[1, 2, 3]);
        assert_eq!(v.capacity(), 8);
        assert_eq!(pool.returned(), 1);
    }

    #[test]
    fn test_retain_and_dedup() {
        let pool = RecordingPool::<i64>::new();
        let mut v = vec_in(&pool);
        v.extend(1..=10);
        v.retain(|x| x % 3 != 0);
        assert_eq!(v.as_slice(), &[1, 2, 4, 5, 7, 8, 10]);

        let mut w = vec_in(&pool);
        w.extend_from_slice(&[1, 1, 2, 2, 2, 3, 1, 1]);
        w.dedup_by(|a, b| a == b);
        assert_eq!(w.as_slice(), &[1, 2, 3, 1]);
    }

    #[test]
    fn test_pop_and_accessors() {
        let pool = RecordingPool::<u16>::new();
        let mut v = vec_in(&pool);
        assert_eq!(v.pop(), None);
        v.extend_from_slice(&[5, 6, 7]);
        v.set(0, 4).unwrap();
        *v.get_mut(1).unwrap() += 1;
        v.swap(0, 2).unwrap();
        assert_eq!(v.as_slice(), &[7, 7, 4]);
        v.reverse(0, 3).unwrap();
        assert_eq!(v.as_slice(), &[4, 7, 7]);
        assert!(v.set(3, 0).is_err());
        assert!(v.get(3).is_err());
        assert_eq!(v.pop(), Some(7));
        v.clear();
        assert!(v.is_empty());
        assert!(v.capacity() >= 3);
    }

    #[test]
    fn test_default_uses_shared_pool() {
        let mut v = PooledVec::<u64>::default();
        v.extend(0..1000u64);
        assert_eq!(v.len(), 1000);
        assert_eq!(v.iter().sum::<u64>(), 999 * 1000 / 2);
    }
}
