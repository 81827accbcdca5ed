//! Growable contiguous array with bounds-checked access.
//!
//! [`ContiguousArray`] keeps its elements in one contiguous buffer. Logical
//! length and allocated capacity are tracked separately, so growth is
//! amortized O(1) per appended element rather than a full copy per element.
//!
//! # Examples
//!
//! ```rust
//! use morphseq::storage::ContiguousArray;
//!
//! let mut array = ContiguousArray::from_slice(&[1, 2, 3]);
//! array.resize(2).unwrap();
//! assert_eq!(array.as_slice(), &[1, 2]);
//!
//! // Shrinking to nothing is rejected
//! assert!(array.resize(0).is_err());
//! assert_eq!(array.len(), 2);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::{Storage, StorageKind};
use crate::error::{SequenceError, SequenceResult};

/// A growable array with bounds-checked access.
///
/// # Time Complexity
///
/// | Operation  | Complexity     |
/// |------------|----------------|
/// | `get`      | O(1)           |
/// | `set`      | O(1)           |
/// | `append`   | O(1) amortized |
/// | `prepend`  | O(n)           |
/// | `insert`   | O(n)           |
/// | `remove`   | O(n)           |
/// | `resize`   | O(n)           |
#[derive(Clone, PartialEq, Eq)]
pub struct ContiguousArray<T> {
    elements: Vec<T>,
}

impl<T> ContiguousArray<T> {
    /// Creates a new empty array without allocating.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Creates an empty array with room for at least `capacity` elements.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    /// Creates an empty array with room for at least `capacity` elements,
    /// reporting allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the buffer cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> SequenceResult<Self> {
        let mut elements = Vec::new();
        elements.try_reserve_exact(capacity)?;
        Ok(Self { elements })
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements the array can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.elements.capacity()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::ContiguousArray;
    ///
    /// let array = ContiguousArray::from_slice(&[10, 20]);
    /// assert_eq!(array.get(1), Ok(&20));
    /// assert!(array.get(2).is_err());
    /// ```
    pub fn get(&self, index: usize) -> SequenceResult<&T> {
        let length = self.len();
        self.elements
            .get(index)
            .ok_or(SequenceError::out_of_range(index, length))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn get_mut(&mut self, index: usize) -> SequenceResult<&mut T> {
        let length = self.len();
        self.elements
            .get_mut(index)
            .ok_or(SequenceError::out_of_range(index, length))
    }

    /// Replaces the element at `index` with `value`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn set(&mut self, index: usize, value: T) -> SequenceResult<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the array is empty.
    pub fn first(&self) -> SequenceResult<&T> {
        self.elements.first().ok_or(SequenceError::empty("first"))
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the array is empty.
    pub fn last(&self) -> SequenceResult<&T> {
        self.elements.last().ok_or(SequenceError::empty("last"))
    }

    /// Adds `element` after the last element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the buffer cannot grow;
    /// the array is unchanged in that case.
    pub fn append(&mut self, element: T) -> SequenceResult<()> {
        self.elements.try_reserve(1)?;
        self.elements.push(element);
        Ok(())
    }

    /// Adds `element` before the first element, shifting everything right.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the buffer cannot grow.
    pub fn prepend(&mut self, element: T) -> SequenceResult<()> {
        self.insert(element, 0)
    }

    /// Inserts `element` at `index`, shifting the tail right by one.
    ///
    /// `index == self.len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index > self.len()`, or
    /// [`SequenceError::AllocationFailed`] when the buffer cannot grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::ContiguousArray;
    ///
    /// let mut array = ContiguousArray::from_slice(&[1, 3]);
    /// array.insert(2, 1).unwrap();
    /// assert_eq!(array.as_slice(), &[1, 2, 3]);
    /// assert!(array.insert(9, 4).is_err());
    /// ```
    pub fn insert(&mut self, element: T, index: usize) -> SequenceResult<()> {
        if index > self.len() {
            return Err(SequenceError::out_of_range(index, self.len()));
        }
        self.elements.try_reserve(1)?;
        self.elements.insert(index, element);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn remove(&mut self, index: usize) -> SequenceResult<T> {
        if index >= self.len() {
            return Err(SequenceError::out_of_range(index, self.len()));
        }
        Ok(self.elements.remove(index))
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }
}

impl<T: Default> ContiguousArray<T> {
    /// Changes the logical length to `new_size`.
    ///
    /// Shrinking drops the elements past `new_size`; growing fills the new
    /// slots with `T::default()`. The first `min(new_size, len)` elements are
    /// kept in place.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `new_size == 0`, or
    /// [`SequenceError::AllocationFailed`] when the buffer cannot grow. The
    /// array is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::ContiguousArray;
    ///
    /// let mut array = ContiguousArray::from_slice(&[1, 2]);
    /// array.resize(4).unwrap();
    /// assert_eq!(array.as_slice(), &[1, 2, 0, 0]);
    /// ```
    pub fn resize(&mut self, new_size: usize) -> SequenceResult<()> {
        if new_size == 0 {
            return Err(SequenceError::out_of_range(new_size, self.len()));
        }
        if new_size > self.len() {
            self.elements.try_reserve_exact(new_size - self.len())?;
        }
        self.elements.resize_with(new_size, T::default);
        Ok(())
    }
}

impl<T: Clone> ContiguousArray<T> {
    /// Creates an array holding a copy of `slice`.
    #[must_use]
    pub fn from_slice(slice: &[T]) -> Self {
        Self {
            elements: slice.to_vec(),
        }
    }
}

// =============================================================================
// Storage Implementation
// =============================================================================

impl<T> Storage for ContiguousArray<T> {
    type Element = T;
    type WithType<B> = ContiguousArray<B>;

    const KIND: StorageKind = StorageKind::Array;

    #[inline]
    fn get(&self, index: usize) -> SequenceResult<&T> {
        Self::get(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }

    #[inline]
    fn append(&mut self, element: T) -> SequenceResult<()> {
        Self::append(self, element)
    }

    #[inline]
    fn prepend(&mut self, element: T) -> SequenceResult<()> {
        Self::prepend(self, element)
    }

    #[inline]
    fn insert(&mut self, element: T, index: usize) -> SequenceResult<()> {
        Self::insert(self, element, index)
    }

    #[inline]
    fn iter(&self) -> impl Iterator<Item = &T> {
        self.elements.iter()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for ContiguousArray<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for ContiguousArray<T> {
    #[inline]
    fn from(elements: Vec<T>) -> Self {
        Self { elements }
    }
}

impl<T> From<ContiguousArray<T>> for Vec<T> {
    #[inline]
    fn from(array: ContiguousArray<T>) -> Self {
        array.elements
    }
}

impl<T> FromIterator<T> for ContiguousArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for ContiguousArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.elements.extend(iter);
    }
}

impl<T> IntoIterator for ContiguousArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ContiguousArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: Hash> Hash for ContiguousArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.elements.hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for ContiguousArray<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.elements.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_new_is_empty() {
        let array: ContiguousArray<i32> = ContiguousArray::new();
        assert!(array.is_empty());
        assert_eq!(array.capacity(), 0);
    }

    #[rstest]
    fn test_append_tracks_capacity_separately() {
        let mut array = ContiguousArray::new();
        for value in 0..17 {
            array.append(value).unwrap();
        }
        assert_eq!(array.len(), 17);
        assert!(array.capacity() >= 17);
    }

    #[rstest]
    fn test_set_replaces_in_place() {
        let mut array = ContiguousArray::from_slice(&[1, 2, 3]);
        array.set(1, 20).unwrap();
        assert_eq!(array.as_slice(), &[1, 20, 3]);
    }

    #[rstest]
    fn test_set_out_of_range_leaves_array_unchanged() {
        let mut array = ContiguousArray::from_slice(&[1, 2, 3]);
        assert_eq!(
            array.set(3, 0),
            Err(SequenceError::IndexOutOfRange {
                index: 3,
                length: 3
            })
        );
        assert_eq!(array.as_slice(), &[1, 2, 3]);
    }

    #[rstest]
    fn test_resize_shrinks_keeping_prefix() {
        let mut array = ContiguousArray::from_slice(&[1, 2, 3]);
        array.resize(2).unwrap();
        assert_eq!(array.as_slice(), &[1, 2]);
        assert_eq!(array.len(), 2);
    }

    #[rstest]
    fn test_resize_zero_fails() {
        let mut array = ContiguousArray::from_slice(&[1, 2, 3]);
        let error = array.resize(0).unwrap_err();
        assert!(error.is_out_of_range());
        assert_eq!(array.len(), 3);
    }

    #[rstest]
    fn test_remove_shifts_left() {
        let mut array = ContiguousArray::from_slice(&[1, 2, 3]);
        assert_eq!(array.remove(0), Ok(1));
        assert_eq!(array.as_slice(), &[2, 3]);
        assert!(array.remove(2).is_err());
    }

    #[rstest]
    fn test_first_last_on_empty() {
        let array: ContiguousArray<i32> = ContiguousArray::new();
        assert_eq!(array.first(), Err(SequenceError::empty("first")));
        assert_eq!(array.last(), Err(SequenceError::empty("last")));
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original = ContiguousArray::from_slice(&[1, 2, 3]);
        let mut copy = original.clone();
        copy.set(0, 100).unwrap();
        assert_eq!(original.get(0), Ok(&1));
        assert_eq!(copy.get(0), Ok(&100));
    }

    #[rstest]
    fn test_debug() {
        let array = ContiguousArray::from_slice(&[1, 2]);
        assert_eq!(format!("{array:?}"), "[1, 2]");
    }

    // No `Default` impl on purpose
    #[derive(Debug, PartialEq)]
    struct Opaque(u8);

    fn seeded<S: Storage<Element = Opaque>>() -> S {
        let mut storage = S::default();
        storage.append(Opaque(7)).unwrap();
        storage
    }

    #[rstest]
    fn test_default_accepts_elements_without_default() {
        let empty: ContiguousArray<Opaque> = ContiguousArray::default();
        assert!(empty.is_empty());

        let array: ContiguousArray<Opaque> = seeded();
        assert_eq!(array.get(0), Ok(&Opaque(7)));
    }
}
