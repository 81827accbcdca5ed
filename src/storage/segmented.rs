//! Chunked list of fixed-capacity segments.
//!
//! [`SegmentedList`] sits between an array and a linked list: elements live in
//! contiguous segments of at most [`SEGMENT_SIZE`] elements, and the segments
//! are chained together in logical order.
//!
//! ```text
//! head
//!  |
//!  v
//! [ 0 .. 31 ] -> [ 32 .. 47 ] -> [ 48 .. 63 ] -> nil
//!    full          half            half
//! ```
//!
//! A middle insertion shifts at most one segment's worth of elements. When the
//! target segment is full it is split in two halves first, so every split
//! leaves both halves between `SEGMENT_SIZE / 2` and `SEGMENT_SIZE` elements.
//! Removal merges an under-filled segment with its successor when the two fit
//! in one segment, and unlinks segments that become empty.
//!
//! # Examples
//!
//! ```rust
//! use morphseq::storage::{SEGMENT_SIZE, SegmentedList};
//!
//! let mut list: SegmentedList<usize> = (0..=SEGMENT_SIZE).collect();
//! assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE, 1]);
//!
//! // Inserting into the full first segment splits it
//! list.insert(999, SEGMENT_SIZE / 2).unwrap();
//! assert_eq!(list.segment_count(), 3);
//! assert_eq!(list.get(SEGMENT_SIZE / 2), Ok(&999));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use arrayvec::ArrayVec;
use static_assertions::const_assert;

use super::{Storage, StorageKind};
use crate::error::{SequenceError, SequenceResult};

/// Maximum number of elements held by one segment.
pub const SEGMENT_SIZE: usize = 32;

/// Number of elements moved into the new segment by a split.
const HALF_SEGMENT: usize = SEGMENT_SIZE / 2;

const_assert!(SEGMENT_SIZE >= 2);
const_assert!(SEGMENT_SIZE % 2 == 0);

type Link<T> = Option<Box<Segment<T>>>;

/// One fixed-capacity chunk; exclusively owns the rest of the chain.
struct Segment<T> {
    elements: ArrayVec<T, SEGMENT_SIZE>,
    next: Link<T>,
}

impl<T> Segment<T> {
    const fn new(next: Link<T>) -> Self {
        Self {
            elements: ArrayVec::new_const(),
            next,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.elements.is_full()
    }
}

/// A list of fixed-capacity segments.
///
/// # Invariants
///
/// - every segment holds between 1 and [`SEGMENT_SIZE`] elements
/// - `length` equals the sum of the segment lengths
/// - chain order is logical element order
///
/// # Time Complexity
///
/// | Operation | Complexity                  |
/// |-----------|-----------------------------|
/// | `get`     | O(n / `SEGMENT_SIZE`)       |
/// | `append`  | O(n / `SEGMENT_SIZE`)       |
/// | `prepend` | O(`SEGMENT_SIZE`)           |
/// | `insert`  | O(n / `SEGMENT_SIZE` + `SEGMENT_SIZE`) |
/// | `remove`  | O(n / `SEGMENT_SIZE` + `SEGMENT_SIZE`) |
pub struct SegmentedList<T> {
    head: Link<T>,
    length: usize,
    segments: usize,
}

impl<T> SegmentedList<T> {
    /// Creates a new empty list without allocating.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: None,
            length: 0,
            segments: 0,
        }
    }

    /// Returns the total number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of segments in the chain.
    #[inline]
    #[must_use]
    pub const fn segment_count(&self) -> usize {
        self.segments
    }

    /// Returns the length of every segment, in chain order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::SegmentedList;
    ///
    /// let list: SegmentedList<i32> = (0..40).collect();
    /// assert_eq!(list.segment_lengths(), vec![32, 8]);
    /// ```
    #[must_use]
    pub fn segment_lengths(&self) -> Vec<usize> {
        self.chain().map(Segment::len).collect()
    }

    fn chain(&self) -> impl Iterator<Item = &Segment<T>> {
        std::iter::successors(self.head.as_deref(), |segment| segment.next.as_deref())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// The owning segment is found by walking the chain and subtracting each
    /// segment's length from the remaining offset.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn get(&self, index: usize) -> SequenceResult<&T> {
        let mut remaining = index;
        for segment in self.chain() {
            if remaining < segment.len() {
                return segment
                    .elements
                    .get(remaining)
                    .ok_or(SequenceError::out_of_range(index, self.length));
            }
            remaining -= segment.len();
        }
        Err(SequenceError::out_of_range(index, self.length))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn get_mut(&mut self, index: usize) -> SequenceResult<&mut T> {
        let length = self.length;
        let (segment, offset) = self.locate_mut(index)?;
        segment
            .elements
            .get_mut(offset)
            .ok_or(SequenceError::out_of_range(index, length))
    }

    /// Finds the segment holding `index` and the offset inside it.
    fn locate_mut(&mut self, index: usize) -> SequenceResult<(&mut Segment<T>, usize)> {
        let error = SequenceError::out_of_range(index, self.length);
        if index >= self.length {
            return Err(error);
        }
        let mut remaining = index;
        let mut current = self.head.as_deref_mut().ok_or_else(|| error.clone())?;
        while remaining >= current.len() {
            remaining -= current.len();
            current = current.next.as_deref_mut().ok_or_else(|| error.clone())?;
        }
        Ok((current, remaining))
    }

    fn last_segment_mut(&mut self) -> Option<&mut Segment<T>> {
        let mut current = self.head.as_deref_mut()?;
        while current.next.is_some() {
            current = current.next.as_deref_mut()?;
        }
        Some(current)
    }

    /// Adds `element` after the last element.
    ///
    /// Walks to the last segment and opens a new one when it is full.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the [`Storage`] contract.
    pub fn append(&mut self, element: T) -> SequenceResult<()> {
        let mut opened = false;
        match self.last_segment_mut() {
            Some(last) if !last.is_full() => last.elements.push(element),
            Some(last) => {
                let mut segment = Segment::new(None);
                segment.elements.push(element);
                last.next = Some(Box::new(segment));
                opened = true;
            }
            None => {
                let mut segment = Segment::new(None);
                segment.elements.push(element);
                self.head = Some(Box::new(segment));
                opened = true;
            }
        }
        if opened {
            self.segments += 1;
        }
        self.length += 1;
        Ok(())
    }

    /// Adds `element` before the first element.
    ///
    /// A full head segment gets a fresh segment linked in front of it.
    ///
    /// # Errors
    ///
    /// Never fails; the signature matches the [`Storage`] contract.
    pub fn prepend(&mut self, element: T) -> SequenceResult<()> {
        let needs_segment = self.head.as_deref().is_none_or(Segment::is_full);
        if needs_segment {
            let previous = self.head.take();
            self.head = Some(Box::new(Segment::new(previous)));
            self.segments += 1;
        }
        if let Some(head) = self.head.as_deref_mut() {
            head.elements.insert(0, element);
        }
        self.length += 1;
        Ok(())
    }

    /// Inserts `element` so that it becomes the element at `index`.
    ///
    /// The boundaries delegate to [`prepend`](Self::prepend) and
    /// [`append`](Self::append). Otherwise the owning segment is located and,
    /// if full, split by moving its upper half into a new segment linked right
    /// after it; the element is then shifted into place inside one segment.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index > self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::SegmentedList;
    ///
    /// let mut list: SegmentedList<i32> = (0..32).collect();
    /// list.insert(-1, 16).unwrap();
    /// assert_eq!(list.segment_lengths(), vec![16, 17]);
    /// ```
    pub fn insert(&mut self, element: T, index: usize) -> SequenceResult<()> {
        if index > self.length {
            return Err(SequenceError::out_of_range(index, self.length));
        }
        if index == 0 {
            return self.prepend(element);
        }
        if index == self.length {
            return self.append(element);
        }

        let (segment, offset) = self.locate_mut(index)?;
        let split = segment.is_full();
        if split {
            let mut sibling = Box::new(Segment::new(segment.next.take()));
            sibling.elements = segment.elements.drain(HALF_SEGMENT..).collect();
            if offset >= HALF_SEGMENT {
                sibling.elements.insert(offset - HALF_SEGMENT, element);
            } else {
                segment.elements.insert(offset, element);
            }
            segment.next = Some(sibling);
        } else {
            segment.elements.insert(offset, element);
        }

        if split {
            self.segments += 1;
            tracing::trace!(index, segments = self.segments, "split full segment");
        }
        self.length += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// A segment left empty is unlinked. A segment left below half capacity
    /// absorbs its successor when both fit in one segment.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::SegmentedList;
    ///
    /// let mut list: SegmentedList<i32> = (0..33).collect();
    /// assert_eq!(list.remove(32), Ok(32));
    /// assert_eq!(list.segment_lengths(), vec![32]);
    /// ```
    pub fn remove(&mut self, index: usize) -> SequenceResult<T> {
        let error = SequenceError::out_of_range(index, self.length);
        if index >= self.length {
            return Err(error);
        }

        let mut link = &mut self.head;
        let mut remaining = index;
        loop {
            let length = link.as_deref().map_or(0, Segment::len);
            if remaining < length {
                break;
            }
            remaining -= length;
            link = &mut link.as_mut().ok_or_else(|| error.clone())?.next;
        }

        let segment = link.as_mut().ok_or_else(|| error.clone())?;
        let removed = segment.elements.remove(remaining);
        let mut released = 0;
        if segment.elements.is_empty() {
            let next = segment.next.take();
            *link = next;
            released = 1;
        } else if segment.len() < HALF_SEGMENT
            && let Some(mut successor) = segment.next.take()
        {
            if segment.len() + successor.len() <= SEGMENT_SIZE {
                segment.elements.extend(successor.elements.drain(..));
                segment.next = successor.next.take();
                released = 1;
                tracing::trace!(index, "merged segment with successor");
            } else {
                segment.next = Some(successor);
            }
        }

        self.segments -= released;
        self.length -= 1;
        Ok(removed)
    }

    /// Returns an iterator over references to the elements in logical order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> SegmentedListIterator<'_, T> {
        SegmentedListIterator {
            current: self.head.as_deref(),
            offset: 0,
            remaining: self.length,
        }
    }
}

// =============================================================================
// Storage Implementation
// =============================================================================

impl<T> Storage for SegmentedList<T> {
    type Element = T;
    type WithType<B> = SegmentedList<B>;

    const KIND: StorageKind = StorageKind::Segmented;

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
        Self::iter(self)
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// An iterator over references to elements of a [`SegmentedList`].
pub struct SegmentedListIterator<'a, T> {
    current: Option<&'a Segment<T>>,
    offset: usize,
    remaining: usize,
}

impl<'a, T> Iterator for SegmentedListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let segment = self.current?;
            if let Some(element) = segment.elements.get(self.offset) {
                self.offset += 1;
                self.remaining = self.remaining.saturating_sub(1);
                return Some(element);
            }
            self.current = segment.next.as_deref();
            self.offset = 0;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SegmentedListIterator<'_, T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for SegmentedList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Releases the chain one segment at a time.
impl<T> Drop for SegmentedList<T> {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut segment) = current {
            current = segment.next.take();
        }
    }
}

/// Deep copy that preserves the segment layout.
impl<T: Clone> Clone for SegmentedList<T> {
    fn clone(&self) -> Self {
        let mut head: Link<T> = None;
        let mut link = &mut head;
        for segment in self.chain() {
            let mut copy = Segment::new(None);
            copy.elements.clone_from(&segment.elements);
            link = &mut link.insert(Box::new(copy)).next;
        }
        Self {
            head,
            length: self.length,
            segments: self.segments,
        }
    }
}

impl<T> FromIterator<T> for SegmentedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Tops up the last segment, then links full segments after it.
impl<T> Extend<T> for SegmentedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut iter = iter.into_iter();
        let mut added = 0;
        if let Some(last) = self.last_segment_mut() {
            while !last.is_full() {
                let Some(element) = iter.next() else { break };
                last.elements.push(element);
                added += 1;
            }
        }

        let mut chunks: Vec<ArrayVec<T, SEGMENT_SIZE>> = Vec::new();
        loop {
            let chunk: ArrayVec<T, SEGMENT_SIZE> = iter.by_ref().take(SEGMENT_SIZE).collect();
            if chunk.is_empty() {
                break;
            }
            added += chunk.len();
            chunks.push(chunk);
        }
        if chunks.is_empty() {
            self.length += added;
            return;
        }

        // Link from the back so each segment is boxed exactly once
        let opened = chunks.len();
        let mut chain: Link<T> = None;
        while let Some(elements) = chunks.pop() {
            chain = Some(Box::new(Segment {
                elements,
                next: chain,
            }));
        }
        match self.last_segment_mut() {
            Some(last) => last.next = chain,
            None => self.head = chain,
        }
        self.length += added;
        self.segments += opened;
    }
}

impl<'a, T> IntoIterator for &'a SegmentedList<T> {
    type Item = &'a T;
    type IntoIter = SegmentedListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for SegmentedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for SegmentedList<T> {}

impl<T: Hash> Hash for SegmentedList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.length.hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for SegmentedList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn collect(list: &SegmentedList<usize>) -> Vec<usize> {
        list.iter().copied().collect()
    }

    fn assert_invariants<T>(list: &SegmentedList<T>) {
        let lengths = list.segment_lengths();
        assert_eq!(lengths.len(), list.segment_count());
        assert_eq!(lengths.iter().sum::<usize>(), list.len());
        assert!(lengths.iter().all(|&length| (1..=SEGMENT_SIZE).contains(&length)));
    }

    #[rstest]
    fn test_append_fills_then_opens_segment() {
        let mut list = SegmentedList::new();
        for value in 0..=SEGMENT_SIZE {
            list.append(value).unwrap();
        }
        assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE, 1]);
        assert_invariants(&list);
    }

    #[rstest]
    fn test_prepend_opens_head_segment_when_full() {
        let mut list: SegmentedList<usize> = (1..=SEGMENT_SIZE).collect();
        list.prepend(0).unwrap();
        assert_eq!(list.segment_lengths(), vec![1, SEGMENT_SIZE]);
        assert_eq!(collect(&list), (0..=SEGMENT_SIZE).collect::<Vec<_>>());
        assert_invariants(&list);
    }

    #[rstest]
    fn test_get_after_prepend_uses_actual_segment_lengths() {
        let mut list: SegmentedList<usize> = (1..=SEGMENT_SIZE).collect();
        list.prepend(0).unwrap();
        for index in 0..=SEGMENT_SIZE {
            assert_eq!(list.get(index), Ok(&index));
        }
    }

    #[rstest]
    #[case(1)]
    #[case(HALF_SEGMENT - 1)]
    #[case(HALF_SEGMENT)]
    #[case(SEGMENT_SIZE - 1)]
    fn test_insert_into_full_segment_splits_once(#[case] index: usize) {
        let mut list: SegmentedList<usize> = (0..SEGMENT_SIZE).collect();
        list.insert(usize::MAX, index).unwrap();
        assert_eq!(list.segment_count(), 2);
        assert_eq!(list.get(index), Ok(&usize::MAX));
        for length in list.segment_lengths() {
            assert!((HALF_SEGMENT..=SEGMENT_SIZE).contains(&length));
        }
        assert_invariants(&list);
    }

    #[rstest]
    fn test_insert_on_boundary_lands_in_following_segment() {
        let mut list: SegmentedList<usize> = (0..=SEGMENT_SIZE).collect();
        list.insert(usize::MAX, SEGMENT_SIZE).unwrap();
        assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE, 2]);
        assert_eq!(list.get(SEGMENT_SIZE), Ok(&usize::MAX));
    }

    #[rstest]
    fn test_insert_past_length_fails() {
        let mut list: SegmentedList<usize> = (0..3).collect();
        assert_eq!(
            list.insert(9, 4),
            Err(SequenceError::out_of_range(4, 3))
        );
        assert_eq!(list.len(), 3);
    }

    #[rstest]
    fn test_remove_unlinks_empty_segment() {
        let mut list: SegmentedList<usize> = (1..=SEGMENT_SIZE).collect();
        list.prepend(0).unwrap();
        assert_eq!(list.remove(0), Ok(0));
        assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE]);
        assert_invariants(&list);
    }

    #[rstest]
    fn test_remove_merges_underfilled_segment() {
        let mut list: SegmentedList<usize> = (0..SEGMENT_SIZE).collect();
        list.insert(usize::MAX, HALF_SEGMENT).unwrap();
        assert_eq!(list.segment_lengths(), vec![HALF_SEGMENT, HALF_SEGMENT + 1]);
        list.remove(0).unwrap();
        // 15 + 17 fit in one segment
        assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE]);
        list.remove(0).unwrap();
        assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE - 1]);
        assert_invariants(&list);
    }

    #[rstest]
    fn test_remove_out_of_range() {
        let mut list: SegmentedList<usize> = SegmentedList::new();
        assert!(list.remove(0).is_err());
    }

    #[rstest]
    fn test_extend_tops_up_last_segment() {
        let mut list: SegmentedList<usize> = (0..10).collect();
        list.extend(10..40);
        assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE, 8]);
        assert_eq!(collect(&list), (0..40).collect::<Vec<_>>());
    }

    #[rstest]
    fn test_clone_preserves_layout_and_is_independent() {
        let mut original: SegmentedList<usize> = (0..SEGMENT_SIZE).collect();
        original.insert(0, 5).unwrap();
        let mut copy = original.clone();
        assert_eq!(copy.segment_lengths(), original.segment_lengths());
        copy.append(1).unwrap();
        assert_eq!(original.len(), SEGMENT_SIZE + 1);
        assert_eq!(copy.len(), SEGMENT_SIZE + 2);
    }

    #[rstest]
    fn test_long_chain_drops_without_recursion() {
        let list: SegmentedList<u8> = std::iter::repeat_n(0, SEGMENT_SIZE * 100_000).collect();
        assert_eq!(list.segment_count(), 100_000);
        drop(list);
    }
}
