//! Functional sequences over a fixed storage.
//!
//! A [`Sequence`] wraps one [`Storage`] and layers the functional operators
//! (`map`, `reduce`, `filter`, `zip`, `slice`, `split`, ...) on top of the
//! storage contract alone, so every operator works identically over every
//! storage.
//!
//! Two wrappers differ only in how the growth operations behave:
//!
//! - [`MutableSequence`]: `append`, `prepend`, `insert_at` and `concat`
//!   change the receiver and hand it back for chaining
//! - [`ImmutableSequence`]: the same operations return a fresh, independent
//!   sequence and leave the receiver untouched
//!
//! Type aliases name each wrapper/storage pairing, e.g.
//! [`MutableArraySequence`] or [`ImmutableListSequence`].
//!
//! # Examples
//!
//! ```rust
//! use morphseq::sequence::{ImmutableListSequence, MutableArraySequence, Sequence};
//!
//! let mut numbers: MutableArraySequence<i32> = [1, 2, 3].into_iter().collect();
//! numbers.append(4).unwrap().prepend(0).unwrap();
//! assert_eq!(numbers.reduce(0, |sum, value| sum + value), 10);
//!
//! let words: ImmutableListSequence<&str> = ["a", "b"].into_iter().collect();
//! let longer = words.append("c").unwrap();
//! assert_eq!(words.len(), 2);
//! assert_eq!(longer.len(), 3);
//! ```

use crate::error::{SequenceError, SequenceResult};
use crate::storage::{ContiguousArray, LinkedNodeList, SegmentedList, Storage, resolve_slice};

mod immutable;
mod mutable;

pub use immutable::ImmutableSequence;
pub use mutable::MutableSequence;

/// The functional operators shared by every sequence wrapper.
///
/// Implementors supply [`from_storage`](Sequence::from_storage) and
/// [`storage`](Sequence::storage); every other method has a default built on
/// the [`Storage`] contract.
///
/// Operators that produce a sequence always build a new one. Only the
/// wrapper-specific growth operations decide between mutating the receiver
/// and copying it.
pub trait Sequence: Sized {
    /// The type of the elements.
    type Element;

    /// The storage holding the elements.
    type Storage: Storage<Element = Self::Element>;

    /// The same wrapper and storage kind holding `B` instead.
    type WithType<B>: Sequence<Element = B>;

    /// Wraps an existing storage.
    fn from_storage(storage: Self::Storage) -> Self;

    /// Returns the wrapped storage.
    fn storage(&self) -> &Self::Storage;

    /// Returns the number of elements.
    #[inline]
    fn len(&self) -> usize {
        self.storage().len()
    }

    /// Returns `true` if there are no elements.
    #[inline]
    fn is_empty(&self) -> bool {
        self.storage().is_empty()
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= len`.
    #[inline]
    fn get(&self, index: usize) -> SequenceResult<&Self::Element> {
        self.storage().get(index)
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the sequence is empty.
    fn first(&self) -> SequenceResult<&Self::Element> {
        self.storage()
            .iter()
            .next()
            .ok_or_else(|| SequenceError::empty("first"))
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the sequence is empty.
    fn last(&self) -> SequenceResult<&Self::Element> {
        match self.len().checked_sub(1) {
            Some(index) => self.get(index),
            None => Err(SequenceError::empty("last")),
        }
    }

    /// Returns the element at `index`, or `None` when it is out of range.
    #[inline]
    fn try_get(&self, index: usize) -> Option<&Self::Element> {
        self.get(index).ok()
    }

    /// Returns the first element satisfying `predicate`.
    fn try_find<P>(&self, mut predicate: P) -> Option<&Self::Element>
    where
        P: FnMut(&Self::Element) -> bool,
    {
        self.storage().iter().find(|element| predicate(element))
    }

    /// Copies the elements in `[start, end)` into a new sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] unless `start <= end <= len`.
    fn sub_sequence(&self, start: usize, end: usize) -> SequenceResult<Self>
    where
        Self::Element: Clone,
    {
        let length = self.len();
        if end > length {
            return Err(SequenceError::out_of_range(end, length));
        }
        if start > end {
            return Err(SequenceError::out_of_range(start, end));
        }
        let elements = self.storage().iter().skip(start).take(end - start).cloned();
        Ok(Self::from_storage(build_storage(elements)?))
    }

    /// Applies `function` to every element, producing a sequence of the
    /// same kind over the results.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the result could not grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::sequence::{MutableListSequence, Sequence};
    ///
    /// let numbers: MutableListSequence<i32> = [1, 2, 3].into_iter().collect();
    /// let labels = numbers.map(|value| format!("#{value}")).unwrap();
    /// assert_eq!(labels.get(2).unwrap(), "#3");
    /// ```
    fn map<B, F>(&self, mut function: F) -> SequenceResult<Self::WithType<B>>
    where
        F: FnMut(&Self::Element) -> B,
    {
        let storage = build_storage(self.storage().iter().map(&mut function))?;
        Ok(<Self::WithType<B>>::from_storage(storage))
    }

    /// Folds every element into `initial` from first to last.
    fn reduce<A, F>(&self, initial: A, function: F) -> A
    where
        F: FnMut(A, &Self::Element) -> A,
    {
        self.storage().iter().fold(initial, function)
    }

    /// Keeps the elements satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the result could not grow.
    fn filter<P>(&self, mut predicate: P) -> SequenceResult<Self>
    where
        Self::Element: Clone,
        P: FnMut(&Self::Element) -> bool,
    {
        let elements = self
            .storage()
            .iter()
            .filter(|element| predicate(element))
            .cloned();
        Ok(Self::from_storage(build_storage(elements)?))
    }

    /// Combines elements pairwise with `other`, stopping at the shorter one.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the result could not grow.
    fn zip<O, V, F>(&self, other: &O, mut function: F) -> SequenceResult<Self::WithType<V>>
    where
        O: Sequence,
        F: FnMut(&Self::Element, &O::Element) -> V,
    {
        let pairs = self.storage().iter().zip(other.storage().iter());
        let storage = build_storage(pairs.map(|(left, right)| function(left, right)))?;
        Ok(<Self::WithType<V>>::from_storage(storage))
    }

    /// Returns a new sequence with `count` elements starting at `offset`
    /// replaced by the elements of `replacement`.
    ///
    /// A negative `offset` counts from the end, so `-1` names the last element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::SliceOutOfRange`] when the resolved offset is
    /// not a valid index or `offset + count` exceeds the length.
    fn slice(
        &self,
        offset: isize,
        count: usize,
        replacement: Option<&Self>,
    ) -> SequenceResult<Self>
    where
        Self::Element: Clone,
    {
        let start = resolve_slice(offset, count, self.len())?;
        let before = self.storage().iter().take(start);
        let inserted = replacement.into_iter().flat_map(|sequence| sequence.storage().iter());
        let after = self.storage().iter().skip(start + count);
        let elements = before.chain(inserted).chain(after).cloned();
        Ok(Self::from_storage(build_storage(elements)?))
    }

    /// Splits into the maximal runs of elements that do not satisfy `predicate`.
    ///
    /// Elements satisfying `predicate` are separators and are dropped, as
    /// are empty runs.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when a run could not grow.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::sequence::{ImmutableArraySequence, Sequence};
    ///
    /// let line: ImmutableArraySequence<char> = "ab,,c".chars().collect();
    /// let fields = line.split(|character| *character == ',').unwrap();
    /// assert_eq!(fields.len(), 2);
    /// assert_eq!(fields[1].first(), Ok(&'c'));
    /// ```
    fn split<P>(&self, mut predicate: P) -> SequenceResult<Vec<Self>>
    where
        Self::Element: Clone,
        P: FnMut(&Self::Element) -> bool,
    {
        let mut runs = Vec::new();
        let mut current = Self::Storage::default();
        for element in self.storage().iter() {
            if predicate(element) {
                if !current.is_empty() {
                    runs.push(Self::from_storage(std::mem::take(&mut current)));
                }
            } else {
                current.append(element.clone())?;
            }
        }
        if !current.is_empty() {
            runs.push(Self::from_storage(current));
        }
        Ok(runs)
    }
}

/// Fills a default storage from `elements` through the storage contract.
pub(crate) fn build_storage<S, I>(elements: I) -> SequenceResult<S>
where
    S: Storage,
    I: IntoIterator<Item = S::Element>,
{
    let mut storage = S::default();
    for element in elements {
        storage.append(element)?;
    }
    Ok(storage)
}

macro_rules! sequence_aliases {
    ($($backend:ident => $storage:ident),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "A [`MutableSequence`] backed by a [`" $storage "`]."]
                pub type [<Mutable $backend Sequence>]<T> = MutableSequence<$storage<T>>;

                #[doc = "An [`ImmutableSequence`] backed by a [`" $storage "`]."]
                pub type [<Immutable $backend Sequence>]<T> = ImmutableSequence<$storage<T>>;
            )*
        }
    };
}

sequence_aliases! {
    Array => ContiguousArray,
    List => LinkedNodeList,
    Segmented => SegmentedList,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn numbers() -> MutableArraySequence<i32> {
        (1..=6).collect()
    }

    #[rstest]
    fn test_first_and_last_on_empty() {
        let empty: ImmutableListSequence<i32> = ImmutableSequence::new();
        assert_eq!(empty.first(), Err(SequenceError::empty("first")));
        assert_eq!(empty.last(), Err(SequenceError::empty("last")));
    }

    #[rstest]
    fn test_map_changes_element_type() {
        let lengths = numbers().map(|value| value.to_string().len()).unwrap();
        assert_eq!(lengths.storage().as_slice(), &[1, 1, 1, 1, 1, 1]);
    }

    #[rstest]
    fn test_filter_honours_predicate() {
        let evens = numbers().filter(|value| value % 2 == 0).unwrap();
        assert_eq!(evens.storage().as_slice(), &[2, 4, 6]);
    }

    #[rstest]
    fn test_zip_across_storages() {
        let words: ImmutableListSequence<&str> = ["one", "two"].into_iter().collect();
        let pairs = numbers().zip(&words, |number, word| format!("{number}:{word}")).unwrap();
        assert_eq!(pairs.storage().as_slice(), &["1:one", "2:two"]);
    }

    #[rstest]
    #[case(0, 6, vec![])]
    #[case(-3, 2, vec![1, 2, 3, 6])]
    #[case(2, 0, vec![1, 2, 3, 4, 5, 6])]
    fn test_slice_without_replacement(
        #[case] offset: isize,
        #[case] count: usize,
        #[case] expected: Vec<i32>,
    ) {
        let sliced = numbers().slice(offset, count, None).unwrap();
        assert_eq!(sliced.storage().as_slice(), expected.as_slice());
    }

    #[rstest]
    fn test_slice_with_replacement() {
        let replacement: MutableArraySequence<i32> = [0, 0].into_iter().collect();
        let sliced = numbers().slice(1, 3, Some(&replacement)).unwrap();
        assert_eq!(sliced.storage().as_slice(), &[1, 0, 0, 5, 6]);
    }

    #[rstest]
    fn test_split_drops_separators_and_empty_runs() {
        let sequence: MutableSegmentedSequence<i32> = [0, 1, 0, 0, 2, 3].into_iter().collect();
        let runs = sequence.split(|value| *value == 0).unwrap();
        let runs: Vec<Vec<i32>> = runs
            .iter()
            .map(|run| run.storage().iter().copied().collect())
            .collect();
        assert_eq!(runs, vec![vec![1], vec![2, 3]]);
    }

    #[rstest]
    fn test_sub_sequence_bounds() {
        let sequence = numbers();
        assert_eq!(sequence.sub_sequence(1, 3).unwrap().storage().as_slice(), &[2, 3]);
        assert!(sequence.sub_sequence(0, 7).is_err());
        assert!(sequence.sub_sequence(4, 3).is_err());
        assert!(sequence.sub_sequence(6, 6).unwrap().is_empty());
    }

    #[rstest]
    fn test_try_find_and_try_get() {
        let sequence = numbers();
        assert_eq!(sequence.try_find(|value| *value > 4), Some(&5));
        assert_eq!(sequence.try_find(|value| *value > 6), None);
        assert_eq!(sequence.try_get(0), Some(&1));
        assert_eq!(sequence.try_get(6), None);
    }
}
