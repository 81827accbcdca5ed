//! Sequences whose growth operations change the receiver.

use std::fmt;
use std::iter::FromIterator;

use super::{Sequence, build_storage};
use crate::error::SequenceResult;
use crate::storage::Storage;

/// A sequence that grows in place.
///
/// `append`, `prepend`, `insert_at` and `concat` modify `self` and return
/// `&mut Self`, so calls chain:
///
/// ```rust
/// use morphseq::sequence::{MutableListSequence, Sequence};
///
/// let mut sequence = MutableListSequence::new();
/// sequence.append(2).unwrap().prepend(1).unwrap().insert_at(3, 2).unwrap();
/// assert_eq!(sequence.reduce(Vec::new(), |mut all, value| {
///     all.push(*value);
///     all
/// }), vec![1, 2, 3]);
/// ```
///
/// Every other operator comes from [`Sequence`] and builds a new sequence.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct MutableSequence<S> {
    storage: S,
}

impl<S: Storage> MutableSequence<S> {
    /// Creates an empty sequence.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: S::default(),
        }
    }

    /// Adds `element` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the storage could not grow; the sequence is unchanged.
    pub fn append(&mut self, element: S::Element) -> SequenceResult<&mut Self> {
        self.storage.append(element)?;
        Ok(self)
    }

    /// Adds `element` at the front.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the storage could not grow; the sequence is unchanged.
    pub fn prepend(&mut self, element: S::Element) -> SequenceResult<&mut Self> {
        self.storage.prepend(element)?;
        Ok(self)
    }

    /// Inserts `element` so that it ends up at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`](crate::error::SequenceError::IndexOutOfRange)
    /// when `index > len`; the sequence is unchanged.
    pub fn insert_at(&mut self, element: S::Element, index: usize) -> SequenceResult<&mut Self> {
        self.storage.insert(element, index)?;
        Ok(self)
    }

    /// Consumes the sequence and returns its storage.
    #[inline]
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S> MutableSequence<S>
where
    S: Storage,
    S::Element: Clone,
{
    /// Appends copies of every element of `other`.
    ///
    /// The combined storage is built aside and swapped in, so a failure
    /// leaves the receiver unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the combined storage could not be built.
    pub fn concat<O>(&mut self, other: &O) -> SequenceResult<&mut Self>
    where
        O: Sequence<Element = S::Element>,
    {
        let combined = self.storage.iter().chain(other.storage().iter()).cloned();
        self.storage = build_storage(combined)?;
        Ok(self)
    }
}

impl<S: Storage> Sequence for MutableSequence<S> {
    type Element = S::Element;
    type Storage = S;
    type WithType<B> = MutableSequence<S::WithType<B>>;

    #[inline]
    fn from_storage(storage: S) -> Self {
        Self { storage }
    }

    #[inline]
    fn storage(&self) -> &S {
        &self.storage
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<S> FromIterator<S::Element> for MutableSequence<S>
where
    S: Storage + FromIterator<S::Element>,
{
    fn from_iter<I: IntoIterator<Item = S::Element>>(iter: I) -> Self {
        Self {
            storage: iter.into_iter().collect(),
        }
    }
}

impl<S> From<S> for MutableSequence<S>
where
    S: Storage,
{
    #[inline]
    fn from(storage: S) -> Self {
        Self { storage }
    }
}

impl<S> fmt::Debug for MutableSequence<S>
where
    S: Storage,
    S::Element: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.storage.iter()).finish()
    }
}
