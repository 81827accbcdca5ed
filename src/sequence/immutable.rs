//! Sequences whose growth operations return a new sequence.

use std::fmt;
use std::iter::FromIterator;

use super::{Sequence, build_storage};
use crate::error::SequenceResult;
use crate::storage::Storage;

/// A sequence that never changes after construction.
///
/// `append`, `prepend`, `insert_at` and `concat` return a deep copy with the
/// change applied; the receiver keeps its elements.
///
/// # Examples
///
/// ```rust
/// use morphseq::sequence::{ImmutableSegmentedSequence, Sequence};
///
/// let base: ImmutableSegmentedSequence<i32> = (1..=3).collect();
/// let extended = base.prepend(0).unwrap().append(4).unwrap();
///
/// assert_eq!(base.len(), 3);
/// assert_eq!(extended.len(), 5);
/// assert_eq!(extended.first(), Ok(&0));
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ImmutableSequence<S> {
    storage: S,
}

impl<S: Storage> ImmutableSequence<S> {
    /// Creates an empty sequence.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: S::default(),
        }
    }

    /// Consumes the sequence and returns its storage.
    #[inline]
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S> ImmutableSequence<S>
where
    S: Storage,
    S::Element: Clone,
{
    fn copy_storage(&self) -> SequenceResult<S> {
        build_storage(self.storage.iter().cloned())
    }

    /// Returns a copy with `element` added at the end.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the copy could not be built.
    pub fn append(&self, element: S::Element) -> SequenceResult<Self> {
        let mut storage = self.copy_storage()?;
        storage.append(element)?;
        Ok(Self { storage })
    }

    /// Returns a copy with `element` added at the front.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the copy could not be built.
    pub fn prepend(&self, element: S::Element) -> SequenceResult<Self> {
        let mut storage = self.copy_storage()?;
        storage.prepend(element)?;
        Ok(Self { storage })
    }

    /// Returns a copy with `element` inserted at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`](crate::error::SequenceError::IndexOutOfRange)
    /// when `index > len`.
    pub fn insert_at(&self, element: S::Element, index: usize) -> SequenceResult<Self> {
        let mut storage = self.copy_storage()?;
        storage.insert(element, index)?;
        Ok(Self { storage })
    }

    /// Returns a new sequence holding the elements of `self` followed by
    /// those of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the result could not be built.
    pub fn concat<O>(&self, other: &O) -> SequenceResult<Self>
    where
        O: Sequence<Element = S::Element>,
    {
        let combined = self.storage.iter().chain(other.storage().iter()).cloned();
        Ok(Self {
            storage: build_storage(combined)?,
        })
    }
}

impl<S: Storage> Sequence for ImmutableSequence<S> {
    type Element = S::Element;
    type Storage = S;
    type WithType<B> = ImmutableSequence<S::WithType<B>>;

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

impl<S> FromIterator<S::Element> for ImmutableSequence<S>
where
    S: Storage + FromIterator<S::Element>,
{
    fn from_iter<I: IntoIterator<Item = S::Element>>(iter: I) -> Self {
        Self {
            storage: iter.into_iter().collect(),
        }
    }
}

impl<S> From<S> for ImmutableSequence<S>
where
    S: Storage,
{
    #[inline]
    fn from(storage: S) -> Self {
        Self { storage }
    }
}

impl<S> fmt::Debug for ImmutableSequence<S>
where
    S: Storage,
    S::Element: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.storage.iter()).finish()
    }
}
