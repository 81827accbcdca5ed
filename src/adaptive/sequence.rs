//! A sequence that migrates between array and list storage.
//!
//! [`AdaptiveSequence`] holds exactly one [`Backing`] at a time. Every counted
//! read or insertion feeds [`AccessCounters`]; after each one the pure
//! [`next_representation`] decides whether the elements should move to the
//! other storage.

use std::fmt;
use std::iter::FromIterator;

use super::policy::{
    AccessCounters, AccessSignal, AdaptiveConfig, Representation, next_representation,
};
use crate::error::{SequenceError, SequenceResult};
use crate::storage::{
    ContiguousArray, LinkedNodeList, LinkedNodeListIntoIterator, LinkedNodeListIterator, Storage,
    StorageKind, resolve_slice,
};

// =============================================================================
// Backing
// =============================================================================

/// The closed set of storages an [`AdaptiveSequence`] can hold.
///
/// `Backing` is itself a [`Storage`], so code written against the contract
/// works unchanged whichever variant is active.
#[derive(Clone, PartialEq, Eq)]
pub enum Backing<T> {
    /// Contiguous storage with O(1) indexed access.
    Array(ContiguousArray<T>),
    /// Linked storage with O(1) append and prepend.
    List(LinkedNodeList<T>),
}

impl<T> Backing<T> {
    /// Creates an empty backing of the given representation.
    #[must_use]
    pub const fn empty(representation: Representation) -> Self {
        match representation {
            Representation::Array => Self::Array(ContiguousArray::new()),
            Representation::List => Self::List(LinkedNodeList::new()),
        }
    }

    /// Creates an empty backing with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the reservation fails.
    pub fn try_with_capacity(
        representation: Representation,
        capacity: usize,
    ) -> SequenceResult<Self> {
        Ok(match representation {
            Representation::Array => Self::Array(ContiguousArray::try_with_capacity(capacity)?),
            Representation::List => Self::List(LinkedNodeList::try_with_capacity(capacity)?),
        })
    }

    /// Returns which representation is active.
    #[must_use]
    pub const fn representation(&self) -> Representation {
        match self {
            Self::Array(_) => Representation::Array,
            Self::List(_) => Representation::List,
        }
    }

    /// Returns the storage kind of the active variant.
    #[must_use]
    pub const fn kind(&self) -> StorageKind {
        match self {
            Self::Array(_) => StorageKind::Array,
            Self::List(_) => StorageKind::List,
        }
    }

    /// Returns the number of stored elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        match self {
            Self::Array(array) => array.len(),
            Self::List(list) => list.len(),
        }
    }

    /// Returns `true` if no elements are stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= len`.
    pub fn get(&self, index: usize) -> SequenceResult<&T> {
        match self {
            Self::Array(array) => array.get(index),
            Self::List(list) => list.get(index),
        }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> SequenceResult<&mut T> {
        match self {
            Self::Array(array) => array.get_mut(index),
            Self::List(list) => list.get_mut(index),
        }
    }

    /// Adds `element` at the end.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the storage could not grow.
    pub fn append(&mut self, element: T) -> SequenceResult<()> {
        match self {
            Self::Array(array) => array.append(element),
            Self::List(list) => list.append(element),
        }
    }

    /// Adds `element` at the front.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the storage could not grow.
    pub fn prepend(&mut self, element: T) -> SequenceResult<()> {
        match self {
            Self::Array(array) => array.prepend(element),
            Self::List(list) => list.prepend(element),
        }
    }

    /// Inserts `element` at position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index > len`.
    pub fn insert(&mut self, element: T, index: usize) -> SequenceResult<()> {
        match self {
            Self::Array(array) => array.insert(element, index),
            Self::List(list) => list.insert(element, index),
        }
    }

    /// Returns an iterator over the elements in order.
    #[must_use]
    pub fn iter(&self) -> BackingIterator<'_, T> {
        match self {
            Self::Array(array) => BackingIterator::Array(array.iter()),
            Self::List(list) => BackingIterator::List(list.iter()),
        }
    }
}

impl<T> Storage for Backing<T> {
    type Element = T;
    type WithType<B> = Backing<B>;

    /// A default backing starts as an array; use [`Backing::kind`] for the
    /// variant that is active now.
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
        Self::iter(self)
    }
}

impl<T> Default for Backing<T> {
    fn default() -> Self {
        Self::empty(Representation::Array)
    }
}

impl<T> Extend<T> for Backing<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        match self {
            Self::Array(array) => array.extend(iter),
            Self::List(list) => list.extend(iter),
        }
    }
}

impl<T> IntoIterator for Backing<T> {
    type Item = T;
    type IntoIter = BackingIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::Array(array) => BackingIntoIterator::Array(array.into_iter()),
            Self::List(list) => BackingIntoIterator::List(list.into_iter()),
        }
    }
}

impl<'a, T> IntoIterator for &'a Backing<T> {
    type Item = &'a T;
    type IntoIter = BackingIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug> fmt::Debug for Backing<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Array(array) => formatter.debug_tuple("Array").field(array).finish(),
            Self::List(list) => formatter.debug_tuple("List").field(list).finish(),
        }
    }
}

/// An iterator over references to the elements of a [`Backing`].
pub enum BackingIterator<'a, T> {
    /// Iterating an array backing.
    Array(std::slice::Iter<'a, T>),
    /// Iterating a list backing.
    List(LinkedNodeListIterator<'a, T>),
}

impl<'a, T> Iterator for BackingIterator<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Array(iterator) => iterator.next(),
            Self::List(iterator) => iterator.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Array(iterator) => iterator.size_hint(),
            Self::List(iterator) => iterator.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for BackingIterator<'_, T> {}

/// An owning iterator over the elements of a [`Backing`].
pub enum BackingIntoIterator<T> {
    /// Draining an array backing.
    Array(std::vec::IntoIter<T>),
    /// Draining a list backing.
    List(LinkedNodeListIntoIterator<T>),
}

impl<T> Iterator for BackingIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Array(iterator) => iterator.next(),
            Self::List(iterator) => iterator.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Array(iterator) => iterator.size_hint(),
            Self::List(iterator) => iterator.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for BackingIntoIterator<T> {}

// =============================================================================
// AdaptiveSequence
// =============================================================================

/// A sequence that moves its elements between array and list storage
/// according to how it is used.
///
/// Reads (`get`, `at`, `first`, `last`, and every read a functional operator
/// makes) count as random access; `append`, `prepend` and `insert` count as
/// insertions. A list-backed sequence switches to an array once reads exceed
/// the configured threshold, and an array-backed one switches to a list once
/// insertions do. Each switch resets both counters.
///
/// Operations that fail leave the elements, the representation and the
/// counters untouched.
///
/// # Time Complexity
///
/// | Operation | Array state    | List state |
/// |-----------|----------------|------------|
/// | `get`     | O(1)           | O(i)       |
/// | `at`      | O(1)           | error      |
/// | `append`  | O(1) amortized | O(1)       |
/// | `prepend` | O(n)           | O(1)       |
/// | `insert`  | O(n)           | O(i)       |
/// | switch    | O(n)           | O(n)       |
///
/// # Examples
///
/// ```rust
/// use morphseq::adaptive::{AdaptiveConfig, AdaptiveSequence};
///
/// let config = AdaptiveConfig::default().with_operation_threshold(3);
/// let mut sequence = AdaptiveSequence::from_batch_with_config([1, 2, 3, 4, 5], config);
/// assert!(sequence.is_list());
///
/// for _ in 0..4 {
///     assert_eq!(sequence.get(0), Ok(&1));
/// }
/// assert!(sequence.is_array());
/// assert_eq!(sequence.counters().random_access, 0);
/// ```
#[derive(Clone)]
pub struct AdaptiveSequence<T> {
    backing: Backing<T>,
    counters: AccessCounters,
    config: AdaptiveConfig,
}

impl<T> AdaptiveSequence<T> {
    /// Creates an empty, array-backed sequence with the default configuration.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(AdaptiveConfig::new())
    }

    /// Creates an empty, array-backed sequence with `config`.
    #[inline]
    #[must_use]
    pub const fn with_config(config: AdaptiveConfig) -> Self {
        Self {
            backing: Backing::empty(Representation::Array),
            counters: AccessCounters {
                random_access: 0,
                insertion: 0,
            },
            config,
        }
    }

    /// Creates a sequence from an initial batch with the default configuration.
    ///
    /// Batches of more than 100 elements start array-backed, smaller ones
    /// start list-backed.
    #[must_use]
    pub fn from_batch<I: IntoIterator<Item = T>>(batch: I) -> Self {
        Self::from_batch_with_config(batch, AdaptiveConfig::new())
    }

    /// Creates a sequence from an initial batch with `config`.
    ///
    /// Batches of more than `config.array_batch_threshold` elements start
    /// array-backed, smaller ones start list-backed.
    #[must_use]
    pub fn from_batch_with_config<I: IntoIterator<Item = T>>(
        batch: I,
        config: AdaptiveConfig,
    ) -> Self {
        let elements: Vec<T> = batch.into_iter().collect();
        let backing = match config.initial_representation(elements.len()) {
            Representation::Array => Backing::Array(ContiguousArray::from(elements)),
            Representation::List => Backing::List(elements.into_iter().collect()),
        };
        Self {
            backing,
            counters: AccessCounters::default(),
            config,
        }
    }

    // -------------------------------------------------------------------------
    // Uncounted inspection
    // -------------------------------------------------------------------------

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.backing.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.backing.is_empty()
    }

    /// Returns the active representation.
    #[inline]
    #[must_use]
    pub const fn representation(&self) -> Representation {
        self.backing.representation()
    }

    /// Returns `true` while array-backed.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self.backing, Backing::Array(_))
    }

    /// Returns `true` while list-backed.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self.backing, Backing::List(_))
    }

    /// Returns the counters accumulated since the last switch.
    #[inline]
    #[must_use]
    pub const fn counters(&self) -> AccessCounters {
        self.counters
    }

    /// Returns the current configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> AdaptiveConfig {
        self.config
    }

    /// Returns the active backing.
    #[inline]
    #[must_use]
    pub const fn backing(&self) -> &Backing<T> {
        &self.backing
    }

    /// Returns an iterator over the elements without touching the counters.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> BackingIterator<'_, T> {
        self.backing.iter()
    }

    // -------------------------------------------------------------------------
    // Counted primitives
    // -------------------------------------------------------------------------

    /// Returns a reference to the element at `index`, counting one random access.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= len`; the
    /// counters are not touched in that case.
    pub fn get(&mut self, index: usize) -> SequenceResult<&T> {
        let length = self.len();
        if index >= length {
            return Err(SequenceError::out_of_range(index, length));
        }
        self.record(AccessSignal::RandomAccess);
        self.backing.get(index)
    }

    /// The indexing operator: like [`get`](Self::get), but only while array-backed.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::Unsupported`] while list-backed.
    /// - [`SequenceError::IndexOutOfRange`] when `index >= len`.
    pub fn at(&mut self, index: usize) -> SequenceResult<&T> {
        self.check_indexable("at")?;
        self.get(index)
    }

    /// Mutable indexing: only while array-backed, counted as a random access.
    ///
    /// # Errors
    ///
    /// - [`SequenceError::Unsupported`] while list-backed.
    /// - [`SequenceError::IndexOutOfRange`] when `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> SequenceResult<&mut T> {
        self.check_indexable("at_mut")?;
        let length = self.len();
        if index >= length {
            return Err(SequenceError::out_of_range(index, length));
        }
        self.record(AccessSignal::RandomAccess);
        self.backing.get_mut(index)
    }

    /// Returns the first element, counting one random access.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the sequence is empty.
    pub fn first(&mut self) -> SequenceResult<&T> {
        if self.is_empty() {
            return Err(SequenceError::empty("first"));
        }
        self.get(0)
    }

    /// Returns the last element, counting one random access.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the sequence is empty.
    pub fn last(&mut self) -> SequenceResult<&T> {
        match self.len().checked_sub(1) {
            Some(index) => self.get(index),
            None => Err(SequenceError::empty("last")),
        }
    }

    /// Adds `element` at the end, counting one insertion.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the storage could not grow.
    pub fn append(&mut self, element: T) -> SequenceResult<&mut Self> {
        self.backing.append(element)?;
        self.record(AccessSignal::Insertion);
        Ok(self)
    }

    /// Adds `element` at the front, counting one insertion.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the storage could not grow.
    pub fn prepend(&mut self, element: T) -> SequenceResult<&mut Self> {
        self.backing.prepend(element)?;
        self.record(AccessSignal::Insertion);
        Ok(self)
    }

    /// Inserts `element` at `index`, counting one insertion.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index > len`.
    pub fn insert(&mut self, element: T, index: usize) -> SequenceResult<&mut Self> {
        self.backing.insert(element, index)?;
        self.record(AccessSignal::Insertion);
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Migration
    // -------------------------------------------------------------------------

    /// Moves every element into a fresh storage of `target`, in order.
    ///
    /// The target storage is reserved in full before anything moves, so an
    /// allocation failure leaves the sequence exactly as it was. Migrating to
    /// the active representation does nothing. A completed switch resets both
    /// counters.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the target storage
    /// could not be reserved.
    pub fn migrate(&mut self, target: Representation) -> SequenceResult<()> {
        let source = self.representation();
        if source == target {
            return Ok(());
        }
        let length = self.len();
        let mut replacement = Backing::try_with_capacity(target, length)?;
        replacement.extend(std::mem::take(&mut self.backing));
        self.backing = replacement;
        self.counters.reset();
        tracing::debug!(from = %source, to = %target, length, "switched representation");
        Ok(())
    }

    /// Forces an immediate switch to array storage.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the array could not be reserved.
    pub fn optimize_for_random_access(&mut self) -> SequenceResult<()> {
        tracing::trace!(current = %self.representation(), "optimize for random access");
        self.migrate(Representation::Array)
    }

    /// Forces an immediate switch to list storage.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the list could not be reserved.
    pub fn optimize_for_insertions(&mut self) -> SequenceResult<()> {
        tracing::trace!(current = %self.representation(), "optimize for insertions");
        self.migrate(Representation::List)
    }

    /// Changes how many homogeneous operations are tolerated before a switch.
    ///
    /// The new threshold is applied from the next counted operation on.
    pub const fn set_operation_threshold(&mut self, threshold: usize) {
        self.config.operation_threshold = threshold;
    }

    fn check_indexable(&self, operation: &'static str) -> SequenceResult<()> {
        if self.is_list() {
            return Err(SequenceError::Unsupported {
                operation,
                representation: Representation::List.name(),
            });
        }
        Ok(())
    }

    fn record(&mut self, signal: AccessSignal) {
        self.counters.record(signal);
        let current = self.representation();
        let target = next_representation(current, self.counters, self.config.operation_threshold);
        if target != current
            && let Err(error) = self.migrate(target)
        {
            tracing::warn!(
                %error,
                from = %current,
                to = %target,
                "representation switch failed, keeping current storage"
            );
        }
    }

    // -------------------------------------------------------------------------
    // Functional operators
    // -------------------------------------------------------------------------

    /// Folds every element into `initial` from first to last.
    ///
    /// # Errors
    ///
    /// Propagates failures of the counted reads.
    pub fn reduce<A, F>(&mut self, initial: A, mut function: F) -> SequenceResult<A>
    where
        F: FnMut(A, &T) -> A,
    {
        let mut accumulator = initial;
        for index in 0..self.len() {
            accumulator = function(accumulator, self.get(index)?);
        }
        Ok(accumulator)
    }

    /// Builds a new sequence holding `function` applied to every element.
    ///
    /// # Errors
    ///
    /// Propagates failures of the counted reads and appends.
    pub fn map<U, F>(&mut self, mut function: F) -> SequenceResult<AdaptiveSequence<U>>
    where
        F: FnMut(&T) -> U,
    {
        let mut result = AdaptiveSequence::with_config(self.config);
        for index in 0..self.len() {
            let value = function(self.get(index)?);
            result.append(value)?;
        }
        Ok(result)
    }

    /// Combines elements pairwise with `other`, stopping at the shorter one.
    ///
    /// Reads on both operands are counted.
    ///
    /// # Errors
    ///
    /// Propagates failures of the counted reads and appends.
    pub fn zip<U, V, F>(
        &mut self,
        other: &mut AdaptiveSequence<U>,
        mut function: F,
    ) -> SequenceResult<AdaptiveSequence<V>>
    where
        F: FnMut(&T, &U) -> V,
    {
        let mut result = AdaptiveSequence::with_config(self.config);
        for index in 0..self.len().min(other.len()) {
            let value = function(self.get(index)?, other.get(index)?);
            result.append(value)?;
        }
        Ok(result)
    }

    /// Returns the element at `index`, or `None` when it is out of range.
    pub fn try_get(&mut self, index: usize) -> Option<&T> {
        self.get(index).ok()
    }

    /// Returns the first element satisfying `predicate`.
    pub fn try_find<P>(&mut self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut found = None;
        for index in 0..self.len() {
            if predicate(self.get(index).ok()?) {
                found = Some(index);
                break;
            }
        }
        self.backing.get(found?).ok()
    }
}

impl<T: Clone> AdaptiveSequence<T> {
    /// Builds a new sequence holding the elements that satisfy `predicate`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the counted reads and appends.
    pub fn filter<P>(&mut self, mut predicate: P) -> SequenceResult<Self>
    where
        P: FnMut(&T) -> bool,
    {
        let mut result = Self::with_config(self.config);
        for index in 0..self.len() {
            let element = self.get(index)?;
            if predicate(element) {
                let element = element.clone();
                result.append(element)?;
            }
        }
        Ok(result)
    }

    /// Builds a new sequence with the elements of `self` followed by those of `other`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the counted reads and appends.
    pub fn concat(&mut self, other: &mut Self) -> SequenceResult<Self> {
        let (length, other_length) = (self.len(), other.len());
        let mut result = Self::with_config(self.config);
        self.append_range_to(&mut result, 0, length)?;
        other.append_range_to(&mut result, 0, other_length)?;
        Ok(result)
    }

    /// Copies the elements in `[start, end)` into a new sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] unless `start <= end <= len`.
    pub fn sub_sequence(&mut self, start: usize, end: usize) -> SequenceResult<Self> {
        let length = self.len();
        if end > length {
            return Err(SequenceError::out_of_range(end, length));
        }
        if start > end {
            return Err(SequenceError::out_of_range(start, end));
        }
        let mut result = Self::with_config(self.config);
        self.append_range_to(&mut result, start, end)?;
        Ok(result)
    }

    /// Builds a new sequence with `count` elements starting at `offset`
    /// replaced by the contents of `replacement`.
    ///
    /// A negative `offset` counts from the end.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::SliceOutOfRange`] when the resolved offset is
    /// not a valid index or `offset + count` exceeds the length.
    pub fn slice(
        &mut self,
        offset: isize,
        count: usize,
        replacement: Option<&mut Self>,
    ) -> SequenceResult<Self> {
        let length = self.len();
        let start = resolve_slice(offset, count, length)?;
        let mut result = Self::with_config(self.config);
        self.append_range_to(&mut result, 0, start)?;
        if let Some(replacement) = replacement {
            let replacement_length = replacement.len();
            replacement.append_range_to(&mut result, 0, replacement_length)?;
        }
        self.append_range_to(&mut result, start + count, length)?;
        Ok(result)
    }

    /// Splits the sequence into the maximal runs of elements that do not
    /// satisfy `predicate`.
    ///
    /// Elements satisfying `predicate` act as separators and are dropped,
    /// as are empty runs.
    ///
    /// # Errors
    ///
    /// Propagates failures of the counted reads and appends.
    pub fn split<P>(&mut self, mut predicate: P) -> SequenceResult<Vec<Self>>
    where
        P: FnMut(&T) -> bool,
    {
        let config = self.config;
        let mut runs = Vec::new();
        let mut current = Self::with_config(config);
        for index in 0..self.len() {
            let element = self.get(index)?;
            if predicate(element) {
                if !current.is_empty() {
                    runs.push(std::mem::replace(&mut current, Self::with_config(config)));
                }
            } else {
                let element = element.clone();
                current.append(element)?;
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        Ok(runs)
    }

    fn append_range_to(
        &mut self,
        target: &mut Self,
        start: usize,
        end: usize,
    ) -> SequenceResult<()> {
        for index in start..end {
            let element = self.get(index)?.clone();
            target.append(element)?;
        }
        Ok(())
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for AdaptiveSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for AdaptiveSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_batch(iter)
    }
}

impl<T> IntoIterator for AdaptiveSequence<T> {
    type Item = T;
    type IntoIter = BackingIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.backing.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a AdaptiveSequence<T> {
    type Item = &'a T;
    type IntoIter = BackingIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sequences are equal when they hold equal elements in the same order,
/// whatever their representations or counters.
impl<T: PartialEq> PartialEq for AdaptiveSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AdaptiveSequence<T> {}

impl<T: fmt::Debug> fmt::Debug for AdaptiveSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AdaptiveSequence")
            .field("representation", &self.representation())
            .field("elements", &self.backing)
            .field("counters", &self.counters)
            .finish()
    }
}

static_assertions::assert_impl_all!(AdaptiveSequence<i32>: Clone, Send, Sync, Default);
static_assertions::assert_impl_all!(Backing<i32>: Storage, Clone, Send, Sync);

// =============================================================================
// Tests
// =============================================================================
