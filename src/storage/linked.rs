//! Singly-linked node list with head and tail tracking.
//!
//! [`LinkedNodeList`] stores every node in an owned arena and links them by
//! arena index. The list is the single owner of all of its nodes, `tail` is a
//! real O(1) handle to the last node, and dropping or cloning the list never
//! recurses through the chain.
//!
//! The arena order is an allocation detail: prepends and middle insertions
//! push new nodes to the end of the arena, while the logical order is always
//! the link order starting at `head`.
//!
//! ```text
//! arena:  [0: 10 -> 2] [1: 30 -> nil] [2: 20 -> 1]
//! head = 0, tail = 1  =>  10, 20, 30
//! ```
//!
//! # Examples
//!
//! ```rust
//! use morphseq::storage::LinkedNodeList;
//!
//! let mut list: LinkedNodeList<i32> = [10, 20, 30].into_iter().collect();
//! list.insert(99, 1).unwrap();
//!
//! let collected: Vec<i32> = list.iter().copied().collect();
//! assert_eq!(collected, vec![10, 99, 20, 30]);
//! assert_eq!(list.len(), 4);
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;

use super::{Storage, StorageKind};
use crate::error::{SequenceError, SequenceResult};

/// Arena slot holding one element and the index of its successor.
struct Node<T> {
    /// The element stored in this node.
    element: T,
    /// Arena index of the next node (if any).
    next: Option<usize>,
}

/// A singly-linked list with O(1) append and prepend.
///
/// # Time Complexity
///
/// | Operation  | Complexity |
/// |------------|------------|
/// | `first`    | O(1)       |
/// | `last`     | O(1)       |
/// | `append`   | O(1)*      |
/// | `prepend`  | O(1)*      |
/// | `get`      | O(i)       |
/// | `insert`   | O(i)       |
/// | `sub_list` | O(end)     |
/// | `concat`   | O(n + m)   |
///
/// \* amortized over arena growth
pub struct LinkedNodeList<T> {
    /// Node storage, in allocation order.
    nodes: Vec<Node<T>>,
    /// Arena index of the first node.
    head: Option<usize>,
    /// Arena index of the last node.
    tail: Option<usize>,
}

impl<T> LinkedNodeList<T> {
    /// Creates a new empty list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::LinkedNodeList;
    ///
    /// let list: LinkedNodeList<i32> = LinkedNodeList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list whose arena has room for `capacity` nodes,
    /// reporting allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the arena cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> SequenceResult<Self> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;
        Ok(Self {
            nodes,
            head: None,
            tail: None,
        })
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the list is empty.
    pub fn first(&self) -> SequenceResult<&T> {
        self.head
            .and_then(|index| self.nodes.get(index))
            .map(|node| &node.element)
            .ok_or(SequenceError::empty("first"))
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::EmptyContainer`] when the list is empty.
    pub fn last(&self) -> SequenceResult<&T> {
        self.tail
            .and_then(|index| self.nodes.get(index))
            .map(|node| &node.element)
            .ok_or(SequenceError::empty("last"))
    }

    /// Walks `steps` links from `head` and returns the arena index reached.
    fn node_index(&self, steps: usize) -> SequenceResult<usize> {
        let mut current = self.head;
        for _ in 0..steps {
            current = current.and_then(|index| self.nodes.get(index)).and_then(|node| node.next);
        }
        current.ok_or(SequenceError::out_of_range(steps, self.len()))
    }

    /// Returns a reference to the element at `index`, walking from the head.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(index)
    pub fn get(&self, index: usize) -> SequenceResult<&T> {
        if index >= self.len() {
            return Err(SequenceError::out_of_range(index, self.len()));
        }
        let arena_index = self.node_index(index)?;
        self.nodes
            .get(arena_index)
            .map(|node| &node.element)
            .ok_or(SequenceError::out_of_range(index, self.len()))
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index >= self.len()`.
    pub fn get_mut(&mut self, index: usize) -> SequenceResult<&mut T> {
        if index >= self.len() {
            return Err(SequenceError::out_of_range(index, self.len()));
        }
        let length = self.len();
        let arena_index = self.node_index(index)?;
        self.nodes
            .get_mut(arena_index)
            .map(|node| &mut node.element)
            .ok_or(SequenceError::out_of_range(index, length))
    }

    /// Pushes a detached node into the arena and returns its index.
    fn allocate(&mut self, element: T, next: Option<usize>) -> SequenceResult<usize> {
        self.nodes.try_reserve(1)?;
        self.nodes.push(Node { element, next });
        Ok(self.nodes.len() - 1)
    }

    /// Adds `element` after the last node.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the arena cannot grow.
    pub fn append(&mut self, element: T) -> SequenceResult<()> {
        let index = self.allocate(element, None)?;
        match self.tail.and_then(|tail| self.nodes.get_mut(tail)) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        Ok(())
    }

    /// Adds `element` before the first node.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the arena cannot grow.
    pub fn prepend(&mut self, element: T) -> SequenceResult<()> {
        let index = self.allocate(element, self.head)?;
        self.head = Some(index);
        if self.tail.is_none() {
            self.tail = Some(index);
        }
        Ok(())
    }

    /// Inserts `element` so that it becomes the element at `index`.
    ///
    /// `index == 0` prepends and `index == self.len()` appends; any other
    /// position splices a new node after the `(index - 1)`-th node.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] when `index > self.len()`.
    ///
    /// # Complexity
    ///
    /// O(index)
    pub fn insert(&mut self, element: T, index: usize) -> SequenceResult<()> {
        if index > self.len() {
            return Err(SequenceError::out_of_range(index, self.len()));
        }
        if index == 0 {
            return self.prepend(element);
        }
        if index == self.len() {
            return self.append(element);
        }

        let length = self.len();
        let predecessor = self.node_index(index - 1)?;
        let successor = self
            .nodes
            .get(predecessor)
            .map(|node| node.next)
            .ok_or(SequenceError::out_of_range(index, length))?;
        let inserted = self.allocate(element, successor)?;
        if let Some(node) = self.nodes.get_mut(predecessor) {
            node.next = Some(inserted);
        }
        Ok(())
    }

    /// Returns an iterator over references to the elements in logical order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> LinkedNodeListIterator<'_, T> {
        LinkedNodeListIterator {
            nodes: &self.nodes,
            current: self.head,
            remaining: self.nodes.len(),
        }
    }
}

impl<T: Clone> LinkedNodeList<T> {
    /// Returns a new list holding copies of the elements in `[start, end)`.
    ///
    /// The result owns its own nodes and shares nothing with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`] unless `start <= end <= self.len()`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use morphseq::storage::LinkedNodeList;
    ///
    /// let list: LinkedNodeList<i32> = (1..=5).collect();
    /// let sub = list.sub_list(1, 3).unwrap();
    /// assert_eq!(sub.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    /// ```
    pub fn sub_list(&self, start: usize, end: usize) -> SequenceResult<Self> {
        if end > self.len() {
            return Err(SequenceError::out_of_range(end, self.len()));
        }
        if start > end {
            return Err(SequenceError::out_of_range(start, end));
        }
        let mut result = Self::try_with_capacity(end - start)?;
        result.extend(self.iter().skip(start).take(end - start).cloned());
        Ok(result)
    }

    /// Returns a new list holding copies of `self` followed by copies of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`] when the new arena cannot be allocated.
    pub fn concat(&self, other: &Self) -> SequenceResult<Self> {
        let mut result = Self::try_with_capacity(self.len() + other.len())?;
        result.extend(self.iter().chain(other.iter()).cloned());
        Ok(result)
    }
}

// =============================================================================
// Storage Implementation
// =============================================================================

impl<T> Storage for LinkedNodeList<T> {
    type Element = T;
    type WithType<B> = LinkedNodeList<B>;

    const KIND: StorageKind = StorageKind::List;

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

/// An iterator over references to elements of a [`LinkedNodeList`].
pub struct LinkedNodeListIterator<'a, T> {
    nodes: &'a [Node<T>],
    current: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for LinkedNodeListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.current?)?;
        self.current = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for LinkedNodeListIterator<'_, T> {}

/// An owning iterator over elements of a [`LinkedNodeList`], in logical order.
pub struct LinkedNodeListIntoIterator<T> {
    elements: Vec<Option<T>>,
    links: Vec<Option<usize>>,
    current: Option<usize>,
    remaining: usize,
}

impl<T> Iterator for LinkedNodeListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.current?;
        self.current = self.links.get(index).copied().flatten();
        self.remaining = self.remaining.saturating_sub(1);
        self.elements.get_mut(index)?.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for LinkedNodeListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for LinkedNodeList<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy in logical order; the copy's arena is compacted.
impl<T: Clone> Clone for LinkedNodeList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T> FromIterator<T> for LinkedNodeList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// Appends every element; arena growth goes through the global allocator.
impl<T> Extend<T> for LinkedNodeList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.nodes.reserve(iter.size_hint().0);
        for element in iter {
            let index = self.nodes.len();
            self.nodes.push(Node {
                element,
                next: None,
            });
            match self.tail.and_then(|tail| self.nodes.get_mut(tail)) {
                Some(tail) => tail.next = Some(index),
                None => self.head = Some(index),
            }
            self.tail = Some(index);
        }
    }
}

impl<T> IntoIterator for LinkedNodeList<T> {
    type Item = T;
    type IntoIter = LinkedNodeListIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.nodes.len();
        let (elements, links) = self
            .nodes
            .into_iter()
            .map(|node| (Some(node.element), node.next))
            .unzip();
        LinkedNodeListIntoIterator {
            elements,
            links,
            current: self.head,
            remaining,
        }
    }
}

impl<'a, T> IntoIterator for &'a LinkedNodeList<T> {
    type Item = &'a T;
    type IntoIter = LinkedNodeListIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for LinkedNodeList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for LinkedNodeList<T> {}

impl<T: Hash> Hash for LinkedNodeList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for element in self {
            element.hash(state);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedNodeList<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
