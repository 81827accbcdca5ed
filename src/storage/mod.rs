//! Backing storages and the contract they share.
//!
//! Every sequence in this crate keeps its elements in one of three
//! interchangeable storages:
//!
//! - [`ContiguousArray`]: a growable contiguous buffer with O(1) indexed access
//! - [`LinkedNodeList`]: a singly-linked node chain with O(1) append and prepend
//! - [`SegmentedList`]: a chain of fixed-capacity segments that bounds the
//!   cost of a middle insertion by the segment size
//!
//! All three implement [`Storage`], the primitive contract
//! (`get`, `len`, `append`, `prepend`, `insert`, `iter`) that the functional
//! sequence layer and [`AdaptiveSequence`](crate::adaptive::AdaptiveSequence)
//! are written against.
//!
//! # Examples
//!
//! ```rust
//! use morphseq::storage::{ContiguousArray, LinkedNodeList, SegmentedList, Storage};
//!
//! fn fill<S: Storage<Element = i32>>(mut storage: S) -> S {
//!     storage.append(2).unwrap();
//!     storage.prepend(1).unwrap();
//!     storage.insert(3, 2).unwrap();
//!     storage
//! }
//!
//! let array = fill(ContiguousArray::new());
//! let list = fill(LinkedNodeList::new());
//! let segmented = fill(SegmentedList::new());
//!
//! assert_eq!(array.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
//! assert_eq!(list.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
//! assert_eq!(segmented.iter().collect::<Vec<_>>(), vec![&1, &2, &3]);
//! ```

use std::fmt;

use crate::error::{SequenceError, SequenceResult};

mod array;
mod linked;
mod segmented;

pub use array::ContiguousArray;
pub use linked::LinkedNodeList;
pub use linked::LinkedNodeListIntoIterator;
pub use linked::LinkedNodeListIterator;
pub use segmented::SEGMENT_SIZE;
pub use segmented::SegmentedList;
pub use segmented::SegmentedListIterator;

/// Identifies which concrete storage a container uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// [`ContiguousArray`].
    Array,
    /// [`LinkedNodeList`].
    List,
    /// [`SegmentedList`].
    Segmented,
}

impl StorageKind {
    /// Returns the lowercase name used in error messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::List => "list",
            Self::Segmented => "segmented",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// The primitive contract every backing storage fulfils.
///
/// The functional operators of [`crate::sequence`] are composed purely from
/// these methods, so any storage can stand behind any sequence variant.
///
/// # Associated Types
///
/// - `Element`: the type of the stored elements.
/// - `WithType<B>`: the same kind of storage holding `B` instead. This lets a
///   `map` over an array-backed sequence produce another array-backed
///   sequence without naming the concrete type.
///
/// # Laws
///
/// For every storage `s`:
///
/// 1. `s.get(i)` succeeds exactly when `i < s.len()`.
/// 2. `s.insert(x, i)` succeeds exactly when `i <= s.len()`, after which
///    `s.get(i) == Ok(&x)` and every element previously at `j >= i` is at `j + 1`.
/// 3. `s.append(x)` is `s.insert(x, s.len())`; `s.prepend(x)` is `s.insert(x, 0)`.
/// 4. `s.iter()` yields `s.get(0), s.get(1), ..., s.get(s.len() - 1)` in order.
/// 5. A failed call leaves `s` unchanged.
pub trait Storage: Default {
    /// The type of the stored elements.
    type Element;

    /// The same storage kind applied to a different element type.
    type WithType<B>: Storage<Element = B>;

    /// The kind a [`Default`] instance of this storage has.
    ///
    /// For the three leaf storages this is simply what the type is. A storage
    /// that wraps several kinds reports its default here and exposes the
    /// kind it currently holds through an inherent `kind()` method, so code
    /// that needs the live kind must not rely on this constant alone.
    const KIND: StorageKind;

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`](crate::error::SequenceError::IndexOutOfRange)
    /// when `index >= self.len()`.
    fn get(&self, index: usize) -> SequenceResult<&Self::Element>;

    /// Returns the number of stored elements.
    fn len(&self) -> usize;

    /// Returns `true` if the storage holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds `element` after the last element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the storage could not grow.
    fn append(&mut self, element: Self::Element) -> SequenceResult<()>;

    /// Adds `element` before the first element.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::AllocationFailed`](crate::error::SequenceError::AllocationFailed)
    /// when the storage could not grow.
    fn prepend(&mut self, element: Self::Element) -> SequenceResult<()>;

    /// Inserts `element` so that it ends up at position `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfRange`](crate::error::SequenceError::IndexOutOfRange)
    /// when `index > self.len()`.
    fn insert(&mut self, element: Self::Element, index: usize) -> SequenceResult<()>;

    /// Returns an iterator over the elements in logical order.
    fn iter(&self) -> impl Iterator<Item = &Self::Element>;
}

/// Resolves a possibly negative slice offset against `length`.
#[cfg_attr(not(any(feature = "adaptive", feature = "sequence")), allow(dead_code))]
pub(crate) fn resolve_slice(offset: isize, count: usize, length: usize) -> SequenceResult<usize> {
    let error = SequenceError::SliceOutOfRange {
        offset,
        count,
        length,
    };
    let start = if offset < 0 {
        length.checked_sub(offset.unsigned_abs()).ok_or_else(|| error.clone())?
    } else {
        offset.unsigned_abs()
    };
    match start.checked_add(count) {
        Some(end) if start < length && end <= length => Ok(start),
        _ => Err(error),
    }
}

static_assertions::assert_impl_all!(ContiguousArray<i32>: Storage, Clone, Send, Sync);
static_assertions::assert_impl_all!(LinkedNodeList<i32>: Storage, Clone, Send, Sync);
static_assertions::assert_impl_all!(SegmentedList<i32>: Storage, Clone, Send, Sync);
