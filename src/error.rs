//! Error types for sequence storages.
//!
//! Every fallible operation in this crate reports one of the variants of
//! [`SequenceError`]. Failures are local and synchronous: nothing is retried
//! or clamped, and the container that reported the error is left exactly as
//! it was before the call.

use std::collections::TryReserveError;

use thiserror::Error;

/// Convenience alias used by every fallible operation in the crate.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Represents the ways a sequence operation can fail.
///
/// # Examples
///
/// ```rust
/// use morphseq::error::SequenceError;
///
/// let error = SequenceError::IndexOutOfRange { index: 5, length: 3 };
/// assert_eq!(error.to_string(), "index 5 out of range for length 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An index fell outside the valid bound for the current length.
    #[error("index {index} out of range for length {length}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The length of the container at the time of the call.
        length: usize,
    },

    /// A slice window does not fit inside the sequence.
    #[error("slice at offset {offset} with count {count} out of range for length {length}")]
    SliceOutOfRange {
        /// The requested offset (negative offsets count from the end).
        offset: isize,
        /// The number of elements the slice would remove.
        count: usize,
        /// The length of the sequence at the time of the call.
        length: usize,
    },

    /// An operation that needs at least one element was called on an empty container.
    #[error("{operation} called on an empty container")]
    EmptyContainer {
        /// The name of the operation.
        operation: &'static str,
    },

    /// The operation is not available in the current representation.
    #[error("{operation} is not supported while {representation}-backed")]
    Unsupported {
        /// The name of the operation.
        operation: &'static str,
        /// The representation that rejected it.
        representation: &'static str,
    },

    /// The allocator could not provide the memory an operation needed.
    #[error("allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),
}

impl SequenceError {
    /// Builds an [`SequenceError::IndexOutOfRange`] for `index` against `length`.
    #[inline]
    #[must_use]
    pub const fn out_of_range(index: usize, length: usize) -> Self {
        Self::IndexOutOfRange { index, length }
    }

    /// Builds an [`SequenceError::EmptyContainer`] for `operation`.
    #[inline]
    #[must_use]
    pub const fn empty(operation: &'static str) -> Self {
        Self::EmptyContainer { operation }
    }

    /// Returns `true` for [`SequenceError::IndexOutOfRange`] and
    /// [`SequenceError::SliceOutOfRange`].
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::IndexOutOfRange { .. } | Self::SliceOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_index_out_of_range_display() {
        let error = SequenceError::out_of_range(7, 2);
        assert_eq!(error.to_string(), "index 7 out of range for length 2");
    }

    #[rstest]
    fn test_slice_out_of_range_display() {
        let error = SequenceError::SliceOutOfRange {
            offset: -9,
            count: 1,
            length: 4,
        };
        assert_eq!(
            error.to_string(),
            "slice at offset -9 with count 1 out of range for length 4"
        );
    }

    #[rstest]
    fn test_empty_container_display() {
        let error = SequenceError::empty("first");
        assert_eq!(error.to_string(), "first called on an empty container");
    }

    #[rstest]
    fn test_unsupported_display() {
        let error = SequenceError::Unsupported {
            operation: "at",
            representation: "list",
        };
        assert_eq!(error.to_string(), "at is not supported while list-backed");
    }

    #[rstest]
    fn test_allocation_failure_converts_from_try_reserve_error() {
        let mut buffer: Vec<u8> = Vec::new();
        let reserve_error = buffer.try_reserve(usize::MAX).unwrap_err();
        let error: SequenceError = reserve_error.into();
        assert!(matches!(error, SequenceError::AllocationFailed(_)));
        assert!(!error.is_out_of_range());
    }

    #[rstest]
    #[case(SequenceError::out_of_range(0, 0), true)]
    #[case(SequenceError::SliceOutOfRange { offset: 0, count: 0, length: 0 }, true)]
    #[case(SequenceError::empty("last"), false)]
    fn test_is_out_of_range(#[case] error: SequenceError, #[case] expected: bool) {
        assert_eq!(error.is_out_of_range(), expected);
    }

    #[rstest]
    fn test_error_trait_is_implemented() {
        let error = SequenceError::empty("first");
        let _: &dyn std::error::Error = &error;
    }
}
