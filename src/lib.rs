//! # morphseq
//!
//! Generic in-memory sequences with interchangeable backing storages and a
//! sequence that picks its storage from how it is used.
//!
//! ## Overview
//!
//! - **Storages**: [`ContiguousArray`](storage::ContiguousArray),
//!   [`LinkedNodeList`](storage::LinkedNodeList) and
//!   [`SegmentedList`](storage::SegmentedList), all behind the
//!   [`Storage`](storage::Storage) contract
//! - **Adaptive sequence**: [`AdaptiveSequence`](adaptive::AdaptiveSequence)
//!   migrates between array and list storage based on counted reads and
//!   insertions
//! - **Functional sequences**: `map`, `reduce`, `filter`, `zip`, `slice`,
//!   `split` and `concat` over any storage, in mutable and immutable flavours
//!
//! ## Feature Flags
//!
//! - `adaptive`: the [`adaptive`] module
//! - `sequence`: the [`sequence`] module
//! - `cli`: the `morphseq-demo` binary
//! - `full`: Enable all features
//!
//! ## Logging
//!
//! Representation switches are reported through [`tracing`] at `debug`
//! level, segment splits and merges at `trace` level. The library never
//! installs a subscriber.
//!
//! ## Example
//!
//! ```rust
//! use morphseq::prelude::*;
//!
//! let mut sequence = AdaptiveSequence::from_batch([1, 2, 3]);
//! assert!(sequence.is_list());
//!
//! sequence.optimize_for_random_access().unwrap();
//! assert_eq!(sequence.at(1), Ok(&2));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use morphseq::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{SequenceError, SequenceResult};
    pub use crate::storage::{ContiguousArray, LinkedNodeList, SegmentedList, Storage};

    #[cfg(feature = "adaptive")]
    pub use crate::adaptive::{AdaptiveConfig, AdaptiveSequence, Representation};

    #[cfg(feature = "sequence")]
    pub use crate::sequence::*;
}

pub mod error;
pub mod storage;

#[cfg(feature = "adaptive")]
pub mod adaptive;

#[cfg(feature = "sequence")]
pub mod sequence;
