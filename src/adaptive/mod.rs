//! Sequences that pick their own storage.
//!
//! This module provides a sequence that switches between two storages as its
//! access pattern changes:
//!
//! - [`AdaptiveSequence`]: array-backed while reads dominate, list-backed while
//!   insertions dominate
//! - [`Backing`]: the closed set of storages it can hold
//!
//! The switching rule lives in [`policy`] as a pure function over
//! [`AccessCounters`], separate from the copy-and-replace step
//! ([`AdaptiveSequence::migrate`]).
//!
//! # Examples
//!
//! ## Switching under load
//!
//! ```rust
//! use morphseq::adaptive::{AdaptiveConfig, AdaptiveSequence, Representation};
//!
//! let config = AdaptiveConfig::default().with_operation_threshold(3);
//! let mut sequence = AdaptiveSequence::with_config(config);
//! assert_eq!(sequence.representation(), Representation::Array);
//!
//! // The fourth insertion crosses the threshold
//! for value in 1..=4 {
//!     sequence.append(value).unwrap();
//! }
//! assert!(sequence.is_list());
//!
//! // The fourth read moves it back
//! for _ in 0..4 {
//!     sequence.get(0).unwrap();
//! }
//! assert!(sequence.is_array());
//! assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
//! ```
//!
//! ## Manual overrides
//!
//! ```rust
//! use morphseq::adaptive::AdaptiveSequence;
//!
//! let mut sequence = AdaptiveSequence::from_batch([1, 2, 3]);
//! assert!(sequence.is_list());
//!
//! sequence.optimize_for_random_access().unwrap();
//! assert_eq!(sequence.at(1), Ok(&2));
//! ```

pub mod policy;
mod sequence;

pub use policy::{
    AccessCounters, AccessSignal, AdaptiveConfig, DEFAULT_ARRAY_BATCH_THRESHOLD,
    DEFAULT_OPERATION_THRESHOLD, Representation, next_representation,
};
pub use sequence::{AdaptiveSequence, Backing, BackingIntoIterator, BackingIterator};
