//! Migration policy for [`AdaptiveSequence`](super::AdaptiveSequence).
//!
//! The policy is a small state machine over two representations. Its only
//! input is a pair of counters, so the decision is a pure function that can
//! be tested without building a sequence at all:
//!
//! ```text
//!                 random_access > threshold
//!        +------------------------------------------+
//!        |                                          v
//!     [ List ]                                  [ Array ]
//!        ^                                          |
//!        +------------------------------------------+
//!                   insertion > threshold
//! ```
//!
//! # Examples
//!
//! ```rust
//! use morphseq::adaptive::{AccessCounters, Representation, next_representation};
//!
//! let counters = AccessCounters { random_access: 11, insertion: 0 };
//! assert_eq!(
//!     next_representation(Representation::List, counters, 10),
//!     Representation::Array
//! );
//! ```

use std::fmt;

/// Default number of homogeneous operations tolerated before a switch.
pub const DEFAULT_OPERATION_THRESHOLD: usize = 10;

/// Default batch size above which a sequence built from a batch starts array-backed.
pub const DEFAULT_ARRAY_BATCH_THRESHOLD: usize = 100;

/// The two storages an adaptive sequence moves between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Representation {
    /// Backed by a [`ContiguousArray`](crate::storage::ContiguousArray).
    #[default]
    Array,
    /// Backed by a [`LinkedNodeList`](crate::storage::LinkedNodeList).
    List,
}

impl Representation {
    /// Returns the lowercase name used in error messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Array => "array",
            Self::List => "list",
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// The kind of operation a counter tallies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSignal {
    /// `get`, indexing, and every read a functional operator makes.
    RandomAccess,
    /// `append`, `prepend`, and `insert`.
    Insertion,
}

/// Per-instance tallies that drive the migration decision.
///
/// Both counters only grow until a representation switch resets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessCounters {
    /// Number of reads since the last switch.
    pub random_access: usize,
    /// Number of insertions since the last switch.
    pub insertion: usize,
}

impl AccessCounters {
    /// Tallies one `signal`.
    #[inline]
    pub const fn record(&mut self, signal: AccessSignal) {
        match signal {
            AccessSignal::RandomAccess => self.random_access = self.random_access.saturating_add(1),
            AccessSignal::Insertion => self.insertion = self.insertion.saturating_add(1),
        }
    }

    /// Sets both counters back to zero.
    #[inline]
    pub const fn reset(&mut self) {
        self.random_access = 0;
        self.insertion = 0;
    }
}

/// Decides which representation a sequence should be in.
///
/// A list-backed sequence moves to an array once its reads exceed
/// `threshold`; an array-backed one moves to a list once its insertions do.
/// The comparison is strict, so `threshold` operations are always tolerated.
#[must_use]
pub const fn next_representation(
    current: Representation,
    counters: AccessCounters,
    threshold: usize,
) -> Representation {
    match current {
        Representation::List if counters.random_access > threshold => Representation::Array,
        Representation::Array if counters.insertion > threshold => Representation::List,
        unchanged => unchanged,
    }
}

/// Tuning knobs for an [`AdaptiveSequence`](super::AdaptiveSequence).
///
/// # Examples
///
/// ```rust
/// use morphseq::adaptive::AdaptiveConfig;
///
/// let config = AdaptiveConfig::default()
///     .with_operation_threshold(3)
///     .with_array_batch_threshold(8);
/// assert_eq!(config.operation_threshold, 3);
/// assert_eq!(config.array_batch_threshold, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveConfig {
    /// How many homogeneous operations are tolerated before switching.
    pub operation_threshold: usize,
    /// Batches strictly larger than this start array-backed.
    pub array_batch_threshold: usize,
}

impl AdaptiveConfig {
    /// Creates the default configuration (`10` and `100`).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            operation_threshold: DEFAULT_OPERATION_THRESHOLD,
            array_batch_threshold: DEFAULT_ARRAY_BATCH_THRESHOLD,
        }
    }

    /// Returns a copy with `operation_threshold` replaced.
    #[must_use]
    pub const fn with_operation_threshold(self, operation_threshold: usize) -> Self {
        Self {
            operation_threshold,
            ..self
        }
    }

    /// Returns a copy with `array_batch_threshold` replaced.
    #[must_use]
    pub const fn with_array_batch_threshold(self, array_batch_threshold: usize) -> Self {
        Self {
            array_batch_threshold,
            ..self
        }
    }

    /// Picks the starting representation for a batch of `count` elements.
    #[must_use]
    pub const fn initial_representation(&self, count: usize) -> Representation {
        if count > self.array_batch_threshold {
            Representation::Array
        } else {
            Representation::List
        }
    }
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const fn counters(random_access: usize, insertion: usize) -> AccessCounters {
        AccessCounters {
            random_access,
            insertion,
        }
    }

    #[rstest]
    #[case(Representation::List, counters(10, 0), Representation::List)]
    #[case(Representation::List, counters(11, 0), Representation::Array)]
    #[case(Representation::List, counters(0, 50), Representation::List)]
    #[case(Representation::Array, counters(0, 10), Representation::Array)]
    #[case(Representation::Array, counters(0, 11), Representation::List)]
    #[case(Representation::Array, counters(50, 0), Representation::Array)]
    fn test_next_representation(
        #[case] current: Representation,
        #[case] counters: AccessCounters,
        #[case] expected: Representation,
    ) {
        assert_eq!(next_representation(current, counters, 10), expected);
    }

    #[rstest]
    fn test_zero_threshold_switches_on_first_signal() {
        assert_eq!(
            next_representation(Representation::List, counters(1, 0), 0),
            Representation::Array
        );
    }

    #[rstest]
    fn test_record_and_reset() {
        let mut tally = AccessCounters::default();
        tally.record(AccessSignal::RandomAccess);
        tally.record(AccessSignal::RandomAccess);
        tally.record(AccessSignal::Insertion);
        assert_eq!(tally, counters(2, 1));
        tally.reset();
        assert_eq!(tally, AccessCounters::default());
    }

    #[rstest]
    #[case(0, Representation::List)]
    #[case(100, Representation::List)]
    #[case(101, Representation::Array)]
    fn test_initial_representation(#[case] count: usize, #[case] expected: Representation) {
        assert_eq!(AdaptiveConfig::default().initial_representation(count), expected);
    }

    #[rstest]
    fn test_default_config() {
        let config = AdaptiveConfig::default();
        assert_eq!(config.operation_threshold, DEFAULT_OPERATION_THRESHOLD);
        assert_eq!(config.array_batch_threshold, DEFAULT_ARRAY_BATCH_THRESHOLD);
    }
}
