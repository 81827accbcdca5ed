//! Property-based tests for AdaptiveSequence.
//!
//! These tests check that migrations never change what a sequence holds and
//! that the counters follow the transition rules.

use morphseq::adaptive::{
    AccessCounters, AdaptiveConfig, AdaptiveSequence, Representation, next_representation,
};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum Step {
    Get(usize),
    Append(i32),
    Prepend(i32),
    Insert(i32, usize),
    OptimizeForRandomAccess,
    OptimizeForInsertions,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (0..64usize).prop_map(Step::Get),
        3 => any::<i32>().prop_map(Step::Append),
        2 => any::<i32>().prop_map(Step::Prepend),
        2 => (any::<i32>(), 0..64usize).prop_map(|(value, index)| Step::Insert(value, index)),
        1 => Just(Step::OptimizeForRandomAccess),
        1 => Just(Step::OptimizeForInsertions),
    ]
}

fn elements() -> impl Strategy<Value = Vec<i32>> {
    prop::collection::vec(any::<i32>(), 0..40)
}

fn representation() -> impl Strategy<Value = Representation> {
    prop_oneof![Just(Representation::Array), Just(Representation::List)]
}

fn contents(sequence: &AdaptiveSequence<i32>) -> Vec<i32> {
    sequence.iter().copied().collect()
}

proptest! {
    // =========================================================================
    // Model equivalence
    // =========================================================================

    #[test]
    fn prop_contents_match_model_under_any_workload(
        initial in elements(),
        steps in prop::collection::vec(step(), 0..120),
        threshold in 0..6usize,
    ) {
        let config = AdaptiveConfig::default().with_operation_threshold(threshold);
        let mut sequence = AdaptiveSequence::from_batch_with_config(initial.clone(), config);
        let mut model = initial;

        for step in steps {
            match step {
                Step::Get(index) => {
                    prop_assert_eq!(sequence.get(index).ok(), model.get(index));
                }
                Step::Append(value) => {
                    sequence.append(value).unwrap();
                    model.push(value);
                }
                Step::Prepend(value) => {
                    sequence.prepend(value).unwrap();
                    model.insert(0, value);
                }
                Step::Insert(value, index) => {
                    let accepted = sequence.insert(value, index).is_ok();
                    prop_assert_eq!(accepted, index <= model.len());
                    if accepted {
                        model.insert(index, value);
                    }
                }
                Step::OptimizeForRandomAccess => sequence.optimize_for_random_access().unwrap(),
                Step::OptimizeForInsertions => sequence.optimize_for_insertions().unwrap(),
            }
            prop_assert_eq!(sequence.len(), model.len());
        }
        prop_assert_eq!(contents(&sequence), model);
    }

    // =========================================================================
    // Migration
    // =========================================================================

    #[test]
    fn prop_migrate_preserves_contents(initial in elements(), target in representation()) {
        let mut sequence = AdaptiveSequence::from_batch(initial.clone());
        sequence.migrate(target).unwrap();
        prop_assert_eq!(sequence.representation(), target);
        prop_assert_eq!(contents(&sequence), initial);
    }

    #[test]
    fn prop_migrate_is_idempotent(initial in elements(), target in representation()) {
        let mut sequence = AdaptiveSequence::from_batch(initial);
        sequence.migrate(target).unwrap();
        let once = sequence.clone();
        sequence.migrate(target).unwrap();
        prop_assert_eq!(sequence.representation(), once.representation());
        prop_assert_eq!(sequence.counters(), once.counters());
        prop_assert_eq!(sequence, once);
    }

    #[test]
    fn prop_counters_never_exceed_threshold_after_operation(
        initial in elements(),
        steps in prop::collection::vec(step(), 0..80),
        threshold in 0..6usize,
    ) {
        let config = AdaptiveConfig::default().with_operation_threshold(threshold);
        let mut sequence = AdaptiveSequence::from_batch_with_config(initial, config);
        for step in steps {
            match step {
                Step::Get(index) => { let _ = sequence.get(index); }
                Step::Append(value) => { sequence.append(value).unwrap(); }
                Step::Prepend(value) => { sequence.prepend(value).unwrap(); }
                Step::Insert(value, index) => { let _ = sequence.insert(value, index); }
                Step::OptimizeForRandomAccess | Step::OptimizeForInsertions => {}
            }
            let counters = sequence.counters();
            prop_assert_eq!(
                next_representation(sequence.representation(), counters, threshold),
                sequence.representation()
            );
        }
    }

    // =========================================================================
    // Transition function
    // =========================================================================

    #[test]
    fn prop_transition_only_leaves_current_state_past_threshold(
        current in representation(),
        random_access in 0..30usize,
        insertion in 0..30usize,
        threshold in 0..30usize,
    ) {
        let counters = AccessCounters { random_access, insertion };
        let next = next_representation(current, counters, threshold);
        let expected = match current {
            Representation::List if random_access > threshold => Representation::Array,
            Representation::Array if insertion > threshold => Representation::List,
            unchanged => unchanged,
        };
        prop_assert_eq!(next, expected);
    }

    // =========================================================================
    // Functional operators
    // =========================================================================

    #[test]
    fn prop_filter_matches_iterator_filter(initial in elements()) {
        let mut sequence = AdaptiveSequence::from_batch(initial.clone());
        let kept = sequence.filter(|value| value % 3 == 0).unwrap();
        let expected: Vec<i32> = initial.into_iter().filter(|value| value % 3 == 0).collect();
        prop_assert_eq!(contents(&kept), expected);
    }

    #[test]
    fn prop_split_then_flatten_drops_only_separators(initial in elements()) {
        let mut sequence = AdaptiveSequence::from_batch(initial.clone());
        let runs = sequence.split(|value| value % 4 == 0).unwrap();
        prop_assert!(runs.iter().all(|run| !run.is_empty()));
        let flattened: Vec<i32> = runs.iter().flat_map(contents).collect();
        let expected: Vec<i32> = initial.into_iter().filter(|value| value % 4 != 0).collect();
        prop_assert_eq!(flattened, expected);
    }
}
