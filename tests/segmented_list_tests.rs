//! Unit tests for SegmentedList.
//!
//! These tests pin down the segment layout produced by appends, splits,
//! prepends and merges, and check that addressing stays correct whatever
//! the layout.

use morphseq::storage::{SEGMENT_SIZE, SegmentedList};
use rstest::rstest;

const HALF: usize = SEGMENT_SIZE / 2;

fn full_segment() -> SegmentedList<usize> {
    (0..SEGMENT_SIZE).collect()
}

fn contents(list: &SegmentedList<usize>) -> Vec<usize> {
    list.iter().copied().collect()
}

// =============================================================================
// Appends
// =============================================================================

#[rstest]
fn test_one_past_segment_size_opens_second_segment() {
    let mut list = SegmentedList::new();
    for value in 0..=SEGMENT_SIZE {
        list.append(value).unwrap();
    }
    assert_eq!(list.segment_count(), 2);
    assert_eq!(list.segment_lengths(), vec![SEGMENT_SIZE, 1]);
    assert_eq!(list.len(), SEGMENT_SIZE + 1);
}

#[rstest]
fn test_append_on_empty_list() {
    let mut list = SegmentedList::new();
    list.append("x").unwrap();
    assert_eq!(list.get(0), Ok(&"x"));
    assert_eq!(list.len(), 1);
}

// =============================================================================
// Splits
// =============================================================================

#[rstest]
fn test_midpoint_insert_splits_once_into_balanced_halves() {
    let mut list = full_segment();
    list.insert(999, HALF).unwrap();

    let lengths = list.segment_lengths();
    assert_eq!(lengths.len(), 2);
    assert!(
        lengths
            .iter()
            .all(|length| (HALF..=SEGMENT_SIZE).contains(length))
    );
    assert_eq!(list.get(HALF), Ok(&999));
}

#[rstest]
#[case(1)]
#[case(HALF - 1)]
#[case(HALF)]
#[case(SEGMENT_SIZE - 1)]
fn test_split_preserves_order(#[case] index: usize) {
    let mut list = full_segment();
    list.insert(999, index).unwrap();

    let mut expected: Vec<usize> = (0..SEGMENT_SIZE).collect();
    expected.insert(index, 999);
    assert_eq!(contents(&list), expected);
    for (position, value) in expected.iter().enumerate() {
        assert_eq!(list.get(position), Ok(value));
    }
}

#[rstest]
fn test_repeated_middle_inserts_keep_segments_bounded() {
    let mut list: SegmentedList<usize> = SegmentedList::new();
    let mut model = Vec::new();
    for value in 0..500 {
        let index = model.len() / 2;
        list.insert(value, index).unwrap();
        model.insert(index, value);
    }
    assert_eq!(contents(&list), model);
    assert!(list.segment_lengths().iter().all(|length| *length <= SEGMENT_SIZE));
    assert!(list.segment_lengths().iter().all(|length| *length > 0));
}

// =============================================================================
// Prepends and addressing
// =============================================================================

#[rstest]
fn test_prepend_on_full_head_opens_new_head() {
    let mut list = full_segment();
    list.prepend(999).unwrap();
    assert_eq!(list.segment_lengths(), vec![1, SEGMENT_SIZE]);
    assert_eq!(list.get(0), Ok(&999));
    assert_eq!(list.get(1), Ok(&0));
    assert_eq!(list.get(SEGMENT_SIZE), Ok(&(SEGMENT_SIZE - 1)));
}

#[rstest]
fn test_get_out_of_range() {
    let list = full_segment();
    let error = list.get(SEGMENT_SIZE).unwrap_err();
    assert!(error.is_out_of_range());
}

#[rstest]
fn test_get_mut_across_segments() {
    let mut list: SegmentedList<usize> = (0..40).collect();
    *list.get_mut(35).unwrap() = 0;
    assert_eq!(list.get(35), Ok(&0));
}

// =============================================================================
// Removal
// =============================================================================

#[rstest]
fn test_remove_everything_leaves_no_segments() {
    let mut list: SegmentedList<usize> = (0..70).collect();
    while !list.is_empty() {
        list.remove(0).unwrap();
    }
    assert_eq!(list.segment_count(), 0);
    assert!(list.remove(0).is_err());
}

#[rstest]
fn test_remove_returns_element_in_order() {
    let mut list: SegmentedList<usize> = (0..40).collect();
    assert_eq!(list.remove(33), Ok(33));
    assert_eq!(list.remove(0), Ok(0));
    assert_eq!(list.len(), 38);
    assert_eq!(list.get(32), Ok(&34));
}

// =============================================================================
// Ownership
// =============================================================================

#[rstest]
fn test_clone_is_deep() {
    let original: SegmentedList<usize> = (0..50).collect();
    let mut copy = original.clone();
    copy.insert(0, 10).unwrap();
    assert_eq!(original.len(), 50);
    assert_eq!(copy.len(), 51);
    assert_eq!(original.get(10), Ok(&10));
}
