//! morphseq-demo
//!
//! Runs a small mixed workload and logs how the storages react.
//!
//! # Usage
//!
//! ```bash
//! cargo run --features cli --bin morphseq-demo
//!
//! # Include segment splits and merges
//! RUST_LOG=morphseq=trace cargo run --features cli --bin morphseq-demo
//! ```

use morphseq::adaptive::{AdaptiveConfig, AdaptiveSequence};
use morphseq::error::SequenceResult;
use morphseq::sequence::{ImmutableListSequence, MutableArraySequence, Sequence};
use morphseq::storage::SegmentedList;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> SequenceResult<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morphseq=debug,morphseq_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    adaptive_workload()?;
    segmented_workload()?;
    functional_workload()?;
    Ok(())
}

fn adaptive_workload() -> SequenceResult<()> {
    let config = AdaptiveConfig::default().with_operation_threshold(4);
    let mut sequence = AdaptiveSequence::from_batch_with_config(1..=8, config);
    tracing::info!(representation = %sequence.representation(), "built from a small batch");

    let mut total = 0;
    for index in 0..sequence.len() {
        total += *sequence.get(index)?;
    }
    tracing::info!(total, representation = %sequence.representation(), "after a read burst");

    for value in 9..=14 {
        sequence.append(value)?;
    }
    tracing::info!(
        length = sequence.len(),
        representation = %sequence.representation(),
        "after an insertion burst"
    );

    let evens = sequence.filter(|value| value % 2 == 0)?;
    tracing::info!(evens = ?evens, "filtered");
    Ok(())
}

fn segmented_workload() -> SequenceResult<()> {
    let mut list: SegmentedList<u32> = (0..64).collect();
    tracing::info!(segments = ?list.segment_lengths(), "two full segments");

    list.insert(1_000, 10)?;
    tracing::info!(segments = ?list.segment_lengths(), "after a middle insertion");

    for _ in 0..20 {
        list.remove(0)?;
    }
    tracing::info!(segments = ?list.segment_lengths(), "after draining the front");
    Ok(())
}

fn functional_workload() -> SequenceResult<()> {
    let words: ImmutableListSequence<&str> = "the quick brown fox".split(' ').collect();
    let lengths = words.map(|word| word.len())?;
    let longest = lengths.reduce(0, |longest, length| longest.max(*length));
    tracing::info!(words = ?words, lengths = ?lengths, longest, "mapped and reduced");

    let sentence: ImmutableListSequence<char> = "a,b,,c".chars().collect();
    let fields = sentence.split(|character| *character == ',')?;
    tracing::info!(fields = fields.len(), "split on commas");

    let mut scores: MutableArraySequence<u32> = [70, 85, 90].into_iter().collect();
    scores.prepend(60)?.insert_at(80, 2)?;
    let window = scores.slice(-2, 1, None)?;
    tracing::info!(scores = ?scores, window = ?window, "grew in place and sliced");
    Ok(())
}
