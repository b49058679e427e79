// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::common::{hot, next_report, settle};
use futures::StreamExt;
use sharedseq_core::{ErrorClass, SequenceSubject};
use sharedseq_stream::{share_publish, share_replay_latest, SharedSequence, SharingPolicy, Source};
use sharedseq_test_utils::{assert_no_element_emitted, assert_stream_ended, unwrap_next};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_just_empty_never() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);

    // Act
    let just: Vec<_> = SharedSequence::<Cached, i32>::just(42).subscribe().collect().await;
    let empty: Vec<_> = SharedSequence::<Cached, i32>::empty().subscribe().collect().await;
    let mut never = SharedSequence::<Cached, i32>::never().subscribe();

    // Assert
    assert_eq!(just, vec![42]);
    assert!(empty.is_empty());
    assert_no_element_emitted(&mut never, 20).await;

    Ok(())
}

#[tokio::test]
async fn test_merge_interleaves_and_completes_after_all() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Events, share_publish);
    let left = SequenceSubject::new();
    let right = SequenceSubject::new();
    let merged = SharedSequence::merge([hot::<Events, i32>(&left), hot::<Events, i32>(&right)]);
    let mut subscription = merged.subscribe();

    // Act & Assert
    left.next(1)?;
    assert_eq!(unwrap_next(&mut subscription, 500).await, 1);
    right.next(2)?;
    assert_eq!(unwrap_next(&mut subscription, 500).await, 2);

    left.close();
    settle().await;
    right.next(3)?;
    assert_eq!(unwrap_next(&mut subscription, 500).await, 3);

    right.close();
    assert_stream_ended(&mut subscription, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_merge_with_failing_sources_is_empty_and_fatal() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let mut reports = Cached::error_channel().subscribe();

    // Act
    let merged = SharedSequence::<Cached, i32>::merge((0..3).map(|index| {
        assert_ne!(index, 1, "source list is broken");
        SharedSequence::just(index)
    }));
    let values: Vec<_> = merged.subscribe().collect().await;

    // Assert
    assert!(values.is_empty());
    let report = next_report(&mut reports).await;
    assert_eq!(report.operator, "merge");
    assert_eq!(report.class, ErrorClass::Construction);

    Ok(())
}

#[tokio::test]
async fn test_defer_builds_once_per_connection() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let builds = Arc::new(AtomicUsize::new(0));
    let counter = builds.clone();
    let deferred = SharedSequence::<Cached, usize>::defer(move || {
        SharedSequence::just(counter.fetch_add(1, Ordering::SeqCst))
    });
    assert_eq!(builds.load(Ordering::SeqCst), 0);

    // Act
    let first: Vec<_> = deferred.subscribe().collect().await;
    let second: Vec<_> = deferred.subscribe().collect().await;

    // Assert
    assert_eq!(first, vec![0]);
    assert_eq!(second, vec![1]);
    assert_eq!(builds.load(Ordering::SeqCst), 2);

    Ok(())
}

#[tokio::test]
async fn test_defer_factory_panic_is_fatal_and_empty() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Events, share_publish);
    let mut reports = Events::error_channel().subscribe();
    let deferred = SharedSequence::<Events, i32>::defer(|| panic!("cannot build"));

    // Act
    let values: Vec<_> = deferred.subscribe().collect().await;

    // Assert
    assert!(values.is_empty());
    let report = next_report(&mut reports).await;
    assert_eq!(report.operator, "defer");
    assert_eq!(report.class, ErrorClass::Construction);

    Ok(())
}

#[tokio::test]
async fn test_zip_pairs_by_index_and_ends_with_shorter() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let numbers = SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(1..=3));
    let letters = SharedSequence::<Cached, char>::on_error_complete(Source::from_values(vec!['a', 'b']));

    // Act
    let pairs: Vec<_> = numbers.zip(&letters).subscribe().collect().await;

    // Assert
    assert_eq!(pairs, vec![(1, 'a'), (2, 'b')]);

    Ok(())
}

#[tokio::test]
async fn test_zip_with_combiner_panic_completes_sequence() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let mut reports = Cached::error_channel().subscribe();
    let numerators = SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(vec![8, 6, 4]));
    let denominators =
        SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(vec![2, 0, 1]));

    // Act
    let quotients: Vec<_> = numerators
        .zip_with(&denominators, |numerator, denominator| numerator / denominator)
        .subscribe()
        .collect()
        .await;

    // Assert
    assert_eq!(quotients, vec![4]);
    let report = next_report(&mut reports).await;
    assert_eq!(report.operator, "zip_with");
    assert_eq!(report.class, ErrorClass::Propagated);
    assert_no_element_emitted(&mut reports, 20).await;

    Ok(())
}
