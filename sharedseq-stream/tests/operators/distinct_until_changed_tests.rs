// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::common::next_report;
use futures::StreamExt;
use sharedseq_stream::{share_publish, share_replay_latest, SharedSequence, SharingPolicy, Source};
use sharedseq_test_utils::assert_no_element_emitted;

#[tokio::test]
async fn test_distinct_until_changed_drops_consecutive_duplicates() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let sequence = SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(vec![
        1, 1, 2, 2, 2, 1, 3, 3,
    ]));

    // Act
    let values: Vec<_> = sequence.distinct_until_changed().subscribe().collect().await;

    // Assert
    assert_eq!(values, vec![1, 2, 1, 3]);

    Ok(())
}

#[tokio::test]
async fn test_distinct_until_changed_by_key_compares_keys() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Events, share_publish);
    let sequence = SharedSequence::<Events, &'static str>::on_error_complete(Source::from_values(
        vec!["apple", "avocado", "banana", "blueberry", "cherry"],
    ));

    // Act
    let values: Vec<_> = sequence
        .distinct_until_changed_by_key(|word| word.chars().next())
        .subscribe()
        .collect()
        .await;

    // Assert
    assert_eq!(values, vec!["apple", "banana", "cherry"]);

    Ok(())
}

#[tokio::test]
async fn test_failing_comparator_lets_element_through() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let mut reports = Cached::error_channel().subscribe();
    let sequence =
        SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(vec![1, 1, 5, 5, 5]));

    // Act
    let values: Vec<_> = sequence
        .distinct_until_changed_by(|previous, current| {
            assert!(!(*previous == 5 && *current == 5), "cannot compare fives");
            previous == current
        })
        .subscribe()
        .collect()
        .await;

    // Assert
    assert_eq!(values, vec![1, 5, 5, 5]);
    for _ in 0..2 {
        assert_eq!(next_report(&mut reports).await.operator, "distinct_until_changed");
    }
    assert_no_element_emitted(&mut reports, 20).await;

    Ok(())
}

#[tokio::test]
async fn test_failing_key_selector_treats_element_as_changed() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let mut reports = Cached::error_channel().subscribe();
    let sequence =
        SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(vec![2, 2, 0, 2, 2]));

    // Act
    let values: Vec<_> = sequence
        .distinct_until_changed_by_key(|value| 10 / value)
        .subscribe()
        .collect()
        .await;

    // Assert
    assert_eq!(values, vec![2, 0, 2]);
    assert_eq!(
        next_report(&mut reports).await.operator,
        "distinct_until_changed_by_key"
    );

    Ok(())
}
