// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::common::{hot, settle};
use futures::stream::{self, StreamExt};
use sharedseq_core::SequenceSubject;
use sharedseq_stream::{share_publish, share_replay_latest, WithLatestFromStream};
use sharedseq_test_utils::{assert_no_element_emitted, assert_stream_ended, unwrap_next};

#[tokio::test]
async fn test_with_latest_from_pairs_with_latest_secondary() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    isolated_flavor!(Events, share_publish);
    let clicks = SequenceSubject::new();
    let names = SequenceSubject::new();
    let paired = hot::<Events, u32>(&clicks).with_latest_from(&hot::<Cached, &'static str>(&names));
    let mut subscription = paired.subscribe();

    // Act & Assert
    clicks.next(1)?;
    assert_no_element_emitted(&mut subscription, 20).await;

    names.next("alice")?;
    settle().await;
    clicks.next(2)?;
    assert_eq!(unwrap_next(&mut subscription, 500).await, (2, "alice"));

    names.next("bob")?;
    settle().await;
    clicks.next(3)?;
    assert_eq!(unwrap_next(&mut subscription, 500).await, (3, "bob"));
    assert_eq!(paired.flavor_name(), "Events");

    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_sees_replayed_secondary() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let clicks = SequenceSubject::new();
    let names = SequenceSubject::new();
    let latest_name = hot::<Cached, &'static str>(&names);
    let _keep_alive = latest_name.subscribe();
    names.next("carol")?;
    settle().await;
    let paired = hot::<Cached, u32>(&clicks).with_latest_from(&latest_name);
    let mut subscription = paired.subscribe();

    // Act
    clicks.next(1)?;

    // Assert
    assert_eq!(unwrap_next(&mut subscription, 500).await, (1, "carol"));

    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_completes_with_primary_only() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Cached, share_replay_latest);
    let clicks = SequenceSubject::new();
    let names = SequenceSubject::new();
    let paired = hot::<Cached, u32>(&clicks).with_latest_from(&hot::<Cached, &'static str>(&names));
    let mut subscription = paired.subscribe();
    names.next("dave")?;
    settle().await;

    // Act
    names.close();
    settle().await;
    clicks.next(1)?;

    // Assert
    assert_eq!(unwrap_next(&mut subscription, 500).await, (1, "dave"));
    clicks.close();
    assert_stream_ended(&mut subscription, 500).await;

    Ok(())
}

#[tokio::test]
async fn test_adapter_pairs_streams_that_are_not_unpin() -> anyhow::Result<()> {
    // Arrange
    let primary = stream::unfold(1, |n| async move { (n <= 3).then_some((n, n + 1)) });
    let secondary = stream::unfold(0, |n| async move { (n < 1).then_some(("latest", n + 1)) });

    // Act
    let paired: Vec<_> = WithLatestFromStream::new(primary, secondary).collect().await;

    // Assert
    assert_eq!(paired, vec![(1, "latest"), (2, "latest"), (3, "latest")]);

    Ok(())
}
