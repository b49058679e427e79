// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::common::{scheduler, Timed};
use futures::channel::mpsc;
use futures::StreamExt;
use sharedseq_stream::{SharedSequence, Source};
use sharedseq_stream_time::{DelayExt, SharedSequenceTimeExt};
use sharedseq_test_utils::{assert_no_element_emitted, unwrap_next};
use std::time::Duration;
use tokio::time::{advance, pause, Instant};

#[tokio::test]
async fn test_delay_shifts_each_value() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, rx) = mpsc::unbounded();
    let mut delayed = rx.delay_on(Duration::from_millis(200), scheduler());

    // Act & Assert
    tx.unbounded_send(1)?;
    assert_no_element_emitted(&mut delayed, 0).await;

    advance(Duration::from_millis(100)).await;
    tx.unbounded_send(2)?;
    assert_no_element_emitted(&mut delayed, 0).await;

    advance(Duration::from_millis(100)).await;
    assert_eq!(unwrap_next(&mut delayed, 100).await, 1);
    assert_no_element_emitted(&mut delayed, 0).await;

    advance(Duration::from_millis(100)).await;
    assert_eq!(unwrap_next(&mut delayed, 100).await, 2);

    Ok(())
}

#[tokio::test]
async fn test_delay_completes_after_last_value() -> anyhow::Result<()> {
    // Arrange
    pause();
    let (tx, rx) = mpsc::unbounded();
    let delayed = rx.delay_on(Duration::from_millis(50), scheduler());

    // Act
    tx.unbounded_send("x")?;
    drop(tx);
    let values: Vec<_> = delayed.collect().await;

    // Assert
    assert_eq!(values, vec!["x"]);

    Ok(())
}

#[tokio::test]
async fn test_delayed_sequence_keeps_order() -> anyhow::Result<()> {
    // Arrange
    pause();
    let sequence = SharedSequence::<Timed, i32>::on_error_complete(Source::from_values(1..=4))
        .delay(Duration::from_millis(250));
    let started = Instant::now();

    // Act
    let values: Vec<_> = sequence.subscribe().collect().await;

    // Assert
    assert_eq!(values, vec![1, 2, 3, 4]);
    assert!(started.elapsed() >= Duration::from_millis(250));

    Ok(())
}
