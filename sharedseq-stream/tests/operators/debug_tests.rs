// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::common::settle;
use futures::StreamExt;
use parking_lot::Mutex;
use sharedseq_stream::{share_publish, SharedSequence, Source};
use std::sync::Arc;

#[tokio::test]
async fn test_debug_traces_lifecycle_of_completed_connection() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Events, share_publish);
    let lines = Arc::new(Mutex::new(Vec::new()));
    let log = lines.clone();
    let sequence = SharedSequence::<Events, i32>::on_error_complete(Source::from_values(vec![1, 2]))
        .debug("numbers", move |line| log.lock().push(line));

    // Act
    let values: Vec<_> = sequence.subscribe().collect().await;
    settle().await;

    // Assert
    assert_eq!(values, vec![1, 2]);
    assert_eq!(
        *lines.lock(),
        vec![
            "numbers -> subscribed",
            "numbers -> next 1",
            "numbers -> next 2",
            "numbers -> completed",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_debug_traces_disposal() -> anyhow::Result<()> {
    // Arrange
    isolated_flavor!(Events, share_publish);
    let lines = Arc::new(Mutex::new(Vec::new()));
    let log = lines.clone();
    let sequence = SharedSequence::<Events, i32>::never().debug("idle", move |line| log.lock().push(line));

    // Act
    drop(sequence.subscribe());
    settle().await;

    // Assert
    assert_eq!(*lines.lock(), vec!["idle -> subscribed", "idle -> disposed"]);

    Ok(())
}
