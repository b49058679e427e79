// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharedseq_core::CancellationToken;
use std::time::Duration;

#[test]
fn test_new_token_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn test_cancel_is_idempotent() {
    let token = CancellationToken::new();
    token.cancel();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn test_clone_shares_state() {
    let token = CancellationToken::new();
    let clone = token.clone();

    clone.cancel();

    assert!(token.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_resolves_immediately_when_already_cancelled() -> anyhow::Result<()> {
    let token = CancellationToken::new();
    token.cancel();

    tokio::time::timeout(Duration::from_millis(100), token.cancelled()).await?;
    Ok(())
}

#[tokio::test]
async fn test_cancelled_wakes_every_waiter() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let waiters: Vec<_> = (0..3)
        .map(|_| {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        })
        .collect();
    tokio::task::yield_now().await;

    // Act
    token.cancel();

    // Assert
    for waiter in waiters {
        tokio::time::timeout(Duration::from_millis(500), waiter).await??;
    }
    Ok(())
}
