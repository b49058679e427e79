// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharedseq_core::{Scheduler, SequenceTask, TokioScheduler};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_task_runs_on_scheduler() -> anyhow::Result<()> {
    // Arrange
    let ran = Arc::new(AtomicBool::new(false));

    // Act
    let _task = SequenceTask::spawn_on(&TokioScheduler::new(), {
        let ran = ran.clone();
        move |_| async move { ran.store(true, Ordering::SeqCst) }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Assert
    assert!(ran.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_dropping_task_cancels_it() -> anyhow::Result<()> {
    // Arrange
    let stopped = Arc::new(AtomicBool::new(false));
    let task = SequenceTask::spawn_on(&TokioScheduler::new(), {
        let stopped = stopped.clone();
        move |cancel| async move {
            cancel.cancelled().await;
            stopped.store(true, Ordering::SeqCst);
        }
    });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!stopped.load(Ordering::SeqCst));

    // Act
    drop(task);
    tokio::time::sleep(Duration::from_millis(20)).await;

    // Assert
    assert!(stopped.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_cancel_without_drop() -> anyhow::Result<()> {
    let task = SequenceTask::spawn_on(&TokioScheduler::new(), |cancel| async move {
        cancel.cancelled().await;
    });

    task.cancel();

    assert!(task.is_cancelled());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_sleep_follows_runtime_clock() -> anyhow::Result<()> {
    // Arrange
    let scheduler = TokioScheduler::new();
    let ticks = Arc::new(AtomicUsize::new(0));
    let _task = SequenceTask::spawn_on(&scheduler, {
        let scheduler = scheduler.clone();
        let ticks = ticks.clone();
        move |_| async move {
            scheduler.sleep(Duration::from_secs(5)).await;
            ticks.fetch_add(1, Ordering::SeqCst);
        }
    });
    tokio::task::yield_now().await;

    // Act
    tokio::time::advance(Duration::from_secs(4)).await;
    let before = ticks.load(Ordering::SeqCst);
    tokio::time::advance(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    // Assert
    assert_eq!(before, 0);
    assert_eq!(ticks.load(Ordering::SeqCst), 1);
    Ok(())
}

#[test]
fn test_scheduler_with_handle_spawns_on_that_runtime() -> anyhow::Result<()> {
    // Arrange
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("pinned-runtime")
        .build()?;
    let scheduler = TokioScheduler::with_handle(runtime.handle().clone());
    let (tx, rx) = std::sync::mpsc::channel();

    // Act
    scheduler.spawn(Box::pin(async move {
        let _ = tx.send(std::thread::current().name().map(str::to_owned));
    }));

    // Assert
    assert_eq!(
        rx.recv_timeout(Duration::from_secs(1))?.as_deref(),
        Some("pinned-runtime")
    );
    Ok(())
}

#[test]
fn test_spawn_outside_a_runtime_drops_the_task_without_panicking() -> anyhow::Result<()> {
    // Arrange
    let ran = Arc::new(AtomicBool::new(false));
    let flag = ran.clone();

    // Act
    let outcome = std::panic::catch_unwind(move || {
        TokioScheduler::new().spawn(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
        }));
    });

    // Assert
    assert!(outcome.is_ok());
    assert!(!ran.load(Ordering::SeqCst));
    Ok(())
}
