// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Background task with cooperative cancellation, spawned on a [`Scheduler`].

use crate::{CancellationToken, Scheduler};
use std::future::Future;

/// Task handle that cancels its task when dropped.
///
/// The spawned future receives a [`CancellationToken`] and is expected to stop at
/// its next cancellation checkpoint once the handle is cancelled or dropped.
///
/// ```
/// use sharedseq_core::{SequenceTask, TokioScheduler};
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = SequenceTask::spawn_on(&TokioScheduler::new(), |cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
#[must_use = "dropping a SequenceTask cancels it"]
pub struct SequenceTask {
    cancel: CancellationToken,
}

impl SequenceTask {
    /// Spawn `f` on `scheduler`, handing it the task's cancellation token.
    pub fn spawn_on<S, F, Fut>(scheduler: &S, f: F) -> Self
    where
        S: Scheduler + ?Sized,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        scheduler.spawn(Box::pin(f(cancel.clone())));
        Self { cancel }
    }

    /// Request cancellation without waiting for the task to stop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for SequenceTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
