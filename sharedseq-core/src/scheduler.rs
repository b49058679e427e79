// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Execution contexts for flavors.
//!
//! Every connection of a shared sequence forwards its emissions from one task
//! spawned on the flavor's [`Scheduler`]; timing operators sleep on the same
//! scheduler.

use std::fmt::Debug;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Boxed unit future accepted and returned by [`Scheduler`].
pub type ScheduledFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// An execution context: somewhere to run tasks and a timer.
pub trait Scheduler: Send + Sync + Debug + 'static {
    /// Run `future` to completion in the background.
    fn spawn(&self, future: ScheduledFuture);

    /// A future resolving after `duration` on this scheduler's clock.
    fn sleep(&self, duration: Duration) -> ScheduledFuture;
}

/// Scheduler backed by a Tokio runtime.
///
/// Without an explicit handle, tasks go to the runtime the caller is running on,
/// like `tokio::spawn`. Outside any runtime there is nowhere to run them: the task
/// is dropped and an error is logged, so a sequence subscribed from a plain thread
/// stays silent instead of panicking.
#[cfg(feature = "runtime-tokio")]
#[derive(Clone, Debug, Default)]
pub struct TokioScheduler {
    handle: Option<tokio::runtime::Handle>,
}

#[cfg(feature = "runtime-tokio")]
impl TokioScheduler {
    /// Scheduler spawning onto the ambient runtime.
    #[must_use]
    pub const fn new() -> Self {
        Self { handle: None }
    }

    /// Scheduler pinned to a specific runtime.
    #[must_use]
    pub fn with_handle(handle: tokio::runtime::Handle) -> Self {
        Self {
            handle: Some(handle),
        }
    }
}

#[cfg(feature = "runtime-tokio")]
impl Scheduler for TokioScheduler {
    fn spawn(&self, future: ScheduledFuture) {
        match &self.handle {
            Some(handle) => {
                handle.spawn(future);
            }
            None => match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    handle.spawn(future);
                }
                Err(error) => {
                    error!("dropping task spawned outside a Tokio runtime: {}", error);
                }
            },
        }
    }

    fn sleep(&self, duration: Duration) -> ScheduledFuture {
        Box::pin(tokio::time::sleep(duration))
    }
}
