// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::pin::Pin;
use futures::Stream;
use pin_project::pin_project;
use sharedseq_core::{ScheduledFuture, Scheduler};
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

pub trait DebounceExt: Stream + Sized {
    /// Debounces the stream by `duration`, sleeping on `scheduler`.
    ///
    /// Trailing debounce: every value restarts the timer and replaces the pending
    /// value; the pending value is emitted once `duration` passes without a new one.
    /// When the stream ends the pending value is emitted immediately.
    ///
    /// ```rust
    /// use sharedseq_stream_time::DebounceExt;
    /// use sharedseq_core::TokioScheduler;
    /// use futures::channel::mpsc;
    /// use futures::StreamExt;
    /// use std::sync::Arc;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let (tx, rx) = mpsc::unbounded();
    /// let mut debounced = rx.debounce_on(Duration::from_millis(50), Arc::new(TokioScheduler::new()));
    ///
    /// tx.unbounded_send("alice").unwrap();
    /// tx.unbounded_send("bob").unwrap();
    ///
    /// // Only the trailing value survives the burst
    /// assert_eq!(debounced.next().await, Some("bob"));
    /// # }
    /// ```
    fn debounce_on(self, duration: Duration, scheduler: Arc<dyn Scheduler>) -> DebounceStream<Self>;
}

impl<S: Stream> DebounceExt for S {
    fn debounce_on(self, duration: Duration, scheduler: Arc<dyn Scheduler>) -> DebounceStream<Self> {
        DebounceStream {
            stream: self,
            duration,
            scheduler,
            pending_value: None,
            sleep: None,
            stream_ended: false,
        }
    }
}

/// Stream returned by [`DebounceExt::debounce_on`].
#[pin_project]
pub struct DebounceStream<S: Stream> {
    #[pin]
    stream: S,
    duration: Duration,
    scheduler: Arc<dyn Scheduler>,
    pending_value: Option<S::Item>,
    sleep: Option<ScheduledFuture>,
    stream_ended: bool,
}

impl<S: Stream> Stream for DebounceStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if *this.stream_ended {
                return Poll::Ready(this.pending_value.take());
            }

            if this.pending_value.is_some() {
                if let Some(sleep) = this.sleep.as_mut() {
                    if sleep.as_mut().poll(cx).is_ready() {
                        *this.sleep = None;
                        return Poll::Ready(this.pending_value.take());
                    }
                }
            }

            match this.stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    // Restart the quiet period; the timer may already be due for a zero duration
                    *this.sleep = Some(this.scheduler.sleep(*this.duration));
                    *this.pending_value = Some(value);
                }
                Poll::Ready(None) => *this.stream_ended = true,
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
