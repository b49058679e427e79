// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Delay operator for time-based stream processing.

use futures::stream::FuturesOrdered;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use sharedseq_core::{ScheduledFuture, Scheduler};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

pub trait DelayExt: Stream + Sized {
    /// Delays every value by `duration`, sleeping on `scheduler`.
    ///
    /// Values keep their relative order and spacing. Completion is forwarded once
    /// the last delayed value has been emitted.
    fn delay_on(self, duration: Duration, scheduler: Arc<dyn Scheduler>) -> DelayStream<Self>;
}

impl<S: Stream> DelayExt for S {
    fn delay_on(self, duration: Duration, scheduler: Arc<dyn Scheduler>) -> DelayStream<Self> {
        DelayStream {
            stream: self,
            duration,
            scheduler,
            in_flight: FuturesOrdered::new(),
            upstream_done: false,
        }
    }
}

struct DelayFuture<T> {
    delay: ScheduledFuture,
    value: Option<T>,
}

// The value is never pinned
impl<T> Unpin for DelayFuture<T> {}

impl<T> Future for DelayFuture<T> {
    type Output = T;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        match self.delay.as_mut().poll(cx) {
            Poll::Ready(()) => match self.value.take() {
                Some(value) => Poll::Ready(value),
                None => Poll::Pending,
            },
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Stream returned by [`DelayExt::delay_on`].
#[pin_project]
pub struct DelayStream<S: Stream> {
    #[pin]
    stream: S,
    duration: Duration,
    scheduler: Arc<dyn Scheduler>,
    in_flight: FuturesOrdered<DelayFuture<S::Item>>,
    upstream_done: bool,
}

impl<S: Stream> Stream for DelayStream<S> {
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if !*this.upstream_done {
            loop {
                match this.stream.as_mut().poll_next(cx) {
                    Poll::Ready(Some(value)) => {
                        this.in_flight.push_back(DelayFuture {
                            delay: this.scheduler.sleep(*this.duration),
                            value: Some(value),
                        });
                    }
                    Poll::Ready(None) => {
                        *this.upstream_done = true;
                        break;
                    }
                    Poll::Pending => break,
                }
            }
        }

        match this.in_flight.poll_next_unpin(cx) {
            Poll::Ready(Some(value)) => Poll::Ready(Some(value)),
            Poll::Ready(None) if *this.upstream_done => Poll::Ready(None),
            Poll::Ready(None) | Poll::Pending => Poll::Pending,
        }
    }
}
