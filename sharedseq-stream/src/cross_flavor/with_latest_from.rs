// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::Stream;
use pin_project::pin_project;
use sharedseq_core::Element;
use std::pin::Pin;
use std::task::{Context, Poll};

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Pair each element with the latest element of `other`.
    ///
    /// Elements arriving before `other` has emitted are dropped. Completes with this
    /// sequence; completion of `other` only freezes its latest value.
    pub fn with_latest_from<G, U>(&self, other: &SharedSequence<G, U>) -> SharedSequence<F, (T, U)>
    where
        G: SharingPolicy,
        U: Element,
    {
        let other = other.clone();
        self.derive(move |parent| {
            // Secondary first, so a replayed latest value is seen before any primary one
            let secondary = other.subscribe();
            WithLatestFromStream::new(parent.subscribe(), secondary)
        })
    }
}

/// Stream adapter behind [`SharedSequence::with_latest_from`].
#[pin_project]
pub struct WithLatestFromStream<P, S: Stream> {
    #[pin]
    primary: P,
    #[pin]
    secondary: Option<S>,
    latest: Option<S::Item>,
}

impl<P, S> WithLatestFromStream<P, S>
where
    P: Stream,
    S: Stream,
    S::Item: Clone,
{
    /// Pair `primary`'s items with the latest item of `secondary`.
    pub fn new(primary: P, secondary: S) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
            latest: None,
        }
    }
}

impl<P, S> Stream for WithLatestFromStream<P, S>
where
    P: Stream,
    S: Stream,
    S::Item: Clone,
{
    type Item = (P::Item, S::Item);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        while let Some(secondary) = this.secondary.as_mut().as_pin_mut() {
            match secondary.poll_next(cx) {
                Poll::Ready(Some(item)) => *this.latest = Some(item),
                Poll::Ready(None) => this.secondary.set(None),
                Poll::Pending => break,
            }
        }

        loop {
            match this.primary.as_mut().poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if let Some(latest) = this.latest.as_ref() {
                        return Poll::Ready(Some((item, latest.clone())));
                    }
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}
