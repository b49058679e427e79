// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::{Stream, StreamExt};
use sharedseq_core::Element;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Map each element to a sequence of flavor `G`, following only the latest one.
    ///
    /// The previous inner sequence is unsubscribed as soon as a new one is produced.
    /// Completes once this sequence and the current inner sequence have completed.
    /// An element whose `selector` panics keeps the current inner sequence.
    pub fn switch_map<G, U, Sel>(&self, selector: Sel) -> SharedSequence<G, U>
    where
        G: SharingPolicy,
        U: Element,
        Sel: Fn(T) -> SharedSequence<G, U> + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let selector = Arc::new(selector);
        self.derive(move |parent| {
            let channel = channel.clone();
            let selector = selector.clone();
            let inners = parent
                .subscribe()
                .filter_map(move |value| {
                    ready(channel.contain_locally("switch_map", || Some(selector(value)), None))
                })
                .map(|inner| inner.subscribe())
                .boxed();
            SwitchMapStream::new(inners)
        })
    }
}

impl<F, G, U> SharedSequence<F, SharedSequence<G, U>>
where
    F: SharingPolicy,
    G: SharingPolicy,
    U: Element,
{
    /// Follow the most recently emitted inner sequence.
    pub fn switch_on_next(&self) -> SharedSequence<G, U> {
        self.switch_map(|inner| inner)
    }
}

/// Stream adapter behind [`SharedSequence::switch_map`]: flattens a stream of
/// streams, dropping each inner stream as soon as the next one arrives.
#[derive(Debug)]
pub struct SwitchMapStream<O, I> {
    outer: Option<O>,
    inner: Option<I>,
}

impl<O, I> SwitchMapStream<O, I>
where
    O: Stream<Item = I> + Unpin,
    I: Stream + Unpin,
{
    /// Switch over the inner streams produced by `outer`.
    pub fn new(outer: O) -> Self {
        Self {
            outer: Some(outer),
            inner: None,
        }
    }
}

impl<O, I> Stream for SwitchMapStream<O, I>
where
    O: Stream<Item = I> + Unpin,
    I: Stream + Unpin,
{
    type Item = I::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<I::Item>> {
        let this = &mut *self;

        while let Some(outer) = this.outer.as_mut() {
            match outer.poll_next_unpin(cx) {
                // Replacing the inner stream drops (unsubscribes) the previous one
                Poll::Ready(Some(next)) => this.inner = Some(next),
                Poll::Ready(None) => this.outer = None,
                Poll::Pending => break,
            }
        }

        if let Some(inner) = this.inner.as_mut() {
            match inner.poll_next_unpin(cx) {
                Poll::Ready(Some(item)) => return Poll::Ready(Some(item)),
                Poll::Ready(None) => this.inner = None,
                Poll::Pending => return Poll::Pending,
            }
        }

        if this.outer.is_none() && this.inner.is_none() {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
