// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Re-subscribable upstream producers.
//!
//! A [`Source`] is a factory of streams: each call to [`Source::subscribe`] starts a
//! new, independent run of the producer. This is what lets a shared sequence restart
//! cold after it has fully disconnected.
//!
//! Producers that cannot be replayed (a one-shot stream) are supported through
//! [`Source::from_stream`]: the first subscription gets the stream, later ones
//! complete immediately.

use futures::stream::{self, Stream, StreamExt};
use parking_lot::Mutex;
use sharedseq_core::{Element, SequenceError, SequenceSubject, StreamItem};
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

/// Stream produced by one subscription to a [`Source`].
pub type SequenceStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

type Factory<T> = dyn Fn() -> SequenceStream<T> + Send + Sync;

/// A re-subscribable producer of `StreamItem<T>`.
pub struct Source<T> {
    factory: Arc<Factory<T>>,
}

impl<T: Send + 'static> Source<T> {
    /// Source running `factory` once per subscription.
    ///
    /// ```
    /// use futures::{stream, StreamExt};
    /// use sharedseq_core::StreamItem;
    /// use sharedseq_stream::Source;
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let source = Source::new(|| stream::iter(1..=3).map(StreamItem::Value));
    ///
    /// let first: Vec<_> = source.subscribe().collect().await;
    /// let second: Vec<_> = source.subscribe().collect().await;
    /// assert_eq!(first, second);
    /// # }
    /// ```
    pub fn new<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || -> SequenceStream<T> { Box::pin(factory()) }),
        }
    }

    /// Start a new run of the producer.
    pub fn subscribe(&self) -> SequenceStream<T> {
        (self.factory)()
    }

    /// Single-shot source: only the first subscription receives `stream`.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        let slot: Mutex<Option<SequenceStream<T>>> = Mutex::new(Some(Box::pin(stream)));
        Self::new(move || {
            slot.lock()
                .take()
                .unwrap_or_else(|| -> SequenceStream<T> { Box::pin(stream::empty()) })
        })
    }

    /// Source that completes without emitting.
    pub fn empty() -> Self {
        Self::new(stream::empty)
    }

    /// Source that never emits and never completes.
    pub fn never() -> Self {
        Self::new(stream::pending)
    }

    /// Source that fails with `error` on every subscription.
    pub fn failing(error: SequenceError) -> Self {
        Self::new(move || stream::once(futures::future::ready(StreamItem::Error(error.clone()))))
    }
}

impl<T: Element> Source<T> {
    /// Source replaying `values` on every subscription.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
        I::IntoIter: Send + 'static,
    {
        Self::new(move || stream::iter(values.clone()).map(StreamItem::Value))
    }

    /// Source replaying `items`, errors included, on every subscription.
    pub fn from_items(items: Vec<StreamItem<T>>) -> Self {
        Self::new(move || stream::iter(items.clone()))
    }

    /// Source emitting `value` then completing.
    pub fn just(value: T) -> Self {
        Self::from_values([value])
    }

    /// Hot source: each subscription attaches to `subject` and sees only later items.
    pub fn from_subject(subject: &SequenceSubject<T>) -> Self {
        let subject = subject.clone();
        Self::new(move || -> SequenceStream<T> {
            subject
                .subscribe()
                .unwrap_or_else(|_| -> SequenceStream<T> { Box::pin(stream::empty()) })
        })
    }
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source").finish_non_exhaustive()
    }
}
