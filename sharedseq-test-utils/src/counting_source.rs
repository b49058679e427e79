// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A producer that records how it is subscribed.

use futures::stream::{self, BoxStream, StreamExt};
use futures::Stream;
use sharedseq_core::{SequenceSubject, StreamItem};
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

type Factory<T> = dyn Fn() -> BoxStream<'static, StreamItem<T>> + Send + Sync;

#[derive(Debug, Default)]
struct Counters {
    subscriptions: AtomicUsize,
    disposals: AtomicUsize,
}

/// Wraps a stream factory and counts how often it is subscribed and torn down.
///
/// A run counts as disposed when its stream is dropped, whether it completed or
/// was abandoned by the consumer.
pub struct CountingSource<T> {
    factory: Arc<Factory<T>>,
    counters: Arc<Counters>,
}

impl<T: Clone + Send + 'static> CountingSource<T> {
    /// Count the runs of an arbitrary factory.
    pub fn new<F, S>(factory: F) -> Self
    where
        F: Fn() -> S + Send + Sync + 'static,
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self {
            factory: Arc::new(move || factory().boxed()),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Cold producer replaying `values` then completing on every run.
    pub fn from_values(values: Vec<T>) -> Self
    where
        T: Sync,
    {
        Self::new(move || stream::iter(values.clone()).map(StreamItem::Value))
    }

    /// Cold producer replaying `items`, errors included, on every run.
    pub fn from_items(items: Vec<StreamItem<T>>) -> Self
    where
        T: Sync,
    {
        Self::new(move || stream::iter(items.clone()))
    }

    /// Hot producer: every run attaches to `subject`.
    pub fn from_subject(subject: &SequenceSubject<T>) -> Self {
        let subject = subject.clone();
        Self::new(move || match subject.subscribe() {
            Ok(items) => items.boxed(),
            Err(_) => stream::empty().boxed(),
        })
    }

    /// Producer that never emits and never completes.
    pub fn never() -> Self {
        Self::new(stream::pending)
    }

    /// Start a run.
    pub fn subscribe(&self) -> BoxStream<'static, StreamItem<T>> {
        self.counters.subscriptions.fetch_add(1, Ordering::SeqCst);
        Counted {
            inner: (self.factory)(),
            counters: self.counters.clone(),
        }
        .boxed()
    }

    /// Number of runs started.
    pub fn subscriptions(&self) -> usize {
        self.counters.subscriptions.load(Ordering::SeqCst)
    }

    /// Number of runs torn down.
    pub fn disposals(&self) -> usize {
        self.counters.disposals.load(Ordering::SeqCst)
    }

    /// Runs currently alive.
    pub fn active(&self) -> usize {
        self.subscriptions() - self.disposals()
    }
}

impl<T> Clone for CountingSource<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
            counters: self.counters.clone(),
        }
    }
}

struct Counted<T> {
    inner: BoxStream<'static, StreamItem<T>>,
    counters: Arc<Counters>,
}

impl<T> Stream for Counted<T> {
    type Item = StreamItem<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl<T> Drop for Counted<T> {
    fn drop(&mut self) {
        self.counters.disposals.fetch_add(1, Ordering::SeqCst);
    }
}
