// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SequenceStream, SharedSequence, SharingPolicy, Source};
use futures::future::ready;
use futures::stream::{self, StreamExt};
use sharedseq_core::{Element, StreamItem};
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Emit `value` then complete.
    pub fn just(value: T) -> Self {
        Self::share(Source::just(value))
    }

    /// Complete without emitting.
    pub fn empty() -> Self {
        Self::share(Source::empty())
    }

    /// Never emit, never complete.
    pub fn never() -> Self {
        Self::share(Source::never())
    }

    /// Build the sequence with `factory` each time the result connects.
    ///
    /// A panicking factory is escalated as fatal; that connection completes empty.
    pub fn defer<Fa>(factory: Fa) -> Self
    where
        Fa: Fn() -> Self + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        Self::share(Source::new(move || -> SequenceStream<T> {
            match channel.contain_or_fatal("defer", || Some(factory()), None) {
                Some(sequence) => Box::pin(sequence.subscribe().map(StreamItem::Value)),
                None => Box::pin(stream::empty()),
            }
        }))
    }

    /// Interleave the emissions of `sequences`; completes when all of them have.
    ///
    /// `sequences` is drained eagerly. If draining it panics the failure is escalated
    /// as fatal and the result is an empty, completed sequence.
    pub fn merge<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let channel = F::error_channel();
        let members: Vec<Self> =
            channel.contain_or_fatal("merge", || sequences.into_iter().collect(), Vec::new());

        Self::share(Source::new(move || {
            stream::select_all(members.iter().map(Self::subscribe)).map(StreamItem::Value)
        }))
    }

    /// Pair elements of `self` and `other` by index; completes with the shorter side.
    pub fn zip<B: Element>(&self, other: &SharedSequence<F, B>) -> SharedSequence<F, (T, B)> {
        let other = other.clone();
        self.derive(move |parent| parent.subscribe().zip(other.subscribe()))
    }

    /// Combine elements of `self` and `other` by index.
    ///
    /// A panicking `combiner` is reported and ends the combined sequence.
    pub fn zip_with<B, R, C>(&self, other: &SharedSequence<F, B>, combiner: C) -> SharedSequence<F, R>
    where
        B: Element,
        R: Element,
        C: Fn(T, B) -> R + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let combiner = Arc::new(combiner);
        let other = other.clone();
        self.derive(move |parent| {
            let channel = channel.clone();
            let combiner = combiner.clone();
            parent
                .subscribe()
                .zip(other.subscribe())
                .map(move |(a, b)| channel.contain_or_rethrow("zip_with", || combiner(a, b)))
                .take_while(|combined| ready(combined.is_ok()))
                .filter_map(|combined| ready(combined.ok()))
        })
    }
}
