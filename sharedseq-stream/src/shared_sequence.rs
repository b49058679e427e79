// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Multicast, SequenceStream, SharingPolicy, Source, Subscription};
use futures::stream::{self, Stream, StreamExt};
use sharedseq_core::{Element, StreamItem};
use std::fmt;
use std::marker::PhantomData;

/// A flavored, shared sequence of `T`.
///
/// Every `SharedSequence` owns exactly one [`Multicast`], built by applying
/// `F::share` to its upstream when the sequence is constructed. Operators build new
/// sequences whose upstream is this sequence's shared output, so additional
/// subscribers at any stage never re-run the work of an earlier stage.
///
/// A `SharedSequence` never delivers an error: subscriber streams yield plain `T`
/// and end when the sequence completes.
pub struct SharedSequence<F: SharingPolicy, T: Element> {
    multicast: Multicast<T>,
    _flavor: PhantomData<fn() -> F>,
}

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Apply the flavor's share policy to an upstream that never fails.
    ///
    /// A panic while subscribing the upstream is a construction failure: it is
    /// escalated through the flavor's error channel and that connection completes
    /// empty.
    pub(crate) fn share(source: Source<T>) -> Self {
        let channel = F::error_channel();
        let contained = Source::new(move || -> SequenceStream<T> {
            let completed: SequenceStream<T> = Box::pin(stream::empty());
            channel.contain_or_fatal("connect", || source.subscribe(), completed)
        });

        Self {
            multicast: F::share(contained),
            _flavor: PhantomData,
        }
    }

    /// Attach a subscriber.
    ///
    /// The first subscriber connects the upstream; dropping or disposing the last one
    /// disconnects it.
    pub fn subscribe(&self) -> Subscription<T> {
        self.multicast.subscribe()
    }

    /// The multicast backing this sequence.
    #[must_use]
    pub fn multicast(&self) -> &Multicast<T> {
        &self.multicast
    }

    /// Name of this sequence's flavor.
    #[must_use]
    pub fn flavor_name(&self) -> &'static str {
        F::NAME
    }

    /// Build a sequence of flavor `G` whose upstream is produced by `connect` each
    /// time the new sequence connects.
    pub(crate) fn derive<G, U, S, C>(&self, connect: C) -> SharedSequence<G, U>
    where
        G: SharingPolicy,
        U: Element,
        S: Stream<Item = U> + Send + 'static,
        C: Fn(&Multicast<T>) -> S + Send + Sync + 'static,
    {
        let parent = self.multicast.clone();
        SharedSequence::share(Source::new(move || {
            connect(&parent).map(StreamItem::Value)
        }))
    }

    /// Build a custom operator that keeps the sharing discipline.
    ///
    /// `operator` runs once per connection of the resulting sequence and receives a
    /// fresh subscription to this one. The returned stream is infallible, so composed
    /// operators cannot surface errors either.
    ///
    /// ```
    /// use futures::StreamExt;
    /// use sharedseq_core::{ErrorChannel, Element, TokioScheduler};
    /// use sharedseq_stream::{share_replay_latest, Multicast, SharedSequence, SharingPolicy, Source};
    ///
    /// struct Cached;
    ///
    /// impl SharingPolicy for Cached {
    ///     const NAME: &'static str = "Cached";
    ///     type Scheduler = TokioScheduler;
    ///     fn scheduler() -> TokioScheduler { TokioScheduler::new() }
    ///     fn share<T: Element>(source: Source<T>) -> Multicast<T> {
    ///         share_replay_latest(source, Self::scheduler())
    ///     }
    ///     fn error_channel() -> ErrorChannel { ErrorChannel::new() }
    /// }
    ///
    /// # #[tokio::main]
    /// # async fn main() {
    /// let numbers = SharedSequence::<Cached, i32>::on_error_complete(Source::from_values(1..=4));
    /// let pairs = numbers.compose(|upstream| upstream.chunks(2));
    ///
    /// assert_eq!(pairs.subscribe().collect::<Vec<_>>().await, vec![vec![1, 2], vec![3, 4]]);
    /// # }
    /// ```
    pub fn compose<U, S, Op>(&self, operator: Op) -> SharedSequence<F, U>
    where
        U: Element,
        S: Stream<Item = U> + Send + 'static,
        Op: Fn(Subscription<T>) -> S + Send + Sync + 'static,
    {
        self.derive(move |parent| operator(parent.subscribe()))
    }
}

impl<F: SharingPolicy, T: Element> Clone for SharedSequence<F, T> {
    fn clone(&self) -> Self {
        Self {
            multicast: self.multicast.clone(),
            _flavor: PhantomData,
        }
    }
}

impl<F: SharingPolicy, T: Element> fmt::Debug for SharedSequence<F, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSequence")
            .field("flavor", &F::NAME)
            .field("multicast", &self.multicast)
            .finish()
    }
}
