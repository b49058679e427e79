// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::{self, ready};
use futures::stream::{self, StreamExt};
use sharedseq_core::Element;
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Run `effect` for every element.
    pub fn do_on_next<E>(&self, effect: E) -> Self
    where
        E: Fn(&T) + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let effect = Arc::new(effect);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let effect = effect.clone();
            upstream.inspect(move |value| channel.contain_locally("do_on_next", || effect(value), ()))
        })
    }

    /// Run `effect` when the upstream completes. Not run on disposal.
    pub fn do_on_completed<E>(&self, effect: E) -> Self
    where
        E: Fn() + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let effect = Arc::new(effect);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let effect = effect.clone();
            let completed = stream::once(future::lazy(move |_| {
                channel.contain_locally("do_on_completed", || effect(), ());
            }))
            .filter_map(|()| ready(None::<T>));

            upstream.chain(completed)
        })
    }

    /// Run `effect` each time this stage connects, before subscribing upstream.
    pub fn do_on_subscribe<E>(&self, effect: E) -> Self
    where
        E: Fn() + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        self.derive(move |parent| {
            channel.contain_locally("do_on_subscribe", || effect(), ());
            parent.subscribe()
        })
    }

    /// Run `effect` each time this stage connects, once the upstream subscription exists.
    pub fn do_on_subscribed<E>(&self, effect: E) -> Self
    where
        E: Fn() + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        self.derive(move |parent| {
            let subscription = parent.subscribe();
            channel.contain_locally("do_on_subscribed", || effect(), ());
            subscription
        })
    }
}
