// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::StreamExt;
use sharedseq_core::Element;
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Map each element to a sequence of flavor `G` and merge all of them.
    ///
    /// Inner sequences run concurrently; the result completes once this sequence and
    /// every inner sequence have completed. An element whose `selector` panics
    /// contributes nothing.
    pub fn flat_map<G, U, Sel>(&self, selector: Sel) -> SharedSequence<G, U>
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
            parent
                .subscribe()
                .filter_map(move |value| {
                    ready(channel.contain_locally("flat_map", || Some(selector(value)), None))
                })
                .map(|inner| inner.subscribe())
                .flatten_unordered(None)
        })
    }
}
