// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::stream::{self, StreamExt};
use sharedseq_core::Element;
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Running accumulation, starting with `initial`.
    ///
    /// Emits `initial` first, then every new accumulator value. When `accumulator`
    /// panics the previous accumulator is kept and nothing is emitted for that element.
    /// Each connection starts again from `initial`.
    pub fn scan<A, Acc>(&self, initial: A, accumulator: Acc) -> SharedSequence<F, A>
    where
        A: Element,
        Acc: Fn(&A, T) -> A + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let accumulator = Arc::new(accumulator);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let accumulator = accumulator.clone();
            let mut state = initial.clone();

            let accumulated = upstream.filter_map(move |value| {
                let next = channel.contain_locally("scan", || Some(accumulator(&state, value)), None);
                if let Some(next) = &next {
                    state = next.clone();
                }
                ready(next)
            });

            stream::once(ready(initial.clone())).chain(accumulated)
        })
    }
}
