// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::StreamExt;
use sharedseq_core::Element;
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Transform each element. Elements whose mapper panics are dropped and reported.
    pub fn map<U, M>(&self, mapper: M) -> SharedSequence<F, U>
    where
        U: Element,
        M: Fn(T) -> U + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let mapper = Arc::new(mapper);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let mapper = mapper.clone();
            upstream.filter_map(move |value| {
                ready(channel.contain_locally("map", || Some(mapper(value)), None))
            })
        })
    }

    /// Transform each element with a fallible mapper. Elements whose mapper returns
    /// `Err` (or panics) are dropped and reported.
    pub fn try_map<U, E, M>(&self, mapper: M) -> SharedSequence<F, U>
    where
        U: Element,
        E: std::error::Error + Send + Sync + 'static,
        M: Fn(T) -> Result<U, E> + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let mapper = Arc::new(mapper);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let mapper = mapper.clone();
            upstream.filter_map(move |value| {
                ready(channel.try_contain_locally("try_map", || mapper(value).map(Some), None))
            })
        })
    }
}
