// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::StreamExt;
use sharedseq_core::Element;
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Keep the elements matching `predicate`. A panicking predicate excludes the element.
    pub fn filter<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let predicate = Arc::new(predicate);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let predicate = predicate.clone();
            upstream.filter(move |value| {
                ready(channel.contain_locally("filter", || predicate(value), false))
            })
        })
    }

    /// Keep the elements matching a fallible `predicate`. `Err` excludes the element.
    pub fn try_filter<E, P>(&self, predicate: P) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
        P: Fn(&T) -> Result<bool, E> + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let predicate = Arc::new(predicate);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let predicate = predicate.clone();
            upstream.filter(move |value| {
                ready(channel.try_contain_locally("try_filter", || predicate(value), false))
            })
        })
    }
}
