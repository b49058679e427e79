// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::StreamExt;
use sharedseq_core::Element;
use std::sync::Arc;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Suppress elements equal to their predecessor.
    pub fn distinct_until_changed(&self) -> Self
    where
        T: PartialEq,
    {
        self.distinct_until_changed_by(|previous, current| previous == current)
    }

    /// Suppress elements `comparator` considers equal to their predecessor.
    ///
    /// A panicking comparator counts as "not equal": the element passes. The
    /// predecessor is always updated to the latest element.
    pub fn distinct_until_changed_by<C>(&self, comparator: C) -> Self
    where
        C: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let comparator = Arc::new(comparator);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let comparator = comparator.clone();
            let mut previous: Option<T> = None;

            upstream.filter(move |current| {
                let equal = previous.as_ref().is_some_and(|previous| {
                    channel.contain_locally(
                        "distinct_until_changed",
                        || comparator(previous, current),
                        false,
                    )
                });
                previous = Some(current.clone());
                ready(!equal)
            })
        })
    }

    /// Suppress elements whose `key` equals the key of their predecessor.
    ///
    /// A panicking key selector counts as "changed": the element passes and the next
    /// element is compared against nothing.
    pub fn distinct_until_changed_by_key<K, KF>(&self, key: KF) -> Self
    where
        K: PartialEq + Send + 'static,
        KF: Fn(&T) -> K + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        let key = Arc::new(key);
        self.compose(move |upstream| {
            let channel = channel.clone();
            let key = key.clone();
            let mut previous: Option<K> = None;

            upstream.filter(move |current| {
                let current_key = channel.contain_locally(
                    "distinct_until_changed_by_key",
                    || Some(key(current)),
                    None,
                );
                let equal = matches!((&previous, &current_key), (Some(a), Some(b)) if a == b);
                previous = current_key;
                ready(!equal)
            })
        })
    }
}
