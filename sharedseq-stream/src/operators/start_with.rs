// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy};
use futures::future::ready;
use futures::stream::{self, StreamExt};
use sharedseq_core::Element;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Emit `element` on every connection before the upstream's elements.
    pub fn start_with(&self, element: T) -> Self {
        self.compose(move |upstream| stream::once(ready(element.clone())).chain(upstream))
    }
}
