// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{DebounceExt, DelayExt};
use sharedseq_core::{Element, Scheduler};
use sharedseq_stream::{SharedSequence, SharingPolicy};
use std::sync::Arc;
use std::time::Duration;

/// Time-based operators on [`SharedSequence`], timed by the flavor's scheduler.
pub trait SharedSequenceTimeExt<F: SharingPolicy, T: Element> {
    /// Emit a value only after `duration` has passed without a newer one.
    ///
    /// A pending value is emitted right away when the upstream completes.
    fn debounce(&self, duration: Duration) -> SharedSequence<F, T>;

    /// Shift every value `duration` later, keeping order.
    fn delay(&self, duration: Duration) -> SharedSequence<F, T>;
}

impl<F: SharingPolicy, T: Element> SharedSequenceTimeExt<F, T> for SharedSequence<F, T> {
    fn debounce(&self, duration: Duration) -> SharedSequence<F, T> {
        self.compose(move |upstream| upstream.debounce_on(duration, flavor_scheduler::<F>()))
    }

    fn delay(&self, duration: Duration) -> SharedSequence<F, T> {
        self.compose(move |upstream| upstream.delay_on(duration, flavor_scheduler::<F>()))
    }
}

fn flavor_scheduler<F: SharingPolicy>() -> Arc<dyn Scheduler> {
    Arc::new(F::scheduler())
}
