// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Terminal consumption of a shared sequence.

use crate::{SharedSequence, SharingPolicy};
use futures::future::{select, Either};
use futures::StreamExt;
use sharedseq_core::{Element, SequenceTask};

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Deliver every element to `on_next` on the flavor's scheduler.
    ///
    /// The subscription is attached before this call returns. A panicking `on_next` is
    /// reported and delivery continues. Dropping the returned handle disposes the
    /// subscription.
    pub fn drive<N>(&self, mut on_next: N) -> DriveHandle
    where
        N: FnMut(T) + Send + 'static,
    {
        let mut subscription = self.subscribe();
        let channel = F::error_channel();

        let task = SequenceTask::spawn_on(&F::scheduler(), move |cancel| async move {
            while let Either::Left((Some(value), _)) =
                select(subscription.next(), cancel.cancelled()).await
            {
                channel.contain_locally("drive", || on_next(value), ());
            }
            subscription.dispose();
        });

        DriveHandle { task: Some(task) }
    }
}

/// Handle returned by [`SharedSequence::drive`].
#[derive(Debug)]
#[must_use = "dropping a DriveHandle disposes the subscription"]
pub struct DriveHandle {
    task: Option<SequenceTask>,
}

impl DriveHandle {
    /// Stop delivering and detach the subscription. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.task.is_none()
    }
}
