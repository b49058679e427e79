// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{SharedSequence, SharingPolicy, Subscription};
use futures::{Stream, StreamExt};
use sharedseq_core::{Element, ErrorChannel};
use std::fmt::Debug;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

type Logger = Arc<dyn Fn(String) + Send + Sync>;

impl<F: SharingPolicy, T: Element + Debug> SharedSequence<F, T> {
    /// Trace this stage's lifecycle through `logger`.
    ///
    /// Logs `"<identifier> -> subscribed"`, `"-> next <value>"`, `"-> completed"` and
    /// `"-> disposed"` (when a connection is torn down before completing).
    pub fn debug<L>(&self, identifier: impl Into<String>, logger: L) -> Self
    where
        L: Fn(String) + Send + Sync + 'static,
    {
        let identifier: Arc<str> = identifier.into().into();
        let logger: Logger = Arc::new(logger);
        let channel = F::error_channel();

        self.derive(move |parent| {
            let stage = DebugStream {
                upstream: parent.subscribe(),
                identifier: identifier.clone(),
                logger: logger.clone(),
                channel: channel.clone(),
                completed: false,
            };
            stage.log("subscribed".to_string());
            stage
        })
    }
}

struct DebugStream<T: Element> {
    upstream: Subscription<T>,
    identifier: Arc<str>,
    logger: Logger,
    channel: ErrorChannel,
    completed: bool,
}

impl<T: Element> DebugStream<T> {
    fn log(&self, event: String) {
        let line = format!("{} -> {}", self.identifier, event);
        self.channel
            .contain_locally("debug", || (self.logger)(line), ());
    }
}

impl<T: Element + Debug> Stream for DebugStream<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let polled = self.upstream.poll_next_unpin(cx);
        match &polled {
            Poll::Ready(Some(value)) => self.log(format!("next {value:?}")),
            Poll::Ready(None) if !self.completed => {
                self.completed = true;
                self.log("completed".to_string());
            }
            Poll::Ready(None) | Poll::Pending => {}
        }
        polled
    }
}

impl<T: Element> Drop for DebugStream<T> {
    fn drop(&mut self) {
        if !self.completed {
            self.log("disposed".to_string());
        }
    }
}
