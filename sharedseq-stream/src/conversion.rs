// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Converting fallible producers into flavors.
//!
//! A [`Source`] may terminate with an error; a [`SharedSequence`] may not. Each
//! conversion attaches the policy that translates the upstream error:
//!
//! | Conversion | Upstream error becomes |
//! |---|---|
//! | [`on_error_just_return`](SharedSequence::on_error_just_return) | one substitute value, then completion |
//! | [`on_error_resume_next`](SharedSequence::on_error_resume_next) | the emissions of a fallback sequence |
//! | [`on_error_resume_with`](SharedSequence::on_error_resume_with) | the emissions of a sequence built from the error |
//! | [`on_error_complete`](SharedSequence::on_error_complete) | completion |
//!
//! The same conversions read left to right from the producer side through
//! [`Source::as_flavor_or_return`] and its siblings.

use crate::{SharedSequence, SharingPolicy, Source};
use futures::stream::{self, Stream, StreamExt};
use pin_project::pin_project;
use sharedseq_core::{Element, SequenceError, StreamItem};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{ready, Context, Poll};

type Fallback<T> = Pin<Box<dyn Stream<Item = T> + Send + 'static>>;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Convert `source`, replacing an upstream error with `value` and completing.
    pub fn on_error_just_return(source: Source<T>, value: T) -> Self {
        Self::recovering(source, move |_| -> Fallback<T> {
            Box::pin(stream::once(futures::future::ready(value.clone())))
        })
    }

    /// Convert `source`, continuing with `fallback`'s emissions after an upstream error.
    pub fn on_error_resume_next(source: Source<T>, fallback: Self) -> Self {
        Self::recovering(source, move |_| -> Fallback<T> { Box::pin(fallback.subscribe()) })
    }

    /// Convert `source`, continuing with the sequence `recover` builds from the error.
    ///
    /// A failing `recover` is contained: it is reported and the sequence completes.
    pub fn on_error_resume_with<R>(source: Source<T>, recover: R) -> Self
    where
        R: Fn(SequenceError) -> Self + Send + Sync + 'static,
    {
        let channel = F::error_channel();
        Self::recovering(source, move |error| -> Fallback<T> {
            let completed: Fallback<T> = Box::pin(stream::empty());
            channel.contain_locally(
                "on_error_resume_with",
                || -> Fallback<T> { Box::pin(recover(error).subscribe()) },
                completed,
            )
        })
    }

    /// Convert `source`, completing at the first upstream error.
    pub fn on_error_complete(source: Source<T>) -> Self {
        Self::recovering(source, |_| -> Fallback<T> { Box::pin(stream::empty()) })
    }

    fn recovering<R>(source: Source<T>, recover: R) -> Self
    where
        R: Fn(SequenceError) -> Fallback<T> + Send + Sync + 'static,
    {
        let recover = Arc::new(recover);
        Self::share(Source::new(move || {
            let recover = recover.clone();
            OnErrorResume {
                upstream: Some(source.subscribe()),
                recover: Some(move |error| (*recover)(error)),
                fallback: None,
            }
            .map(StreamItem::Value)
        }))
    }
}

impl<T: Element> Source<T> {
    /// Same as [`SharedSequence::on_error_just_return`].
    pub fn as_flavor_or_return<F: SharingPolicy>(self, value: T) -> SharedSequence<F, T> {
        SharedSequence::on_error_just_return(self, value)
    }

    /// Same as [`SharedSequence::on_error_resume_next`].
    pub fn as_flavor_or_resume<F: SharingPolicy>(
        self,
        fallback: SharedSequence<F, T>,
    ) -> SharedSequence<F, T> {
        SharedSequence::on_error_resume_next(self, fallback)
    }

    /// Same as [`SharedSequence::on_error_resume_with`].
    pub fn as_flavor_or_else<F, R>(self, recover: R) -> SharedSequence<F, T>
    where
        F: SharingPolicy,
        R: Fn(SequenceError) -> SharedSequence<F, T> + Send + Sync + 'static,
    {
        SharedSequence::on_error_resume_with(self, recover)
    }

    /// Same as [`SharedSequence::on_error_complete`].
    pub fn as_flavor_complete_on_error<F: SharingPolicy>(self) -> SharedSequence<F, T> {
        SharedSequence::on_error_complete(self)
    }
}

#[pin_project]
struct OnErrorResume<T, R> {
    upstream: Option<crate::SequenceStream<T>>,
    recover: Option<R>,
    fallback: Option<Fallback<T>>,
}

impl<T, R> Stream for OnErrorResume<T, R>
where
    R: FnOnce(SequenceError) -> Fallback<T>,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        let this = self.project();

        if let Some(upstream) = this.upstream.as_mut() {
            match ready!(upstream.as_mut().poll_next(cx)) {
                Some(StreamItem::Value(value)) => return Poll::Ready(Some(value)),
                Some(StreamItem::Error(error)) => {
                    debug!("recovering from upstream error: {}", error);
                    *this.upstream = None;
                    *this.fallback = this.recover.take().map(|recover| recover(error));
                }
                None => {
                    *this.upstream = None;
                    return Poll::Ready(None);
                }
            }
        }

        match this.fallback.as_mut() {
            Some(fallback) => fallback.as_mut().poll_next(cx),
            None => Poll::Ready(None),
        }
    }
}
