// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Process-level sink for contained failures.
//!
//! Every user callback that runs inside a shared sequence (mappers, predicates,
//! accumulators, comparators, side effects, factories) goes through an
//! [`ErrorChannel`]. A failure is reported exactly once and replaced by a fallback,
//! so a long-lived sequence keeps running. Three containment policies exist:
//!
//! | Policy | Used by | On failure |
//! |---|---|---|
//! | [`contain_locally`](ErrorChannel::contain_locally) | per-element callbacks | report, return fallback |
//! | [`contain_or_rethrow`](ErrorChannel::contain_or_rethrow) | combiners whose failure ends the sequence | report, return `Err` |
//! | [`contain_or_fatal`](ErrorChannel::contain_or_fatal) | construction (merge, defer) | report, escalate, return fallback |
//!
//! Escalation invokes the channel's [`EscalationHook`] unless fatal escalation has
//! been suppressed. The default hook aborts the process from a background thread.
//!
//! ```
//! use futures::StreamExt;
//! use sharedseq_core::ErrorChannel;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let channel = ErrorChannel::new();
//! let mut reports = channel.subscribe();
//!
//! let value = channel.contain_locally("map", || -> i32 { panic!("bad input") }, -1);
//!
//! assert_eq!(value, -1);
//! let report = reports.next().await.unwrap();
//! assert_eq!(report.operator, "map");
//! # }
//! ```

use crate::{Result, SequenceError, SequenceSubject};
use futures::{stream, Stream, StreamExt};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Stream of reports returned by [`ErrorChannel::subscribe`].
pub type ReportStream = Pin<Box<dyn Stream<Item = ErrorReport> + Send + 'static>>;

/// Host-supplied reaction to a fatal report.
pub type EscalationHook = Arc<dyn Fn(&ErrorReport) + Send + Sync>;

/// Which containment policy produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// A per-element callback failed; the element was dropped or replaced.
    ElementCallback,
    /// A combiner failed and the failure ended its sequence.
    Propagated,
    /// Building a sequence failed; the failure was escalated as fatal.
    Construction,
}

/// A single contained failure.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    /// The failure itself
    pub error: SequenceError,
    /// Operator whose callback failed
    pub operator: &'static str,
    /// Containment policy that handled it
    pub class: ErrorClass,
}

impl ErrorReport {
    /// Create a report.
    pub fn new(error: SequenceError, operator: &'static str, class: ErrorClass) -> Self {
        Self {
            error,
            operator,
            class,
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}: {}", self.class, self.operator, self.error)
    }
}

struct ChannelInner {
    subject: SequenceSubject<ErrorReport>,
    fatal_suppressed: AtomicBool,
    escalation: EscalationHook,
}

/// Injectable sink for failures contained by shared sequences.
///
/// Cheap to clone; clones share subscribers, settings and escalation hook.
#[derive(Clone)]
pub struct ErrorChannel {
    inner: Arc<ChannelInner>,
}

impl ErrorChannel {
    /// A channel whose fatal escalation aborts the process.
    #[must_use]
    pub fn new() -> Self {
        Self::with_escalation(abort_in_background)
    }

    /// A channel escalating fatal reports through `hook`.
    #[must_use]
    pub fn with_escalation<H>(hook: H) -> Self
    where
        H: Fn(&ErrorReport) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(ChannelInner {
                subject: SequenceSubject::new(),
                fatal_suppressed: AtomicBool::new(false),
                escalation: Arc::new(hook),
            }),
        }
    }

    /// Stream of every report delivered after this call.
    pub fn subscribe(&self) -> ReportStream {
        match self.inner.subject.subscribe() {
            Ok(reports) => Box::pin(reports.filter_map(|item| async move { item.ok() })),
            Err(_) => Box::pin(stream::empty()),
        }
    }

    /// Number of report subscribers currently attached.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subject.subscriber_count()
    }

    /// Broadcast `report` to every subscriber. Never fails.
    pub fn report(&self, report: ErrorReport) {
        warn!("contained failure {}", report);
        // The subject is never closed, a send cannot fail
        let _ = self.inner.subject.next(report);
    }

    /// Run `action`; if it panics, report and return `fallback`.
    pub fn contain_locally<R>(
        &self,
        operator: &'static str,
        action: impl FnOnce() -> R,
        fallback: R,
    ) -> R {
        match panic::catch_unwind(AssertUnwindSafe(action)) {
            Ok(value) => value,
            Err(payload) => {
                self.report(ErrorReport::new(
                    SequenceError::from_panic(operator, payload.as_ref()),
                    operator,
                    ErrorClass::ElementCallback,
                ));
                fallback
            }
        }
    }

    /// Run a fallible `action`; if it returns `Err` or panics, report and return `fallback`.
    pub fn try_contain_locally<R, E>(
        &self,
        operator: &'static str,
        action: impl FnOnce() -> std::result::Result<R, E>,
        fallback: R,
    ) -> R
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let error = match panic::catch_unwind(AssertUnwindSafe(action)) {
            Ok(Ok(value)) => return value,
            Ok(Err(error)) => SequenceError::user_error(error),
            Err(payload) => SequenceError::from_panic(operator, payload.as_ref()),
        };

        self.report(ErrorReport::new(error, operator, ErrorClass::ElementCallback));
        fallback
    }

    /// Run `action`; if it panics, report and hand the failure back to the caller.
    ///
    /// # Errors
    ///
    /// Returns the reported [`SequenceError`] when `action` panics.
    pub fn contain_or_rethrow<R>(
        &self,
        operator: &'static str,
        action: impl FnOnce() -> R,
    ) -> Result<R> {
        panic::catch_unwind(AssertUnwindSafe(action)).map_err(|payload| {
            let error = SequenceError::from_panic(operator, payload.as_ref());
            self.report(ErrorReport::new(
                error.clone(),
                operator,
                ErrorClass::Propagated,
            ));
            error
        })
    }

    /// Run a construction `action`; if it panics, escalate via [`fatal`](Self::fatal)
    /// and return `fallback`.
    pub fn contain_or_fatal<R>(
        &self,
        operator: &'static str,
        action: impl FnOnce() -> R,
        fallback: R,
    ) -> R {
        match panic::catch_unwind(AssertUnwindSafe(action)) {
            Ok(value) => value,
            Err(payload) => {
                self.fatal(operator, SequenceError::from_panic(operator, payload.as_ref()));
                fallback
            }
        }
    }

    /// Report `error`, then escalate unless fatal escalation is suppressed.
    ///
    /// The escalation hook runs after the report has been delivered; the default
    /// hook never runs on the caller's thread.
    pub fn fatal(&self, operator: &'static str, error: SequenceError) {
        let report = ErrorReport::new(error, operator, ErrorClass::Construction);
        self.report(report.clone());

        if self.is_fatal_suppressed() {
            warn!("fatal escalation suppressed for {}", report);
            return;
        }

        error!("escalating fatal failure {}", report);
        (self.inner.escalation)(&report);
    }

    /// Enable or disable fatal escalation. Reports are delivered either way.
    pub fn set_fatal_suppressed(&self, suppressed: bool) {
        self.inner
            .fatal_suppressed
            .store(suppressed, Ordering::Release);
    }

    /// Returns `true` while fatal escalation is suppressed.
    #[must_use]
    pub fn is_fatal_suppressed(&self) -> bool {
        self.inner.fatal_suppressed.load(Ordering::Acquire)
    }
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ErrorChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorChannel")
            .field("subscribers", &self.subscriber_count())
            .field("fatal_suppressed", &self.is_fatal_suppressed())
            .finish_non_exhaustive()
    }
}

fn abort_in_background(report: &ErrorReport) {
    let description = report.to_string();
    let spawned = std::thread::Builder::new()
        .name("sharedseq-fatal".to_string())
        .spawn(move || {
            error!("unrecoverable sequence failure: {}", description);
            std::process::abort();
        });

    if spawned.is_err() {
        std::process::abort();
    }
}
