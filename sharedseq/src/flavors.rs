// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The flavors this crate declares.
//!
//! - [`Driver`](crate::Driver): cache-latest. A late subscriber first receives the
//!   most recent value. Meant for state (the text of a field, the current results).
//! - [`Signal`](crate::Signal): no replay. A late subscriber only sees later values.
//!   Meant for events (taps, navigation requests).
//!
//! Both deliver on the ambient tokio runtime and report contained failures to the
//! same [`ErrorChannel`], returned by [`error_channel`].

use sharedseq_core::{Element, ErrorChannel, TokioScheduler};
use sharedseq_stream::{share_publish, share_replay_latest, Multicast, SharingPolicy, Source};
use std::sync::LazyLock;

static ERROR_CHANNEL: LazyLock<ErrorChannel> = LazyLock::new(ErrorChannel::new);

/// The channel receiving every failure contained by a `Driver` or a `Signal`.
pub fn error_channel() -> ErrorChannel {
    ERROR_CHANNEL.clone()
}

/// Base policy of the [`Driver`](crate::Driver) flavor.
///
/// The generated [`DriverPolicy`](crate::DriverPolicy) takes its scheduler, share
/// function and error channel from here.
#[derive(Debug, Clone, Copy)]
pub struct DriverTraits;

impl SharingPolicy for DriverTraits {
    const NAME: &'static str = "Driver";
    type Scheduler = TokioScheduler;

    fn scheduler() -> TokioScheduler {
        TokioScheduler::new()
    }

    fn share<T: Element>(source: Source<T>) -> Multicast<T> {
        share_replay_latest(source, Self::scheduler())
    }

    fn error_channel() -> ErrorChannel {
        error_channel()
    }
}

/// Base policy of the [`Signal`](crate::Signal) flavor.
///
/// The generated [`SignalPolicy`](crate::SignalPolicy) takes its scheduler, share
/// function and error channel from here.
#[derive(Debug, Clone, Copy)]
pub struct SignalTraits;

impl SharingPolicy for SignalTraits {
    const NAME: &'static str = "Signal";
    type Scheduler = TokioScheduler;

    fn scheduler() -> TokioScheduler {
        TokioScheduler::new()
    }

    fn share<T: Element>(source: Source<T>) -> Multicast<T> {
        share_publish(source, Self::scheduler())
    }

    fn error_channel() -> ErrorChannel {
        error_channel()
    }
}
