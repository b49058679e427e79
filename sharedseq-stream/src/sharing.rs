// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flavor declaration.
//!
//! A flavor is a zero-sized marker type implementing [`SharingPolicy`]. It fixes the
//! execution context emissions are delivered on, the share policy applied at every
//! construction, and the [`ErrorChannel`] receiving contained failures. Sequences of
//! different flavors are different types and never mix implicitly.
//!
//! ```
//! use sharedseq_core::{ErrorChannel, Element, TokioScheduler};
//! use sharedseq_stream::{share_publish, Multicast, SharingPolicy, Source};
//!
//! struct Clicks;
//!
//! impl SharingPolicy for Clicks {
//!     const NAME: &'static str = "Clicks";
//!     type Scheduler = TokioScheduler;
//!
//!     fn scheduler() -> TokioScheduler {
//!         TokioScheduler::new()
//!     }
//!
//!     fn share<T: Element>(source: Source<T>) -> Multicast<T> {
//!         share_publish(source, Self::scheduler())
//!     }
//!
//!     fn error_channel() -> ErrorChannel {
//!         ErrorChannel::new()
//!     }
//! }
//! ```

use crate::{Multicast, Source};
use sharedseq_core::{Element, ErrorChannel, Scheduler};

/// Per-flavor policy: scheduler, share function and error channel.
pub trait SharingPolicy: Send + Sync + 'static {
    /// Flavor name, used in logs and diagnostics.
    const NAME: &'static str;

    /// Execution context of this flavor.
    type Scheduler: Scheduler + Clone;

    /// The scheduler every connection of this flavor forwards on.
    fn scheduler() -> Self::Scheduler;

    /// Share `source` according to this flavor's multicast policy.
    fn share<T: Element>(source: Source<T>) -> Multicast<T>;

    /// Channel receiving the failures contained by this flavor's operators.
    fn error_channel() -> ErrorChannel;
}
