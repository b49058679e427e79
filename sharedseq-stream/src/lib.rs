// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Flavored shared sequences.
//!
//! A [`SharedSequence<F, T>`] is an asynchronous sequence of `T` with a *flavor* `F`.
//! The flavor, a marker type implementing [`SharingPolicy`], decides:
//!
//! - how the sequence is multicast ([`share_replay_latest`] or [`share_publish`]),
//! - which [`Scheduler`](sharedseq_core::Scheduler) delivers its emissions,
//! - which [`ErrorChannel`](sharedseq_core::ErrorChannel) receives contained failures.
//!
//! # Guarantees
//!
//! - **Shared at every stage**: constructing any sequence applies `F::share` once, so
//!   extra subscribers never re-run upstream work, whichever stage they attach to.
//! - **Never fails**: producers are converted with an explicit error policy
//!   (`on_error_just_return`, `on_error_resume_next`, `on_error_resume_with`,
//!   `on_error_complete`); after that no subscriber observes an error.
//! - **Contained callbacks**: a panicking mapper, predicate, accumulator or side
//!   effect is reported to the error channel and the sequence keeps running.
//! - **Reference counted**: the upstream connects on the first subscriber, disconnects
//!   after the last one and restarts cold on the next.
//!
//! # Example
//!
//! ```
//! use futures::StreamExt;
//! use sharedseq_core::{Element, ErrorChannel, SequenceError, StreamItem, TokioScheduler};
//! use sharedseq_stream::{share_replay_latest, Multicast, SharedSequence, SharingPolicy, Source};
//!
//! struct Cached;
//!
//! impl SharingPolicy for Cached {
//!     const NAME: &'static str = "Cached";
//!     type Scheduler = TokioScheduler;
//!     fn scheduler() -> TokioScheduler { TokioScheduler::new() }
//!     fn share<T: Element>(source: Source<T>) -> Multicast<T> {
//!         share_replay_latest(source, Self::scheduler())
//!     }
//!     fn error_channel() -> ErrorChannel { ErrorChannel::new() }
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = Source::from_items(vec![
//!     StreamItem::Value(1),
//!     StreamItem::Value(2),
//!     StreamItem::Error(SequenceError::stream_error("offline")),
//! ]);
//!
//! let doubled = SharedSequence::<Cached, i32>::on_error_just_return(source, 0).map(|x| x * 2);
//!
//! assert_eq!(doubled.subscribe().collect::<Vec<_>>().await, vec![2, 4, 0]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod conversion;
pub mod cross_flavor;
pub mod drive;
pub mod multicast;
pub mod operators;
pub mod shared_sequence;
pub mod sharing;
pub mod source;

pub use self::cross_flavor::{SwitchMapStream, WithLatestFromStream};
pub use self::drive::DriveHandle;
pub use self::multicast::{share_publish, share_replay_latest, Multicast, ReplayPolicy, Subscription};
pub use self::shared_sequence::SharedSequence;
pub use self::sharing::SharingPolicy;
pub use self::source::{SequenceStream, Source};
