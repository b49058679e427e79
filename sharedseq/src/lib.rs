// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # SharedSequence
//!
//! Shared sequences that cannot fail. A `Driver<T>` or a `Signal<T>` is a hot,
//! reference-counted stream of `T`: the first subscriber connects the upstream,
//! every subscriber sees the same values, the last one to leave disconnects it.
//!
//! ## Flavors
//!
//! | Flavor | Late subscriber receives | Typical use |
//! |---|---|---|
//! | [`Driver`] | the latest value, then live values | state |
//! | [`Signal`] | live values only | events |
//!
//! Each flavor has its own type, its own conversions (`AsDriver`, `AsSignal`) and
//! its own cross-flavor combinators (`DriverToSignal::flat_map_signal`, ...), all
//! generated at build time by `sharedseq-codegen`.
//!
//! ## Failures
//!
//! An upstream [`Source`] may fail; converting it into a flavor fixes what its error
//! becomes. A failing callback inside an operator is contained: the element is
//! dropped (or the stage completes) and a report goes to
//! [`flavors::error_channel`].
//!
//! ```
//! use futures::StreamExt;
//! use sharedseq::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let numbers: Driver<i32> = Source::from_values(vec![1, 2, 3]).as_driver_complete_on_error();
//! let doubled = numbers.map(|x| x * 2);
//!
//! assert_eq!(doubled.subscribe().collect::<Vec<_>>().await, vec![2, 4, 6]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod flavors;

include!(concat!(env!("OUT_DIR"), "/shared_sequences.rs"));

pub use sharedseq_core::{
    ErrorChannel, ErrorClass, ErrorReport, ReportStream, SequenceError, SequenceSubject, StreamItem,
};
pub use sharedseq_stream::{DriveHandle, SharedSequence, SharingPolicy, Source, Subscription};
pub use sharedseq_stream_time::SharedSequenceTimeExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AsDriver, AsSignal, Driver, Signal};
    pub use crate::{DriverToDriver, DriverToSignal, SignalToDriver, SignalToSignal};
    pub use sharedseq_stream::{DriveHandle, Source};
    pub use sharedseq_stream_time::SharedSequenceTimeExt;
}
