// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based operators for shared sequences.
//!
//! Timers are taken from a [`Scheduler`](sharedseq_core::Scheduler), never from a
//! global clock, so a flavor's timing operators run on the same execution context as
//! the rest of its emissions.
//!
//! Two layers are provided:
//!
//! - Stream adapters ([`DebounceExt`], [`DelayExt`]) usable on any `Stream` given a
//!   scheduler.
//! - [`SharedSequenceTimeExt`], adding `debounce` and `delay` to every
//!   [`SharedSequence`](sharedseq_stream::SharedSequence), scheduled with the
//!   flavor's own scheduler and shared like every other stage.
//!
//! ```rust
//! use sharedseq_stream_time::prelude::*;
//! use sharedseq_core::TokioScheduler;
//! use futures::{stream, StreamExt};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let scheduler = Arc::new(TokioScheduler::new());
//! let values: Vec<_> = stream::iter(vec![1, 2, 3])
//!     .debounce_on(Duration::from_millis(10), scheduler)
//!     .collect()
//!     .await;
//!
//! assert_eq!(values, vec![3]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

mod debounce;
mod delay;
mod shared_sequence_ext;

pub mod prelude;

pub use debounce::{DebounceExt, DebounceStream};
pub use delay::{DelayExt, DelayStream};
pub use shared_sequence_ext::SharedSequenceTimeExt;
