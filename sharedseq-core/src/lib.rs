// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Core types shared by every sharedseq crate.
//!
//! - [`StreamItem`]: a value or a [`SequenceError`] flowing out of an upstream producer
//! - [`ErrorChannel`]: the injectable sink that receives every contained failure
//! - [`SequenceSubject`]: hot broadcast used by the error channel and by hot sources
//! - [`SequenceTask`] and [`CancellationToken`]: cancellable background work
//! - [`Scheduler`]: the execution context a flavor delivers its emissions on

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

#[macro_use]
mod logging;

pub mod cancellation_token;
pub mod element;
pub mod error_channel;
pub mod scheduler;
pub mod sequence_error;
pub mod sequence_subject;
pub mod sequence_task;
pub mod stream_item;
pub mod subject_error;

pub use self::cancellation_token::CancellationToken;
pub use self::element::Element;
pub use self::error_channel::{ErrorChannel, ErrorClass, ErrorReport, EscalationHook, ReportStream};
#[cfg(feature = "runtime-tokio")]
pub use self::scheduler::TokioScheduler;
pub use self::scheduler::{ScheduledFuture, Scheduler};
pub use self::sequence_error::{Result, SequenceError};
pub use self::sequence_subject::{SequenceSubject, SubjectBoxStream};
pub use self::sequence_task::SequenceTask;
pub use self::stream_item::StreamItem;
pub use self::subject_error::SubjectError;
