// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the sharedseq workspace.
//!
//! Production code builds sequences from re-subscribable sources. Tests usually want
//! the opposite: an imperative handle to push values in and a way to observe how
//! often the producer was subscribed and torn down. This crate provides both.
//!
//! - [`test_channel`] / [`test_channel_with_errors`]: push values into a stream
//! - [`CountingSource`]: a producer that counts subscriptions and disposals
//! - [`helpers`]: assertion helpers with timeouts
//!
//! ```rust
//! use sharedseq_test_utils::CountingSource;
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let source = CountingSource::from_values(vec![1, 2]);
//!
//! let values: Vec<_> = source.subscribe().collect().await;
//!
//! assert_eq!(values.len(), 2);
//! assert_eq!(source.subscriptions(), 1);
//! assert_eq!(source.disposals(), 1);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod counting_source;
pub mod helpers;

use futures::{Stream, StreamExt};
use sharedseq_core::StreamItem;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub use counting_source::CountingSource;
pub use helpers::{assert_no_element_emitted, assert_stream_ended, unwrap_next};

/// Creates a test channel that wraps every sent value in `StreamItem::Value`.
///
/// ```rust
/// use sharedseq_test_utils::test_channel;
/// use sharedseq_core::StreamItem;
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel();
///
/// tx.send(42).unwrap();
///
/// assert_eq!(stream.next().await, Some(StreamItem::Value(42)));
/// # }
/// ```
pub fn test_channel<T: Send + 'static>() -> (
    mpsc::UnboundedSender<T>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx).map(StreamItem::Value);
    (tx, stream)
}

/// Creates a test channel accepting `StreamItem<T>`, so tests can inject errors.
///
/// ```rust
/// use sharedseq_test_utils::test_channel_with_errors;
/// use sharedseq_core::{SequenceError, StreamItem};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let (tx, mut stream) = test_channel_with_errors();
///
/// tx.send(StreamItem::Value(1)).unwrap();
/// tx.send(StreamItem::Error(SequenceError::stream_error("offline"))).unwrap();
///
/// assert!(stream.next().await.unwrap().is_value());
/// assert!(stream.next().await.unwrap().is_error());
/// # }
/// ```
pub fn test_channel_with_errors<T: Send + 'static>() -> (
    mpsc::UnboundedSender<StreamItem<T>>,
    impl Stream<Item = StreamItem<T>> + Send,
) {
    let (tx, rx) = mpsc::unbounded_channel();
    let stream = UnboundedReceiverStream::new(rx);
    (tx, stream)
}
