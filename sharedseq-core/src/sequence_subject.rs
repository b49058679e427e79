// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subject.
//!
//! A [`SequenceSubject`] broadcasts each [`StreamItem<T>`] to all active subscribers.
//! It backs the [`ErrorChannel`](crate::ErrorChannel) and serves as a hot event source
//! (text input, clicks) feeding shared sequences.
//!
//! - **Hot**: late subscribers only receive items sent after subscribing.
//! - **Unbounded**: one unbounded mpsc channel per subscriber, no backpressure.
//! - **Cheap to clone**: all clones share the same state.
//! - **Error/close**: an error is delivered to every subscriber and closes the subject.
//!
//! ```
//! use sharedseq_core::{SequenceSubject, StreamItem};
//! use futures::StreamExt;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let subject = SequenceSubject::<i32>::new();
//! let mut stream = subject.subscribe().unwrap();
//!
//! subject.next(1).unwrap();
//! subject.close();
//!
//! assert_eq!(stream.next().await, Some(StreamItem::Value(1)));
//! assert_eq!(stream.next().await, None);
//! # }
//! ```

use crate::{SequenceError, StreamItem, SubjectError};
use futures::channel::mpsc::{self, UnboundedSender};
use futures::Stream;
use parking_lot::Mutex;
use std::pin::Pin;
use std::sync::Arc;

/// Stream handed out by [`SequenceSubject::subscribe`].
pub type SubjectBoxStream<T> = Pin<Box<dyn Stream<Item = StreamItem<T>> + Send + 'static>>;

struct SubjectState<T> {
    closed: bool,
    senders: Vec<UnboundedSender<StreamItem<T>>>,
}

/// A hot, unbounded subject that broadcasts items to all current subscribers.
pub struct SequenceSubject<T: Clone + Send + 'static> {
    state: Arc<Mutex<SubjectState<T>>>,
}

impl<T: Clone + Send + 'static> SequenceSubject<T> {
    /// Creates an open subject with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SubjectState {
                closed: false,
                senders: Vec::new(),
            })),
        }
    }

    /// Subscribe and receive every item sent from now on.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn subscribe(&self) -> Result<SubjectBoxStream<T>, SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        let (tx, rx) = mpsc::unbounded();
        state.senders.push(tx);
        Ok(Box::pin(rx))
    }

    /// Send an item to all active subscribers, pruning the ones that went away.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn send(&self, item: StreamItem<T>) -> Result<(), SubjectError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(SubjectError::Closed);
        }

        state
            .senders
            .retain(|tx| tx.unbounded_send(item.clone()).is_ok());
        Ok(())
    }

    /// Send a value to all active subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject has been closed.
    pub fn next(&self, value: T) -> Result<(), SubjectError> {
        self.send(StreamItem::Value(value))
    }

    /// Send an error to all subscribers and close the subject.
    ///
    /// # Errors
    ///
    /// Returns [`SubjectError::Closed`] if the subject was already closed.
    pub fn error(&self, err: SequenceError) -> Result<(), SubjectError> {
        let result = self.send(StreamItem::Error(err));
        self.close();
        result
    }

    /// Closes the subject, completing every subscriber stream. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.senders.clear();
    }

    /// Returns `true` once the subject has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of subscribers still attached.
    ///
    /// Dropped subscribers are pruned on the next `send()`.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.lock().senders.len()
    }
}

impl<T: Clone + Send + 'static> Default for SequenceSubject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + 'static> Clone for SequenceSubject<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}
