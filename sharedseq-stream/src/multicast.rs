// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Reference-counted multicast over a [`Source`].
//!
//! A [`Multicast`] turns a re-subscribable source into a hot sequence shared by any
//! number of subscribers:
//!
//! - The upstream is subscribed lazily, when the first subscriber arrives.
//! - Every subscriber sees the same emissions, in upstream order.
//! - When the last subscriber disposes, the upstream subscription is torn down.
//! - The next subscriber after a teardown, or after the upstream terminated, starts a
//!   brand-new upstream run (cold restart). A terminated upstream is never resumed.
//! - With [`ReplayPolicy::Latest`], a subscriber joining a live connection first
//!   receives the most recent value, queued ahead of every later live value.
//!
//! Connection lifecycle:
//!
//! ```text
//! Unconnected --first subscribe--> Connecting --task stored--> Connected
//!      ^                               |                          |
//!      +------ last dispose -----------+--------------------------+
//!      +------ upstream completes / fails (subscribers complete) -+
//! ```
//!
//! All transitions happen under one lock. Each connection carries a generation number;
//! a forwarding task or a late connect belonging to an older generation is ignored, so
//! a connection can neither be torn down twice nor leak.
//!
//! ```
//! use futures::StreamExt;
//! use sharedseq_core::TokioScheduler;
//! use sharedseq_stream::{share_replay_latest, Source};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let shared = share_replay_latest(Source::from_values(vec![1, 2, 3]), TokioScheduler::new());
//!
//! let first = shared.subscribe();
//! let second = shared.subscribe();
//!
//! assert_eq!(first.collect::<Vec<_>>().await, vec![1, 2, 3]);
//! assert_eq!(second.collect::<Vec<_>>().await, vec![1, 2, 3]);
//! # }
//! ```

use crate::Source;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::future::{select, Either};
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use sharedseq_core::{Element, Scheduler, SequenceError, SequenceTask, StreamItem};
use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// What a subscriber joining a live connection receives before live values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayPolicy {
    /// The most recent value, if any.
    Latest,
    /// Nothing.
    Nothing,
}

/// Cache-latest-and-multicast share policy.
pub fn share_replay_latest<T, S>(source: Source<T>, scheduler: S) -> Multicast<T>
where
    T: Element,
    S: Scheduler,
{
    Multicast::new(source, Arc::new(scheduler), ReplayPolicy::Latest)
}

/// Multicast-no-replay share policy.
pub fn share_publish<T, S>(source: Source<T>, scheduler: S) -> Multicast<T>
where
    T: Element,
    S: Scheduler,
{
    Multicast::new(source, Arc::new(scheduler), ReplayPolicy::Nothing)
}

enum Connection {
    Unconnected,
    Connecting,
    Connected(SequenceTask),
}

struct ConnectionState<T> {
    connection: Connection,
    generation: u64,
    next_subscriber_id: u64,
    subscribers: Vec<(u64, UnboundedSender<T>)>,
    latest: Option<T>,
}

struct Shared<T> {
    source: Source<T>,
    scheduler: Arc<dyn Scheduler>,
    replay: ReplayPolicy,
    state: Mutex<ConnectionState<T>>,
}

/// A hot, reference-counted view of a [`Source`].
///
/// Cheap to clone; clones share the connection.
pub struct Multicast<T: Element> {
    shared: Arc<Shared<T>>,
}

impl<T: Element> Multicast<T> {
    /// Share `source`, forwarding emissions from a task spawned on `scheduler`.
    pub fn new(source: Source<T>, scheduler: Arc<dyn Scheduler>, replay: ReplayPolicy) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                scheduler,
                replay,
                state: Mutex::new(ConnectionState {
                    connection: Connection::Unconnected,
                    generation: 0,
                    next_subscriber_id: 0,
                    subscribers: Vec::new(),
                    latest: None,
                }),
            }),
        }
    }

    /// Attach a subscriber, connecting the upstream if it is the first one.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded();

        let (id, connect) = {
            let mut state = self.shared.state.lock();
            let id = state.next_subscriber_id;
            state.next_subscriber_id += 1;

            if let Some(latest) = &state.latest {
                // Queued under the lock, so it precedes any value forwarded later
                let _ = tx.unbounded_send(latest.clone());
            }
            state.subscribers.push((id, tx));

            let connect = match state.connection {
                Connection::Unconnected => {
                    state.generation += 1;
                    state.connection = Connection::Connecting;
                    Some(state.generation)
                }
                Connection::Connecting | Connection::Connected(_) => None,
            };
            (id, connect)
        };

        if let Some(generation) = connect {
            Shared::connect(&self.shared, generation);
        }

        Subscription {
            receiver: rx,
            shared: Some(self.shared.clone()),
            id,
        }
    }

    /// Number of subscribers attached to the current connection.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().subscribers.len()
    }

    /// Returns `true` while an upstream subscription exists.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        !matches!(
            self.shared.state.lock().connection,
            Connection::Unconnected
        )
    }

    /// Replay policy this multicast was built with.
    #[must_use]
    pub fn replay_policy(&self) -> ReplayPolicy {
        self.shared.replay
    }
}

impl<T: Element> Shared<T> {
    fn connect(this: &Arc<Self>, generation: u64) {
        debug!("connecting upstream (generation {})", generation);
        let upstream = match panic::catch_unwind(AssertUnwindSafe(|| this.source.subscribe())) {
            Ok(upstream) => upstream,
            Err(payload) => {
                // Nothing was spawned: roll back to Unconnected and complete the waiters
                this.terminate(
                    generation,
                    Some(SequenceError::from_panic("connect", payload.as_ref())),
                );
                return;
            }
        };
        let forwarder = this.clone();

        let task = SequenceTask::spawn_on(this.scheduler.as_ref(), move |cancel| async move {
            let mut upstream = upstream;
            loop {
                match select(upstream.next(), cancel.cancelled()).await {
                    Either::Left((Some(StreamItem::Value(value)), _)) => {
                        if !forwarder.forward(generation, value) {
                            break;
                        }
                    }
                    Either::Left((Some(StreamItem::Error(error)), _)) => {
                        forwarder.terminate(generation, Some(error));
                        break;
                    }
                    Either::Left((None, _)) => {
                        forwarder.terminate(generation, None);
                        break;
                    }
                    Either::Right(_) => break,
                }
            }
        });

        let stale = {
            let mut state = this.state.lock();
            if state.generation == generation && matches!(state.connection, Connection::Connecting)
            {
                state.connection = Connection::Connected(task);
                None
            } else {
                // Disconnected or terminated while connecting
                Some(task)
            }
        };
        drop(stale);
    }

    fn forward(&self, generation: u64, value: T) -> bool {
        let connection = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return false;
            }

            if self.replay == ReplayPolicy::Latest {
                state.latest = Some(value.clone());
            }
            state
                .subscribers
                .retain(|(_, tx)| tx.unbounded_send(value.clone()).is_ok());

            if !state.subscribers.is_empty() {
                return true;
            }
            Self::disconnect(&mut state)
        };

        debug!("every subscriber is gone, disconnecting upstream");
        drop(connection);
        false
    }

    /// Leave the current generation; the caller drops the returned connection
    /// outside the lock.
    fn disconnect(state: &mut ConnectionState<T>) -> Connection {
        state.generation += 1;
        state.latest = None;
        mem::replace(&mut state.connection, Connection::Unconnected)
    }

    fn terminate(&self, generation: u64, error: Option<SequenceError>) {
        let (subscribers, connection) = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return;
            }
            (mem::take(&mut state.subscribers), Self::disconnect(&mut state))
        };

        match error {
            Some(error) => warn!(
                "upstream failed, completing {} subscribers: {}",
                subscribers.len(),
                error
            ),
            None => debug!(
                "upstream completed, completing {} subscribers",
                subscribers.len()
            ),
        }

        // Dropping the senders completes every subscriber stream
        drop(subscribers);
        drop(connection);
    }

    fn unsubscribe(&self, id: u64) {
        let connection = {
            let mut state = self.state.lock();
            state.subscribers.retain(|(subscriber, _)| *subscriber != id);

            // This subscriber may already be pruned by forward
            if state.subscribers.is_empty()
                && !matches!(state.connection, Connection::Unconnected)
            {
                Some(Self::disconnect(&mut state))
            } else {
                None
            }
        };

        if let Some(connection) = connection {
            debug!("last subscriber left, disconnecting upstream");
            // Dropping the task handle cancels the forwarding task
            drop(connection);
        }
    }
}

impl<T: Element> Clone for Multicast<T> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<T: Element> fmt::Debug for Multicast<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multicast")
            .field("replay", &self.shared.replay)
            .field("subscribers", &self.subscriber_count())
            .field("connected", &self.is_connected())
            .finish()
    }
}

/// One subscriber's view of a [`Multicast`].
///
/// A stream of the shared values that ends when the upstream terminates. Disposing
/// (explicitly or by dropping) detaches the subscriber; the last one to leave tears
/// the upstream down.
#[must_use = "dropping a Subscription disposes it"]
pub struct Subscription<T: Element> {
    receiver: UnboundedReceiver<T>,
    shared: Option<Arc<Shared<T>>>,
    id: u64,
}

impl<T: Element> Subscription<T> {
    /// Detach from the multicast. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(shared) = self.shared.take() {
            // Unsubscribe first: forward prunes closed receivers on its own
            shared.unsubscribe(self.id);
            self.receiver.close();
        }
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.is_none()
    }
}

impl<T: Element> Stream for Subscription<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        if self.is_disposed() {
            return Poll::Ready(None);
        }
        self.receiver.poll_next_unpin(cx)
    }
}

impl<T: Element> Drop for Subscription<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl<T: Element> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
