// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// Bound shared by every element carried by a shared sequence.
///
/// Elements are cloned once per subscriber (and once more into the replay
/// buffer of cache-latest flavors) and cross threads with the forwarding task.
pub trait Element: Clone + Send + Sync + 'static {}

impl<T> Element for T where T: Clone + Send + Sync + 'static {}
