// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combinators crossing from one flavor to another.
//!
//! Defined for every ordered pair of flavors `(F, G)`, `F == G` included. The flavor
//! of the result is fixed by the sequences the callback produces (`flat_map`,
//! `switch_map`, `switch_on_next`) or named explicitly (`into_flavor`).
//! `with_latest_from` keeps the flavor of the primary sequence, which drives its
//! emissions.

mod flat_map;
mod switch_map;
mod with_latest_from;

pub use self::switch_map::SwitchMapStream;
pub use self::with_latest_from::WithLatestFromStream;

use crate::{SharedSequence, SharingPolicy};
use sharedseq_core::Element;

impl<F: SharingPolicy, T: Element> SharedSequence<F, T> {
    /// Re-share this sequence under flavor `G`.
    pub fn into_flavor<G: SharingPolicy>(&self) -> SharedSequence<G, T> {
        self.derive(|parent| parent.subscribe())
    }
}
