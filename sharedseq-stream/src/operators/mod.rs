// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Operators available on every flavor.
//!
//! Each operator returns a new [`SharedSequence`](crate::SharedSequence) of the same
//! flavor. User callbacks run through the flavor's
//! [`ErrorChannel`](sharedseq_core::ErrorChannel):
//!
//! | Operator | Failing callback |
//! |---|---|
//! | `map`, `try_map` | element dropped |
//! | `filter`, `try_filter` | element excluded |
//! | `scan` | accumulator kept, nothing emitted |
//! | `distinct_until_changed_by`, `_by_key` | element treated as changed |
//! | `do_on_*`, `debug` | reported, emission continues |
//! | `zip_with` | reported, the zipped sequence completes |
//! | `defer`, `merge` | escalated as fatal, empty sequence |

mod combine;
mod debug;
mod distinct_until_changed;
mod filter;
mod map;
mod scan;
mod side_effects;
mod start_with;
