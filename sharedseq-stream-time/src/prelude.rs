// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude re-exporting every time-based extension trait.
//!
//! ```ignore
//! use sharedseq_stream_time::prelude::*;
//!
//! let settled = query.debounce(Duration::from_millis(300)).delay(Duration::from_millis(10));
//! ```

pub use crate::debounce::DebounceExt;
pub use crate::delay::DelayExt;
pub use crate::shared_sequence_ext::SharedSequenceTimeExt;
