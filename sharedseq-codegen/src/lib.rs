// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Build-time specializer for shared sequence flavors.
//!
//! Given the declared flavors, renders one module per flavor (the `Driver<T>` alias,
//! its `AsDriver` conversions and free constructors) and one module per ordered pair
//! of flavors (`DriverToSignal` and friends), plus an index module that includes
//! them all. Meant to run from a build script:
//!
//! ```no_run
//! use sharedseq_codegen::{write_modules, FlavorDeclaration, Specializer};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let specializer = Specializer::new(vec![
//!         FlavorDeclaration::new("Driver", "crate::flavors::DriverTraits"),
//!         FlavorDeclaration::new("Signal", "crate::flavors::SignalTraits"),
//!     ])?;
//!
//!     let out_dir = PathBuf::from(std::env::var("OUT_DIR")?);
//!     write_modules(&out_dir, &specializer.generate()?)?;
//!     Ok(())
//! }
//! ```
//!
//! and the including crate pulls the index in with
//! `include!(concat!(env!("OUT_DIR"), "/shared_sequences.rs"));`.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod declaration;
pub mod error;
pub mod specializer;
pub mod template;
pub mod writer;

pub use self::declaration::FlavorDeclaration;
pub use self::error::{CodegenError, Result};
pub use self::specializer::{GeneratedModule, Specializer, INDEX_FILE};
pub use self::template::Template;
pub use self::writer::write_modules;
