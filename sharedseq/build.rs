// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharedseq_codegen::{write_modules, FlavorDeclaration, Specializer, INDEX_FILE};
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    let out_dir = PathBuf::from(env::var("OUT_DIR")?);

    let specializer = Specializer::new(vec![
        FlavorDeclaration::new("Driver", "crate::flavors::DriverTraits"),
        FlavorDeclaration::new("Signal", "crate::flavors::SignalTraits"),
    ])?;
    write_modules(&out_dir, &specializer.generate()?)?;

    // Driver with overridden scheduler and share function, included only by
    // tests/flavor_override_tests.rs. Its index would clobber the crate's.
    let overridden = Specializer::new(vec![FlavorDeclaration::new(
        "PublishedDriver",
        "::sharedseq::flavors::DriverTraits",
    )
    .with_scheduler("::sharedseq_core::TokioScheduler::new()")
    .with_share("|source| ::sharedseq_stream::share_publish(source, scheduler())")
    .with_targets(Vec::<String>::new())])?;
    let modules: Vec<_> = overridden
        .generate()?
        .into_iter()
        .filter(|module| module.file_name != INDEX_FILE)
        .collect();
    write_modules(&out_dir, &modules)?;

    Ok(())
}
