// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharedseq_codegen::{FlavorDeclaration, GeneratedModule, Specializer, Template, INDEX_FILE};

fn driver_and_signal() -> Vec<FlavorDeclaration> {
    vec![
        FlavorDeclaration::new("Driver", "crate::flavors::DriverTraits"),
        FlavorDeclaration::new("Signal", "crate::flavors::SignalTraits"),
    ]
}

fn find<'a>(modules: &'a [GeneratedModule], file_name: &str) -> &'a GeneratedModule {
    modules
        .iter()
        .find(|module| module.file_name == file_name)
        .unwrap_or_else(|| panic!("{file_name} was not generated"))
}

#[test]
fn test_generates_flavor_pair_and_index_modules_in_order() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let files: Vec<_> = modules.iter().map(|module| module.file_name.as_str()).collect();
    assert_eq!(
        files,
        vec![
            "driver.rs",
            "signal.rs",
            "driver_to_driver.rs",
            "driver_to_signal.rs",
            "signal_to_driver.rs",
            "signal_to_signal.rs",
            INDEX_FILE,
        ]
    );
    Ok(())
}

#[test]
fn test_flavor_module_binds_alias_policy_and_conversions() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let driver = &find(&modules, "driver.rs").source;
    assert!(driver.contains("pub type Driver<T> = SharedSequence<DriverPolicy, T>;"));
    assert!(driver.contains("impl SharingPolicy for DriverPolicy {"));
    assert!(driver.contains("const NAME: &'static str = \"Driver\";"));
    assert!(driver.contains("type Scheduler = <crate::flavors::DriverTraits as SharingPolicy>::Scheduler;"));
    assert!(driver.contains("pub trait AsDriver<T: Element>"));
    assert!(driver.contains("fn as_driver_or_return(self, value: T) -> Driver<T>;"));
    assert!(driver.contains("<crate::flavors::DriverTraits as ::sharedseq_stream::SharingPolicy>::scheduler()"));
    assert!(!driver.contains("${"));
    Ok(())
}

#[test]
fn test_self_pair_is_generated() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let self_pair = find(&modules, "signal_to_signal.rs");
    assert_eq!(self_pair.module_name, "signal_to_signal");
    assert!(self_pair.source.contains("pub trait SignalToSignal<T: Element>"));
    assert!(self_pair.source.contains("fn flat_map_signal<U, S>"));
    Ok(())
}

#[test]
fn test_pair_module_keeps_primary_flavor_for_with_latest_from() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let pair = &find(&modules, "signal_to_driver.rs").source;
    assert!(pair.contains("other: &super::driver::Driver<U>,\n    ) -> super::signal::Signal<(T, U)>;"));
    assert!(pair.contains("fn into_driver(&self) -> super::driver::Driver<T>;"));
    Ok(())
}

#[test]
fn test_index_includes_and_reexports_every_module() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let index = &find(&modules, INDEX_FILE).source;
    assert!(index.contains("pub mod driver {\n    include!(concat!(env!(\"OUT_DIR\"), \"/driver.rs\"));\n}"));
    assert!(index.contains("pub mod signal_to_driver {"));
    assert!(index.contains("pub use self::driver::{AsDriver, Driver, DriverPolicy};"));
    assert!(index.contains("pub use self::driver_to_signal::DriverToSignal;"));
    assert_eq!(index.matches("pub mod ").count(), 6);
    Ok(())
}

#[test]
fn test_generation_is_deterministic() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?;

    // Act
    let first = specializer.generate()?;
    let second = Specializer::new(driver_and_signal())?.generate()?;

    // Assert
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_targets_restrict_pairs() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(vec![
        FlavorDeclaration::new("Driver", "crate::DriverTraits").with_targets(["Signal"]),
        FlavorDeclaration::new("Signal", "crate::SignalTraits").with_targets(Vec::<String>::new()),
    ])?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let files: Vec<_> = modules.iter().map(|module| module.file_name.as_str()).collect();
    assert_eq!(files, vec!["driver.rs", "signal.rs", "driver_to_signal.rs", INDEX_FILE]);
    Ok(())
}

#[test]
fn test_scheduler_and_share_overrides_are_substituted() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(vec![FlavorDeclaration::new("Ui", "crate::UiTraits")
        .with_scheduler("::sharedseq_core::TokioScheduler::new()")
        .with_share("|source| ::sharedseq_stream::share_publish(source, scheduler())")])?;

    // Act
    let modules = specializer.generate()?;

    // Assert
    let ui = &find(&modules, "ui.rs").source;
    assert!(ui.contains(
        "pub fn scheduler() -> <crate::UiTraits as SharingPolicy>::Scheduler {\n    ::sharedseq_core::TokioScheduler::new()\n}"
    ));
    assert!(ui.contains("fn share<T: Element>(source: Source<T>) -> Multicast<T> {\n        share(source)\n    }"));
    assert!(ui.contains("(|source| ::sharedseq_stream::share_publish(source, scheduler()))(source)"));
    Ok(())
}

#[test]
fn test_custom_templates_replace_builtins() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(driver_and_signal())?.with_templates(
        Template::new("flavor", "// ${Flavor} uses ${Policy}\n"),
        Template::new("pair", "// ${Flavor} -> ${Target}\n"),
    );

    // Act
    let modules = specializer.generate()?;

    // Assert
    assert_eq!(
        find(&modules, "driver.rs").source,
        "// Driver uses crate::flavors::DriverTraits\n"
    );
    assert_eq!(find(&modules, "signal_to_driver.rs").source, "// Signal -> Driver\n");
    Ok(())
}
