// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sharedseq_codegen::{CodegenError, FlavorDeclaration, Specializer, Template};

#[test]
fn test_empty_declarations_are_rejected() {
    assert!(matches!(Specializer::new(Vec::new()), Err(CodegenError::NoFlavors)));
}

#[test]
fn test_duplicate_flavor_is_rejected() {
    // Arrange
    let declarations = vec![
        FlavorDeclaration::new("Driver", "crate::A"),
        FlavorDeclaration::new("Signal", "crate::B"),
        FlavorDeclaration::new("Driver", "crate::C"),
    ];

    // Act
    let result = Specializer::new(declarations);

    // Assert
    assert!(matches!(result, Err(CodegenError::DuplicateFlavor(name)) if name == "Driver"));
}

#[test]
fn test_invalid_flavor_name_is_rejected() {
    // Arrange
    let declarations = vec![FlavorDeclaration::new("driver", "crate::A")];

    // Act
    let result = Specializer::new(declarations);

    // Assert
    assert!(matches!(result, Err(CodegenError::InvalidFlavorName(name)) if name == "driver"));
}

#[test]
fn test_undeclared_target_is_rejected() {
    // Arrange
    let declarations =
        vec![FlavorDeclaration::new("Driver", "crate::A").with_targets(["Driver", "Signal"])];

    // Act
    let result = Specializer::new(declarations);

    // Assert
    assert!(matches!(
        result,
        Err(CodegenError::UndeclaredFlavor { flavor, target }) if flavor == "Driver" && target == "Signal"
    ));
}

#[test]
fn test_pair_placeholder_in_flavor_template_fails_generation() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(vec![FlavorDeclaration::new("Driver", "crate::A")])?
        .with_templates(
            Template::new("flavor", "${Flavor} into ${Target}"),
            Template::new("pair", ""),
        );

    // Act
    let result = specializer.generate();

    // Assert
    assert!(matches!(
        result,
        Err(CodegenError::UnknownPlaceholder { template, name }) if template == "flavor" && name == "Target"
    ));
    Ok(())
}

#[test]
fn test_unterminated_placeholder_fails_generation() -> anyhow::Result<()> {
    // Arrange
    let specializer = Specializer::new(vec![FlavorDeclaration::new("Driver", "crate::A")])?
        .with_templates(Template::new("flavor", "ok"), Template::new("pair", "${Flavor"));

    // Act
    let result = specializer.generate();

    // Assert
    assert!(matches!(
        result,
        Err(CodegenError::UnterminatedPlaceholder { template, offset: 0 }) if template == "pair"
    ));
    Ok(())
}

#[test]
fn test_errors_render_readable_messages() {
    let error = CodegenError::UnknownPlaceholder {
        template: "flavor".to_owned(),
        name: "Target".to_owned(),
    };

    assert_eq!(error.to_string(), "template `flavor` uses unknown placeholder `${Target}`");
}
