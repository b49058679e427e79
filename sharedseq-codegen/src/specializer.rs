// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::declaration::FlavorDeclaration;
use crate::error::{CodegenError, Result};
use crate::template::{placeholder_pattern, Bindings, Template};
use regex::Regex;
use std::collections::HashSet;

/// Name of the index module that declares every generated module.
pub const INDEX_FILE: &str = "shared_sequences.rs";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// File name inside the output directory
    pub file_name: String,
    /// Module the file is included into
    pub module_name: String,
    /// Rust source
    pub source: String,
}

/// Instantiates the flavor template once per declared flavor and the pair template
/// once per ordered pair of flavors, self pairs included.
///
/// Generation is pure: the same declarations always produce the same modules, in
/// the same order (flavors, then pairs, then the index).
#[derive(Debug, Clone)]
pub struct Specializer {
    declarations: Vec<FlavorDeclaration>,
    flavor_template: Template,
    pair_template: Template,
    pattern: Regex,
}

impl Specializer {
    /// Validate `declarations` and prepare the built-in templates.
    pub fn new(declarations: Vec<FlavorDeclaration>) -> Result<Self> {
        if declarations.is_empty() {
            return Err(CodegenError::NoFlavors);
        }

        let mut names = HashSet::new();
        for declaration in &declarations {
            declaration.validate()?;
            if !names.insert(declaration.name.as_str()) {
                return Err(CodegenError::DuplicateFlavor(declaration.name.clone()));
            }
        }

        for declaration in &declarations {
            for target in declaration.targets.iter().flatten() {
                if !names.contains(target.as_str()) {
                    return Err(CodegenError::UndeclaredFlavor {
                        flavor: declaration.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(Self {
            declarations,
            flavor_template: Template::flavor(),
            pair_template: Template::pair(),
            pattern: placeholder_pattern()?,
        })
    }

    /// Replace the built-in templates.
    #[must_use]
    pub fn with_templates(mut self, flavor: Template, pair: Template) -> Self {
        self.flavor_template = flavor;
        self.pair_template = pair;
        self
    }

    #[must_use]
    pub fn declarations(&self) -> &[FlavorDeclaration] {
        &self.declarations
    }

    /// Render every module.
    pub fn generate(&self) -> Result<Vec<GeneratedModule>> {
        let mut modules = Vec::new();

        for flavor in &self.declarations {
            let source = self.flavor_template.render(&self.pattern, &flavor_bindings(flavor))?;
            modules.push(GeneratedModule::new(flavor.module_name(), source));
        }

        for (flavor, target) in self.pairs() {
            let source = self
                .pair_template
                .render(&self.pattern, &pair_bindings(flavor, target))?;
            modules.push(GeneratedModule::new(pair_module_name(flavor, target), source));
        }

        modules.push(GeneratedModule {
            file_name: INDEX_FILE.to_owned(),
            module_name: String::new(),
            source: self.index(),
        });
        Ok(modules)
    }

    fn pairs(&self) -> impl Iterator<Item = (&FlavorDeclaration, &FlavorDeclaration)> + '_ {
        self.declarations.iter().flat_map(move |flavor| {
            self.declarations
                .iter()
                .filter(move |target| match &flavor.targets {
                    Some(targets) => targets.contains(&target.name),
                    None => true,
                })
                .map(move |target| (flavor, target))
        })
    }

    fn index(&self) -> String {
        let mut modules = Vec::new();
        let mut exports = Vec::new();

        for flavor in &self.declarations {
            let module = flavor.module_name();
            modules.push(format!(
                "/// The `{name}` flavor.\npub mod {module} {{\n    include!(concat!(env!(\"OUT_DIR\"), \"/{module}.rs\"));\n}}\n",
                name = flavor.name,
            ));
            exports.push(format!(
                "pub use self::{module}::{{As{name}, {name}, {name}Policy}};\n",
                name = flavor.name,
            ));
        }

        for (flavor, target) in self.pairs() {
            let module = pair_module_name(flavor, target);
            modules.push(format!(
                "/// `{from}` to `{to}` combinators.\npub mod {module} {{\n    include!(concat!(env!(\"OUT_DIR\"), \"/{module}.rs\"));\n}}\n",
                from = flavor.name,
                to = target.name,
            ));
            exports.push(format!(
                "pub use self::{module}::{from}To{to};\n",
                from = flavor.name,
                to = target.name,
            ));
        }

        let mut index = String::from("// @generated by sharedseq-codegen. Do not edit.\n\n");
        index.push_str(&modules.join("\n"));
        index.push('\n');
        index.push_str(&exports.concat());
        index
    }
}

impl GeneratedModule {
    fn new(module_name: String, source: String) -> Self {
        Self {
            file_name: format!("{module_name}.rs"),
            module_name,
            source,
        }
    }
}

fn pair_module_name(flavor: &FlavorDeclaration, target: &FlavorDeclaration) -> String {
    format!("{}_to_{}", flavor.module_name(), target.module_name())
}

fn flavor_bindings(flavor: &FlavorDeclaration) -> Bindings {
    let mut bindings = Bindings::new();
    bindings.insert("Flavor", flavor.name.clone());
    bindings.insert("flavor", flavor.module_name());
    bindings.insert("Policy", flavor.policy.clone());
    bindings.insert("scheduler", flavor.scheduler.clone());
    bindings.insert("share", flavor.share.clone());
    bindings
}

fn pair_bindings(flavor: &FlavorDeclaration, target: &FlavorDeclaration) -> Bindings {
    let mut bindings = Bindings::new();
    bindings.insert("Flavor", flavor.name.clone());
    bindings.insert("flavor", flavor.module_name());
    bindings.insert("Target", target.name.clone());
    bindings.insert("target", target.module_name());
    bindings
}
