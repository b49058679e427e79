// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{CodegenError, Result};
use heck::{ToSnakeCase, ToUpperCamelCase};

const RESERVED: &[&str] = &[
    "as", "async", "await", "box", "break", "const", "continue", "crate", "dyn", "else", "enum",
    "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try",
    "type", "unsafe", "use", "where", "while", "yield",
];

/// One flavor handed to the [`Specializer`](crate::Specializer).
///
/// `policy` is the path of the marker type implementing `SharingPolicy`, as seen
/// from the crate that includes the generated modules (`crate::flavors::DriverTraits`).
/// The scheduler and share expressions default to the policy's own functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlavorDeclaration {
    pub(crate) name: String,
    pub(crate) policy: String,
    pub(crate) scheduler: String,
    pub(crate) share: String,
    pub(crate) targets: Option<Vec<String>>,
}

impl FlavorDeclaration {
    pub fn new(name: impl Into<String>, policy: impl Into<String>) -> Self {
        let policy = policy.into();
        Self {
            name: name.into(),
            scheduler: format!("<{policy} as ::sharedseq_stream::SharingPolicy>::scheduler()"),
            share: format!("<{policy} as ::sharedseq_stream::SharingPolicy>::share"),
            policy,
            targets: None,
        }
    }

    /// Expression evaluating to the flavor's scheduler.
    #[must_use]
    pub fn with_scheduler(mut self, expression: impl Into<String>) -> Self {
        self.scheduler = expression.into();
        self
    }

    /// Expression callable as `share(source)`, returning a `Multicast`.
    #[must_use]
    pub fn with_share(mut self, expression: impl Into<String>) -> Self {
        self.share = expression.into();
        self
    }

    /// Restrict the pair modules generated from this flavor to `targets`.
    ///
    /// Without it every declared flavor, this one included, is a target.
    #[must_use]
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn policy(&self) -> &str {
        &self.policy
    }

    /// Snake-case name, used for module, file and method names.
    #[must_use]
    pub fn module_name(&self) -> String {
        self.name.to_snake_case()
    }

    pub(crate) fn validate(&self) -> Result<()> {
        let name = self.name.as_str();
        let well_formed = name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
            && name.chars().all(|c| c.is_ascii_alphanumeric())
            && name.to_upper_camel_case() == name
            && !RESERVED.contains(&self.module_name().as_str());

        if well_formed {
            Ok(())
        } else {
            Err(CodegenError::InvalidFlavorName(self.name.clone()))
        }
    }
}
