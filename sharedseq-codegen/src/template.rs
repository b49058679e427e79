// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Placeholder templates.
//!
//! A template is Rust source with `${Name}` placeholders. Rendering replaces each
//! placeholder with its binding; a placeholder without a binding, or a `${` that is
//! not followed by an identifier and `}`, fails the render.

use crate::error::{CodegenError, Result};
use regex::{Captures, Regex};
use std::collections::BTreeMap;

const PLACEHOLDER: &str = r"\$\{(?:([A-Za-z_][A-Za-z0-9_]*)\})?";

/// Built-in template instantiated once per flavor.
pub const FLAVOR_TEMPLATE: &str = include_str!("../templates/flavor.rs.in");

/// Built-in template instantiated once per ordered pair of flavors.
pub const PAIR_TEMPLATE: &str = include_str!("../templates/flavor_pair.rs.in");

/// Placeholder values for one instantiation.
pub type Bindings = BTreeMap<&'static str, String>;

/// A named template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn flavor() -> Self {
        Self::new("flavor", FLAVOR_TEMPLATE)
    }

    pub(crate) fn pair() -> Self {
        Self::new("flavor_pair", PAIR_TEMPLATE)
    }

    pub(crate) fn render(&self, pattern: &Regex, bindings: &Bindings) -> Result<String> {
        let mut failure = None;
        let rendered = pattern.replace_all(&self.text, |captures: &Captures<'_>| {
            let placeholder = captures.get(0).map_or(0, |m| m.start());
            let resolved = match captures.get(1) {
                None => Err(CodegenError::UnterminatedPlaceholder {
                    template: self.name.clone(),
                    offset: placeholder,
                }),
                Some(name) => bindings.get(name.as_str()).cloned().ok_or_else(|| {
                    CodegenError::UnknownPlaceholder {
                        template: self.name.clone(),
                        name: name.as_str().to_owned(),
                    }
                }),
            };
            resolved.unwrap_or_else(|error| {
                failure.get_or_insert(error);
                String::new()
            })
        });

        match failure {
            Some(error) => Err(error),
            None => Ok(rendered.into_owned()),
        }
    }
}

pub(crate) fn placeholder_pattern() -> Result<Regex> {
    Ok(Regex::new(PLACEHOLDER)?)
}
