// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::path::PathBuf;

/// Errors raised while specializing or writing flavor modules.
#[derive(Debug, thiserror::Error)]
pub enum CodegenError {
    /// A template refers to a placeholder that has no binding
    #[error("template `{template}` uses unknown placeholder `${{{name}}}`")]
    UnknownPlaceholder {
        /// Template being rendered
        template: String,
        /// Placeholder name
        name: String,
    },

    /// A `${` without a well-formed name and closing brace
    #[error("template `{template}` has an unterminated placeholder at byte {offset}")]
    UnterminatedPlaceholder {
        /// Template being rendered
        template: String,
        /// Byte offset of the `${`
        offset: usize,
    },

    /// A declaration names a target flavor that was never declared
    #[error("flavor `{flavor}` targets undeclared flavor `{target}`")]
    UndeclaredFlavor {
        /// Declaring flavor
        flavor: String,
        /// Missing target
        target: String,
    },

    /// Two declarations share a name
    #[error("flavor `{0}` is declared more than once")]
    DuplicateFlavor(String),

    /// A flavor name that is not an UpperCamelCase identifier
    #[error("flavor name `{0}` must be an UpperCamelCase identifier")]
    InvalidFlavorName(String),

    /// Nothing to generate
    #[error("no flavors declared")]
    NoFlavors,

    /// The placeholder pattern failed to compile
    #[error(transparent)]
    Pattern(#[from] regex::Error),

    /// Writing a generated module failed
    #[error("cannot write {}: {source}", path.display())]
    Io {
        /// File being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for the generator.
pub type Result<T> = std::result::Result<T, CodegenError>;
