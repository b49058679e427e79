// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for shared sequences.
//!
//! A [`SequenceError`] is what an upstream producer terminates with, and what a
//! contained callback failure is reported as on the [`ErrorChannel`](crate::ErrorChannel).
//! Once a producer has been converted into a flavor, no subscriber ever observes one.
//!
//! # Examples
//!
//! ```
//! use sharedseq_core::{Result, SequenceError};
//!
//! fn load() -> Result<u32> {
//!     Err(SequenceError::stream_error("backend unavailable"))
//! }
//!
//! assert!(load().is_err());
//! ```

use std::any::Any;

/// Root error type for all shared sequence operations.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Stream processing encountered an error
    ///
    /// General failure of an upstream producer.
    #[error("Stream processing error: {context}")]
    StreamProcessingError {
        /// Description of what went wrong
        context: String,
    },

    /// Custom error from user code
    ///
    /// Wraps errors returned by fallible callbacks (`try_map`, `try_filter`).
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A user callback panicked
    #[error("Callback panicked in {operator}: {message}")]
    CallbackPanicked {
        /// Operator whose callback failed
        operator: &'static str,
        /// Panic payload rendered as text
        message: String,
    },

    /// Building a sequence failed (merge sources, defer factory)
    #[error("Construction failed in {operator}: {context}")]
    ConstructionFailed {
        /// Operator that was being constructed
        operator: &'static str,
        /// Description of the failure
        context: String,
    },
}

impl SequenceError {
    /// Create a stream processing error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::StreamProcessingError {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Create a construction error for `operator`
    pub fn construction_error(operator: &'static str, context: impl Into<String>) -> Self {
        Self::ConstructionFailed {
            operator,
            context: context.into(),
        }
    }

    /// Build a [`SequenceError::CallbackPanicked`] from a caught panic payload.
    pub fn from_panic(operator: &'static str, payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(text) = payload.downcast_ref::<&'static str>() {
            (*text).to_string()
        } else if let Some(text) = payload.downcast_ref::<String>() {
            text.clone()
        } else {
            "non-string panic payload".to_string()
        };

        Self::CallbackPanicked { operator, message }
    }

    /// Returns `true` if this error came from a panicking callback.
    #[must_use]
    pub const fn is_panic(&self) -> bool {
        matches!(self, Self::CallbackPanicked { .. })
    }
}

/// Specialized Result type for shared sequence operations
pub type Result<T> = std::result::Result<T, SequenceError>;

impl Clone for SequenceError {
    fn clone(&self) -> Self {
        match self {
            Self::StreamProcessingError { context } => Self::StreamProcessingError {
                context: context.clone(),
            },
            // Boxed user errors cannot be cloned, keep their rendering
            Self::UserError(e) => Self::StreamProcessingError {
                context: format!("User error: {e}"),
            },
            Self::CallbackPanicked { operator, message } => Self::CallbackPanicked {
                operator,
                message: message.clone(),
            },
            Self::ConstructionFailed { operator, context } => Self::ConstructionFailed {
                operator,
                context: context.clone(),
            },
        }
    }
}
