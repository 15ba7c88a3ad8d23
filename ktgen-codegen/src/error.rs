//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Specification parsing error.
    #[error("spec parse error: {0}")]
    Parse(#[from] ktgen_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A `$ref` target is absent from the schema mapping.
    #[error("missing reference target '{target}'")]
    MissingReference {
        /// Name of the referenced schema.
        target: String,
    },

    /// Reference chain loops back on itself.
    #[error("circular reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates a missing reference error.
    pub fn missing_reference(target: impl Into<String>) -> Self {
        Self::MissingReference {
            target: target.into(),
        }
    }

    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }
}
