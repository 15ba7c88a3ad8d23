//! Error types for specification parsing.

use thiserror::Error;

/// Error type for OpenAPI document parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO error reading the document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid document structure.
    #[error("invalid document structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// Schema node shape not covered by the dispatch rules.
    #[error("unsupported shape in schema '{schema}': {detail}")]
    UnsupportedShape {
        /// Schema name (empty for anonymous nodes).
        schema: String,
        /// What made the shape unsupported.
        detail: String,
    },
}

impl ParseError {
    /// Creates an invalid structure error.
    pub fn invalid_structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }

    /// Creates an unsupported shape error.
    pub fn unsupported_shape(schema: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::UnsupportedShape {
            schema: schema.into(),
            detail: detail.into(),
        }
    }
}
