//! Parse error types.

use thiserror::Error;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The source text was rejected by the underlying parser.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// The underlying parser produced a tree without a document root.
    #[error("Parser returned no document root")]
    MissingRoot,
}

impl ParseError {
    /// Creates a new invalid source error.
    pub fn invalid_source(message: impl Into<String>) -> Self {
        Self::InvalidSource(message.into())
    }
}
