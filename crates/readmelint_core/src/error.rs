//! Linter error types.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during linting.
///
/// Rule violations are never errors; they are reported as diagnostics.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(#[from] readmelint_parser::ParseError),

    /// The build manifest next to a documentation file is missing or unreadable.
    #[error("Build manifest {} could not be read: {reason}", path.display())]
    Manifest {
        /// Expected manifest location.
        path: PathBuf,
        /// Underlying cause.
        reason: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a manifest error.
    pub fn manifest(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }
}
