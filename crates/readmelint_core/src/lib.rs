//! # readmelint_core
//!
//! Core linter engine for ReadmeLint.
//!
//! This crate provides:
//! - The main `Linter` orchestrator
//! - The structural rules for documentation files
//! - Build manifest (`build.properties`) cross-checks
//! - Configuration loading
//! - File discovery and parallel processing
//!
//! ## Example
//!
//! ```rust
//! use readmelint_core::{Linter, LinterConfig};
//!
//! let linter = Linter::new(LinterConfig::default()).unwrap();
//! let result = linter.lint_content("README.md", "# Title\nSome text").unwrap();
//!
//! assert_eq!(result.diagnostics.len(), 1);
//! assert_eq!(result.diagnostics[0].line, 1);
//! ```

mod config;
mod diagnostic;
mod error;
pub mod file_finder;
mod file_linter;
pub mod line_index;
mod linter;
pub mod locator;
pub mod manifest;
mod parallel_linter;
mod result;
pub mod rules;

pub use config::{LinterConfig, ManifestConfig, RuleOption};
pub use diagnostic::{Diagnostic, DiagnosticSink, Severity};
pub use error::LinterError;
pub use line_index::LineIndex;
pub use linter::{LintFilesResult, Linter};
pub use locator::{ForwardScanLocator, LineLocator};
pub use manifest::BuildManifest;
pub use result::LintResult;
pub use rules::{HeaderExceptions, RuleEngine};
