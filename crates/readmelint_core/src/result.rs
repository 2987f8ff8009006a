//! Lint result types.

use std::path::PathBuf;

use serde::Serialize;

use crate::diagnostic::{Diagnostic, Severity};

/// Diagnostics attributed to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    /// Path of the file the diagnostics belong to.
    pub path: PathBuf,

    /// Diagnostics, sorted by line then rule.
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Creates a result, sorting the diagnostics.
    pub fn new(path: impl Into<PathBuf>, mut diagnostics: Vec<Diagnostic>) -> Self {
        diagnostics.sort_by(|a, b| {
            a.line
                .cmp(&b.line)
                .then_with(|| a.rule_id.cmp(&b.rule_id))
                .then_with(|| a.message.cmp(&b.message))
        });

        Self {
            path: path.into(),
            diagnostics,
        }
    }

    /// Returns true if any diagnostic has error severity.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }
}
