//! Diagnostic types and the sink they are reported to.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    #[default]
    Error,
    /// Warning - should be reviewed.
    Warning,
    /// Info - informational message.
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

/// A single finding.
///
/// `line` is 1-based. Line 0 marks a file-level finding that cannot be
/// attributed to a single line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The rule that generated this diagnostic.
    pub rule_id: String,

    /// 1-based line, or 0 for file-level findings.
    pub line: usize,

    /// The diagnostic message.
    pub message: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(rule_id: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            line,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    /// Creates a file-level diagnostic (line 0).
    pub fn file_level(rule_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(rule_id, 0, message)
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_file_level(&self) -> bool {
        self.line == 0
    }
}

/// Receiver of diagnostics.
///
/// The rule engine and the manifest checker only ever append; the order of
/// reports carries no meaning.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}
