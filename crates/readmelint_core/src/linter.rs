//! Core linter engine.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::file_finder::{FileFinder, build_globset};
use crate::file_linter;
use crate::parallel_linter;
use crate::rules::{HeaderExceptions, RuleEngine};
use crate::{LintResult, LinterConfig, LinterError};

pub use crate::parallel_linter::LintFilesResult;

/// The core linter engine.
///
/// Orchestrates file discovery, parsing, the structural rules and the
/// manifest cross-checks.
pub struct Linter {
    /// Linter configuration.
    config: LinterConfig,
    /// Structural rules with the compiled header exceptions.
    engine: RuleEngine,
    /// File discovery with include/exclude filters.
    finder: FileFinder,
}

impl Linter {
    /// Creates a new linter with the given configuration.
    ///
    /// Fails if a header exception or a glob pattern does not compile.
    pub fn new(config: LinterConfig) -> Result<Self, LinterError> {
        let engine = RuleEngine::new(HeaderExceptions::new(&config.header_exceptions)?);
        let finder = FileFinder::new(&config.include, &config.exclude, &config.doc_file_name)?;

        build_globset(&config.manifest.required_includes)?;

        Ok(Self {
            config,
            engine,
            finder,
        })
    }

    pub fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Lints files matching the given patterns.
    ///
    /// Relative globs are walked from the configuration's directory, or the
    /// working directory when there is none.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_patterns(&self, patterns: &[String]) -> LintFilesResult {
        let base_dir = self
            .config
            .base_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let files = self.finder.discover_files(patterns, base_dir)?;
        self.lint_files(&files)
    }

    /// Lints a list of files in parallel using rayon.
    ///
    /// Returns a tuple of (successful results, failed files with errors).
    pub fn lint_files(&self, paths: &[PathBuf]) -> LintFilesResult {
        parallel_linter::lint_files(paths, &self.config, &self.engine)
    }

    /// Lints a single file.
    ///
    /// Documentation files also yield a result for their build manifest when
    /// manifest checks are enabled.
    pub fn lint_file(&self, path: &Path) -> Result<Vec<LintResult>, LinterError> {
        file_linter::lint_file_internal(path, &self.config, &self.engine)
    }

    /// Lints in-memory content with the structural rules only.
    pub fn lint_content(
        &self,
        file_name: &str,
        content: &str,
    ) -> Result<LintResult, LinterError> {
        debug!("Linting content of {}", file_name);
        let diagnostics =
            file_linter::lint_content(file_name, content, &self.config, &self.engine)?;
        Ok(LintResult::new(file_name, diagnostics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_linter_new() {
        let linter = Linter::new(LinterConfig::new()).unwrap();
        assert_eq!(linter.config().doc_file_name, "README.md");
    }

    #[test]
    fn test_linter_rejects_invalid_header_exception() {
        let mut config = LinterConfig::new();
        config.header_exceptions = vec!["(".to_string()];
        assert!(matches!(Linter::new(config), Err(LinterError::Config(_))));
    }

    #[test]
    fn test_linter_rejects_invalid_glob() {
        let mut config = LinterConfig::new();
        config.exclude = vec!["[invalid".to_string()];
        assert!(Linter::new(config).is_err());

        let mut config = LinterConfig::new();
        config.manifest.required_includes = vec!["[invalid".to_string()];
        assert!(Linter::new(config).is_err());
    }

    #[test]
    fn test_lint_content() {
        let linter = Linter::new(LinterConfig::new()).unwrap();
        let result = linter.lint_content("README.md", "# Title\nText").unwrap();

        assert_eq!(result.path, PathBuf::from("README.md"));
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 1);
        assert_eq!(result.diagnostics[0].rule_id, "header-blank-line");
    }

    #[test]
    fn test_lint_content_is_idempotent() {
        let linter = Linter::new(LinterConfig::new()).unwrap();
        let content = "# A\nB\n\n- c\n```\nd";
        assert_eq!(
            linter.lint_content("README.md", content).unwrap(),
            linter.lint_content("README.md", content).unwrap()
        );
    }

    #[test]
    fn test_lint_files_nonexistent() {
        let linter = Linter::new(LinterConfig::new()).unwrap();
        let (successes, failures) = linter
            .lint_files(&[PathBuf::from("nonexistent/README.md")])
            .unwrap();

        assert!(successes.is_empty());
        assert_eq!(failures.len(), 1);
    }
}
