//! Single file linting logic.

use std::fs;
use std::path::Path;

use readmelint_parser::{MarkdownParser, Parser};
use tracing::debug;

use crate::config::LinterConfig;
use crate::diagnostic::Diagnostic;
use crate::error::LinterError;
use crate::file_finder::find_relative;
use crate::line_index::LineIndex;
use crate::locator::ForwardScanLocator;
use crate::manifest::BuildManifest;
use crate::result::LintResult;
use crate::rules::RuleEngine;

pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Runs the structural rules over in-memory content.
pub fn lint_content(
    file_name: &str,
    content: &str,
    config: &LinterConfig,
    engine: &RuleEngine,
) -> Result<Vec<Diagnostic>, LinterError> {
    let index = LineIndex::new(content);
    let blocks = if index.is_blank_document() {
        Vec::new()
    } else {
        MarkdownParser::new().parse(content)?
    };

    let locator = ForwardScanLocator::new(&index);
    let mut diagnostics = Vec::new();
    engine.check(file_name, &index, &blocks, &locator, &mut diagnostics);

    Ok(config.apply_options(diagnostics))
}

/// Lints one file on disk.
///
/// The first result belongs to `path`. When `path` is the documentation file
/// and manifest checks are enabled, a second result for the manifest follows.
pub fn lint_file_internal(
    path: &Path,
    config: &LinterConfig,
    engine: &RuleEngine,
) -> Result<Vec<LintResult>, LinterError> {
    debug!("Linting {}", path.display());

    let metadata = fs::metadata(path).map_err(|e| {
        LinterError::file(format!(
            "Failed to read metadata for {}: {}",
            path.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(LinterError::file(format!(
            "Not a regular file: {}",
            path.display()
        )));
    }

    if metadata.len() > MAX_FILE_SIZE {
        return Err(LinterError::file(format!(
            "File size exceeds limit of {} bytes: {}",
            MAX_FILE_SIZE,
            path.display()
        )));
    }

    let content = fs::read_to_string(path)
        .map_err(|e| LinterError::file(format!("Failed to read {}: {}", path.display(), e)))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let diagnostics = lint_content(&file_name, &content, config, engine)?;
    let mut results = vec![LintResult::new(path, diagnostics)];

    if config.manifest.enabled && file_name.eq_ignore_ascii_case(&config.doc_file_name) {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        results.push(check_manifest(dir, config)?);
    }

    Ok(results)
}

/// Cross-checks the build manifest in `dir`.
pub fn check_manifest(dir: &Path, config: &LinterConfig) -> Result<LintResult, LinterError> {
    let manifest_path = dir.join(&config.manifest.file_name);
    debug!("Checking manifest {}", manifest_path.display());

    let content = fs::read_to_string(&manifest_path)
        .map_err(|e| LinterError::manifest(&manifest_path, e.to_string()))?;
    let manifest = BuildManifest::parse(&content);

    let mut diagnostics = manifest.check(&config.doc_file_name, &config.doc_folder_name);

    let required = find_relative(dir, &config.manifest.required_includes)?;
    diagnostics.extend(manifest.check_required(&config.manifest.file_name, &required));

    Ok(LintResult::new(
        manifest_path,
        config.apply_options(diagnostics),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::HeaderExceptions;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn engine(config: &LinterConfig) -> RuleEngine {
        RuleEngine::new(HeaderExceptions::new(&config.header_exceptions).unwrap())
    }

    #[test]
    fn test_lint_content_empty() {
        let config = LinterConfig::new();
        let diagnostics = lint_content("README.md", "\n  \n", &config, &engine(&config)).unwrap();

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, "empty-file");
        assert_eq!(diagnostics[0].message, "The file README.md should not be empty.");
    }

    #[test]
    fn test_lint_content_respects_options() {
        let mut config = LinterConfig::new();
        config.options.insert(
            "header-blank-line".to_string(),
            crate::config::RuleOption::Enabled(false),
        );

        let diagnostics =
            lint_content("README.md", "# Title\nText", &config, &engine(&config)).unwrap();
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_lint_file_without_manifest_check() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Title\n\nText\n").unwrap();

        let mut config = LinterConfig::new();
        config.manifest.enabled = false;

        let results = lint_file_internal(&path, &config, &engine(&config)).unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].diagnostics.is_empty());
    }

    #[test]
    fn test_lint_file_with_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Title\n\nText\n").unwrap();
        fs::write(
            dir.path().join("build.properties"),
            "bin.includes = META-INF/,README.md\n",
        )
        .unwrap();

        let config = LinterConfig::new();
        let results = lint_file_internal(&path, &config, &engine(&config)).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[1].path, dir.path().join("build.properties"));
        assert_eq!(results[1].diagnostics.len(), 1);
        assert_eq!(results[1].diagnostics[0].line, 0);
    }

    #[test]
    fn test_missing_manifest_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        fs::write(&path, "# Title\n\nText\n").unwrap();

        let config = LinterConfig::new();
        let err = lint_file_internal(&path, &config, &engine(&config)).unwrap_err();

        assert!(matches!(err, LinterError::Manifest { .. }));
    }

    #[test]
    fn test_other_markdown_file_skips_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("GUIDE.md");
        fs::write(&path, "# Guide\n\nText\n").unwrap();

        let config = LinterConfig::new();
        let results = lint_file_internal(&path, &config, &engine(&config)).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempdir().unwrap();
        let config = LinterConfig::new();
        let err = lint_file_internal(dir.path(), &config, &engine(&config)).unwrap_err();
        assert!(matches!(err, LinterError::File(_)));
    }
}
