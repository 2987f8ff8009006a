//! Parallel file linting logic.

use rayon::prelude::*;
use std::path::PathBuf;
use tracing::warn;

use crate::config::LinterConfig;
use crate::error::LinterError;
use crate::file_linter::lint_file_internal;
use crate::result::LintResult;
use crate::rules::RuleEngine;

/// Result type for lint_files and lint_patterns methods.
///
/// Contains a tuple of:
/// - Successful lint results
/// - Failed files with their errors (path and error)
pub type LintFilesResult = Result<(Vec<LintResult>, Vec<(PathBuf, LinterError)>), LinterError>;

/// Lints every path on the rayon pool.
///
/// Per-file failures are collected next to the successes instead of
/// aborting the run.
pub fn lint_files(
    paths: &[PathBuf],
    config: &LinterConfig,
    engine: &RuleEngine,
) -> LintFilesResult {
    let results: Vec<Result<Vec<LintResult>, (PathBuf, LinterError)>> = paths
        .par_iter()
        .map(|path| lint_file_internal(path, config, engine).map_err(|e| (path.clone(), e)))
        .collect();

    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(lint_results) => successes.extend(lint_results),
            Err((path, error)) => {
                warn!("Failed to lint {}: {}", path.display(), error);
                failures.push((path, error));
            }
        }
    }

    Ok((successes, failures))
}
