//! Lint command implementation

use miette::{IntoDiagnostic, Result};
use readmelint_core::{Linter, LinterConfig};
use tracing::{error, info};

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;

/// Returns true when errors were found or a file could not be checked.
pub fn run_lint(
    cli: &Cli,
    patterns: &[String],
    format: OutputFormat,
    no_manifest: bool,
) -> Result<bool> {
    let mut config = if let Some(ref path) = cli.config {
        LinterConfig::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    if no_manifest {
        config.manifest.enabled = false;
    }

    let linter = Linter::new(config).into_diagnostic()?;
    let (results, failures) = linter.lint_patterns(patterns).into_diagnostic()?;

    for (path, e) in &failures {
        error!("{}: {}", path.display(), e);
    }

    let has_errors = output_results(&results, format)?;
    Ok(has_errors || !failures.is_empty())
}

pub fn find_config() -> Result<LinterConfig> {
    if let Some(path) = LinterConfig::discover(".") {
        info!("Using config: {}", path.display());
        return LinterConfig::from_file(&path).into_diagnostic();
    }

    info!("No config file found, using defaults");
    Ok(LinterConfig::new())
}
