//! Text output formatter

use readmelint_core::LintResult;

pub fn output_text(results: &[LintResult]) {
    for result in results {
        if result.diagnostics.is_empty() {
            continue;
        }

        println!("\n{}:", result.path.display());
        for diag in &result.diagnostics {
            println!(
                "  {}: {} [{}]: {}",
                diag.line,
                diag.severity.as_str(),
                diag.rule_id,
                diag.message
            );
        }
    }

    let total_files = results.len();
    let total_issues: usize = results.iter().map(|r| r.diagnostics.len()).sum();
    let total_errors: usize = results.iter().map(|r| r.error_count()).sum();

    println!();
    println!(
        "Checked {} files, found {} issues ({} errors)",
        total_files, total_issues, total_errors
    );
}
