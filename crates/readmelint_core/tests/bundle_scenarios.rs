//! End-to-end checks of a bundle directory: README plus build manifest.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use readmelint_core::{LintResult, Linter, LinterConfig, RuleOption, Severity};
use rstest::rstest;
use tempfile::TempDir;

const README_IN_MANIFEST: &str = "README.MD file must not be added to the bin.includes property";
const DOC_IN_MANIFEST: &str = "The doc folder must not be added to the bin.includes property";

fn bundle(readme: &str, manifest: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), readme).unwrap();
    fs::write(dir.path().join("build.properties"), manifest).unwrap();
    dir
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn lines_and_messages(result: &LintResult) -> Vec<(usize, &str)> {
    result
        .diagnostics
        .iter()
        .map(|d| (d.line, d.message.as_str()))
        .collect()
}

#[rstest]
#[case::readme(
    "bin.includes = META-INF/,\\\n               .,\\\n               README.md\n",
    vec![(0, README_IN_MANIFEST)]
)]
#[case::doc_folder(
    "bin.includes = META-INF/,\\\n               doc/\n",
    vec![(0, DOC_IN_MANIFEST)]
)]
#[case::readme_and_doc_folder(
    "bin.includes = README.md,\\\n               doc/\n",
    vec![(0, README_IN_MANIFEST), (0, DOC_IN_MANIFEST)]
)]
#[case::similar_names(
    "bin.includes = README.md.bak,\\\n               dummydoc/\n",
    vec![]
)]
fn test_manifest_entries(#[case] manifest: &str, #[case] expected: Vec<(usize, &str)>) {
    let dir = bundle("# Binding\n\nDescription.\n", manifest);
    let linter = Linter::new(LinterConfig::new()).unwrap();

    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].diagnostics.is_empty());
    assert_eq!(lines_and_messages(&results[1]), expected);
}

#[test]
fn test_required_descriptor_not_included() {
    let dir = bundle("# Binding\n\nDescription.\n", "bin.includes = META-INF/,.\n");
    write(dir.path(), "ESH-INF/thing/thing-types.xml", "<thing-descriptions/>");

    let linter = Linter::new(LinterConfig::new()).unwrap();
    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    assert_eq!(
        lines_and_messages(&results[1]),
        vec![(
            0,
            "The file ESH-INF/thing/thing-types.xml isn't included in the build.properties file. Good approach is to include all files by adding `ESH-INF/` value to the bin.includes property."
        )]
    );
}

#[test]
fn test_top_level_wildcard_does_not_cover_nested_descriptor() {
    let dir = bundle("# Binding\n\nDescription.\n", "bin.includes = META-INF/,.,*.xml\n");
    write(dir.path(), "ESH-INF/thing/thing-types.xml", "<thing-descriptions/>");

    let linter = Linter::new(LinterConfig::new()).unwrap();
    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    assert_eq!(results[1].diagnostics.len(), 1);
    assert_eq!(results[1].diagnostics[0].rule_id, "manifest-missing-include");
}

#[test]
fn test_required_descriptor_included() {
    let dir = bundle(
        "# Binding\n\nDescription.\n",
        "bin.includes = META-INF/,.,ESH-INF/\n",
    );
    write(dir.path(), "ESH-INF/thing/thing-types.xml", "<thing-descriptions/>");

    let linter = Linter::new(LinterConfig::new()).unwrap();
    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    assert!(results[1].diagnostics.is_empty());
}

#[test]
fn test_custom_manifest_and_doc_names() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("GUIDE.md"), "# Guide\n\nText\n").unwrap();
    fs::write(
        dir.path().join("bundle.properties"),
        "bin.includes = guide.md,docs/\n",
    )
    .unwrap();

    let config = LinterConfig::from_json(
        r#"{
            "docFileName": "GUIDE.md",
            "docFolderName": "docs",
            "manifest": { "fileName": "bundle.properties", "requiredIncludes": [] }
        }"#,
    )
    .unwrap();
    let linter = Linter::new(config).unwrap();

    let results = linter.lint_file(&dir.path().join("GUIDE.md")).unwrap();

    assert_eq!(
        lines_and_messages(&results[1]),
        vec![
            (0, "GUIDE.MD file must not be added to the bin.includes property"),
            (0, "The docs folder must not be added to the bin.includes property"),
        ]
    );
}

#[test]
fn test_readme_with_several_findings() {
    let readme = "\
# Binding
Description right below the header.

Supported things:
- thing one
- thing two
## More

```
unclosed
";
    let dir = bundle(readme, "bin.includes = .\n");
    let linter = Linter::new(LinterConfig::new()).unwrap();

    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    assert_eq!(
        lines_and_messages(&results[0]),
        vec![
            (1, "Missing an empty line after the Markdown header (#)."),
            (4, "The line before a Markdown list must be empty."),
            (7, "The line after a Markdown list must be empty."),
            (
                9,
                "There is an empty or unclosed code formatting section. Please correct it."
            ),
        ]
    );
}

#[test]
fn test_severity_override_and_disable() {
    let readme = "# Binding\nDescription.\n\nIntro\n\n## Trailing\n";
    let dir = bundle(readme, "bin.includes = README.md\n");

    let mut config = LinterConfig::new();
    config.options.insert(
        "header-blank-line".to_string(),
        RuleOption::Severity("warning".to_string()),
    );
    config
        .options
        .insert("manifest-doc-file".to_string(), RuleOption::Enabled(false));
    let linter = Linter::new(config).unwrap();

    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    let severities: Vec<_> = results[0]
        .diagnostics
        .iter()
        .map(|d| (d.rule_id.as_str(), d.severity))
        .collect();
    assert_eq!(
        severities,
        vec![
            ("header-blank-line", Severity::Warning),
            ("header-at-end", Severity::Error),
        ]
    );
    assert!(results[1].diagnostics.is_empty());
}

#[test]
fn test_empty_readme() {
    let dir = bundle("   \n\n", "bin.includes = .\n");
    let linter = Linter::new(LinterConfig::new()).unwrap();

    let results = linter.lint_file(&dir.path().join("README.md")).unwrap();

    assert_eq!(
        lines_and_messages(&results[0]),
        vec![(0, "The file README.md should not be empty.")]
    );
}
