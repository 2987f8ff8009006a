//! Build manifest (`build.properties`) cross-checks.

use globset::{GlobBuilder, GlobMatcher};
use readmelint_ast::lines::lines;
use tracing::debug;

use crate::diagnostic::Diagnostic;

/// Property key holding the packaged files.
pub const BIN_INCLUDES: &str = "bin.includes";

pub mod rule_id {
    pub const DOC_FILE: &str = "manifest-doc-file";
    pub const DOC_FOLDER: &str = "manifest-doc-folder";
    pub const MISSING_INCLUDE: &str = "manifest-missing-include";
}

/// A parsed Java-properties build manifest.
#[derive(Debug, Clone, Default)]
pub struct BuildManifest {
    includes: Vec<String>,
}

impl BuildManifest {
    /// Parses manifest content.
    ///
    /// Never fails: only `bin.includes` is kept, and a later definition of it
    /// replaces an earlier one.
    pub fn parse(content: &str) -> Self {
        let includes = logical_lines(content)
            .iter()
            .rev()
            .map(|line| split_property(line))
            .find(|(key, _)| key == BIN_INCLUDES)
            .map(|(_, value)| parse_list(&value))
            .unwrap_or_default();

        Self { includes }
    }

    /// Normalized, de-duplicated `bin.includes` entries in declaration order.
    pub fn includes(&self) -> &[String] {
        &self.includes
    }

    /// Flags the documentation file and folder when they are packaged.
    pub fn check(&self, doc_file_name: &str, doc_folder_name: &str) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let folder = normalize_entry(doc_folder_name);

        if self
            .includes
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(doc_file_name))
        {
            diagnostics.push(Diagnostic::file_level(
                rule_id::DOC_FILE,
                format!(
                    "{} file must not be added to the {} property",
                    doc_file_name.to_uppercase(),
                    BIN_INCLUDES
                ),
            ));
        }

        if !folder.is_empty() && self.includes.iter().any(|entry| *entry == folder) {
            diagnostics.push(Diagnostic::file_level(
                rule_id::DOC_FOLDER,
                format!(
                    "The {} folder must not be added to the {} property",
                    folder, BIN_INCLUDES
                ),
            ));
        }

        diagnostics
    }

    /// Flags every required path that no `bin.includes` entry covers.
    ///
    /// Paths are relative to the manifest's directory and use `/` separators.
    /// In wildcard entries `*` and `?` stay within one path segment; only
    /// `**` crosses folders.
    pub fn check_required(&self, manifest_file_name: &str, paths: &[String]) -> Vec<Diagnostic> {
        let patterns: Vec<GlobMatcher> = self
            .includes
            .iter()
            .filter(|entry| entry.contains(['*', '?', '[']))
            .filter_map(|entry| {
                let glob = GlobBuilder::new(entry).literal_separator(true).build();
                match glob {
                    Ok(glob) => Some(glob.compile_matcher()),
                    Err(e) => {
                        debug!("Ignoring {} entry '{}': {}", BIN_INCLUDES, entry, e);
                        None
                    }
                }
            })
            .collect();

        paths
            .iter()
            .filter(|path| !self.covers(path) && !patterns.iter().any(|p| p.is_match(path)))
            .map(|path| {
                Diagnostic::file_level(
                    rule_id::MISSING_INCLUDE,
                    format!(
                        "The file {} isn't included in the {} file. Good approach is to include all files by adding `{}` value to the {} property.",
                        path,
                        manifest_file_name,
                        suggested_entry(path),
                        BIN_INCLUDES
                    ),
                )
            })
            .collect()
    }

    fn covers(&self, path: &str) -> bool {
        self.includes.iter().any(|entry| {
            path == entry
                || path
                    .strip_prefix(entry.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        })
    }
}

/// Checks manifest content for packaged documentation.
pub fn check(content: &str, doc_file_name: &str, doc_folder_name: &str) -> Vec<Diagnostic> {
    BuildManifest::parse(content).check(doc_file_name, doc_folder_name)
}

/// Top-level folder of a path with a trailing slash, or the path itself.
fn suggested_entry(path: &str) -> String {
    match path.split_once('/') {
        Some((top, _)) => format!("{}/", top),
        None => path.to_string(),
    }
}

fn normalize_entry(entry: &str) -> String {
    let mut entry = entry.trim();
    while let Some(rest) = entry.strip_prefix("./") {
        entry = rest;
    }
    entry.trim_end_matches('/').to_string()
}

fn parse_list(value: &str) -> Vec<String> {
    let mut entries: Vec<String> = Vec::new();
    for entry in value.split(',').map(normalize_entry) {
        if !entry.is_empty() && !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries
}

/// Joins continuation lines and drops comments and blank lines.
fn logical_lines(content: &str) -> Vec<String> {
    let mut logical = Vec::new();
    let mut current: Option<String> = None;

    for raw in lines(content) {
        let line = raw.trim_start();

        if current.is_none() && (line.is_empty() || line.starts_with(['#', '!'])) {
            continue;
        }

        let trailing = line.chars().rev().take_while(|&c| c == '\\').count();
        let continues = trailing % 2 == 1;
        let text = if continues {
            &line[..line.len() - 1]
        } else {
            line
        };

        let mut buffer = current.take().unwrap_or_default();
        buffer.push_str(text);

        if continues {
            current = Some(buffer);
        } else {
            logical.push(buffer);
        }
    }

    if let Some(rest) = current {
        logical.push(rest);
    }

    logical
}

/// Splits a logical line into key and value.
fn split_property(line: &str) -> (String, String) {
    let mut key = String::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    key.push(unescape(escaped));
                }
            }
            '=' | ':' => {
                return (key, unescape_value(chars.collect::<String>().trim_start()));
            }
            c if c.is_whitespace() => {
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
                if chars.peek().is_some_and(|&c| c == '=' || c == ':') {
                    chars.next();
                }
                return (key, unescape_value(chars.collect::<String>().trim_start()));
            }
            c => key.push(c),
        }
    }

    (key, String::new())
}

fn unescape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(unescape(escaped));
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn unescape(c: char) -> char {
    match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\u{c}',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn messages(diagnostics: &[Diagnostic]) -> Vec<&str> {
        diagnostics.iter().map(|d| d.message.as_str()).collect()
    }

    #[test]
    fn test_parse_simple_list() {
        let manifest = BuildManifest::parse("bin.includes = META-INF/,\\\n               .,\\\n               ESH-INF/\n");
        assert_eq!(manifest.includes(), &["META-INF", ".", "ESH-INF"]);
    }

    #[rstest]
    #[case::equals("bin.includes=lib", &["lib"])]
    #[case::colon("bin.includes: lib", &["lib"])]
    #[case::whitespace("bin.includes lib", &["lib"])]
    #[case::spaced_equals("bin.includes   =   lib", &["lib"])]
    #[case::empty_value("bin.includes", &[])]
    #[case::escaped_separator("bin.includes=a\\=b", &["a=b"])]
    #[case::escaped_key("bin\\.includes=lib", &["lib"])]
    fn test_separators(#[case] content: &str, #[case] expected: &[&str]) {
        let manifest = BuildManifest::parse(content);
        assert_eq!(manifest.includes(), expected);
    }

    #[test]
    fn test_comments_are_ignored() {
        let manifest = BuildManifest::parse("# bin.includes = README.md\n! other\nsource.. = src/\n");
        assert!(manifest.includes().is_empty());
    }

    #[test]
    fn test_carriage_return_continuation() {
        let manifest = BuildManifest::parse("bin.includes = META-INF/,\\\r    doc/\r");
        assert_eq!(manifest.includes(), &["META-INF", "doc"]);
    }

    #[test]
    fn test_later_definition_wins() {
        let manifest = BuildManifest::parse("bin.includes = a\nbin.includes = b\n");
        assert_eq!(manifest.includes(), &["b"]);
    }

    #[test]
    fn test_escaped_backslash_does_not_continue() {
        let manifest = BuildManifest::parse("bin.includes = lib\\\\\nsource.. = src/\n");
        assert_eq!(manifest.includes(), &["lib\\"]);
    }

    #[test]
    fn test_entries_are_normalized_and_deduplicated() {
        let manifest = BuildManifest::parse("bin.includes = ./doc/, doc, lib/a.jar ,,\n");
        assert_eq!(manifest.includes(), &["doc", "lib/a.jar"]);
    }

    #[test]
    fn test_readme_included() {
        let diagnostics = check("bin.includes = META-INF/,README.md\n", "README.md", "doc");
        assert_eq!(
            messages(&diagnostics),
            vec!["README.MD file must not be added to the bin.includes property"]
        );
        assert!(diagnostics[0].is_file_level());
    }

    #[test]
    fn test_readme_compared_case_insensitively() {
        let diagnostics = check("bin.includes = readme.MD\n", "README.md", "doc");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, rule_id::DOC_FILE);
    }

    #[test]
    fn test_doc_folder_included() {
        let diagnostics = check("bin.includes = doc/\n", "README.md", "doc");
        assert_eq!(
            messages(&diagnostics),
            vec!["The doc folder must not be added to the bin.includes property"]
        );
    }

    #[test]
    fn test_readme_and_doc_folder_included() {
        let content = "bin.includes = META-INF/,\\\n    README.md,\\\n    doc/\n";
        let diagnostics = check(content, "README.md", "doc");
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(Diagnostic::is_file_level));
    }

    #[test]
    fn test_clean_manifest() {
        assert!(check("bin.includes = META-INF/,.,ESH-INF/\n", "README.md", "doc").is_empty());
    }

    #[test]
    fn test_nested_doc_folder_is_not_flagged() {
        assert!(check("bin.includes = src/doc/\n", "README.md", "doc").is_empty());
    }

    #[test]
    fn test_required_covered_by_folder() {
        let manifest = BuildManifest::parse("bin.includes = ESH-INF/\n");
        let paths = vec!["ESH-INF/binding/binding.xml".to_string()];
        assert!(manifest.check_required("build.properties", &paths).is_empty());
    }

    #[test]
    fn test_required_covered_by_exact_entry() {
        let manifest = BuildManifest::parse("bin.includes = ESH-INF/thing/things.xml\n");
        let paths = vec!["ESH-INF/thing/things.xml".to_string()];
        assert!(manifest.check_required("build.properties", &paths).is_empty());
    }

    #[test]
    fn test_required_covered_by_wildcard_entry() {
        let manifest = BuildManifest::parse("bin.includes = ESH-INF/**/*.xml\n");
        let paths = vec!["ESH-INF/thing/things.xml".to_string()];
        assert!(manifest.check_required("build.properties", &paths).is_empty());
    }

    #[test]
    fn test_single_star_stays_within_folder() {
        let paths = vec!["ESH-INF/thing/thing-types.xml".to_string()];

        let manifest = BuildManifest::parse("bin.includes = META-INF/,*.xml\n");
        let diagnostics = manifest.check_required("build.properties", &paths);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule_id, rule_id::MISSING_INCLUDE);

        let manifest = BuildManifest::parse("bin.includes = META-INF/,*.xml\n");
        let top_level = vec!["plugin.xml".to_string()];
        assert!(manifest.check_required("build.properties", &top_level).is_empty());

        let manifest = BuildManifest::parse("bin.includes = META-INF/,ESH-INF/*/*.xml\n");
        assert!(manifest.check_required("build.properties", &paths).is_empty());
    }

    #[test]
    fn test_required_missing() {
        let manifest = BuildManifest::parse("bin.includes = META-INF/,.\n");
        let paths = vec!["ESH-INF/thing/thing-types.xml".to_string()];
        let diagnostics = manifest.check_required("build.properties", &paths);

        assert_eq!(
            messages(&diagnostics),
            vec![
                "The file ESH-INF/thing/thing-types.xml isn't included in the build.properties file. Good approach is to include all files by adding `ESH-INF/` value to the bin.includes property."
            ]
        );
        assert_eq!(diagnostics[0].rule_id, rule_id::MISSING_INCLUDE);
    }

    #[test]
    fn test_prefix_is_not_a_folder_match() {
        let manifest = BuildManifest::parse("bin.includes = ESH\n");
        let paths = vec!["ESH-INF/a.xml".to_string()];
        assert_eq!(manifest.check_required("build.properties", &paths).len(), 1);
    }

    #[test]
    fn test_suggested_entry_for_top_level_file() {
        assert_eq!(suggested_entry("plugin.xml"), "plugin.xml");
        assert_eq!(suggested_entry("OSGI-INF/a.xml"), "OSGI-INF/");
    }
}
