//! Linter configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonc_parser::ParseOptions;
use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::LinterError;
use crate::diagnostic::{Diagnostic, Severity};

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Result<Validator, String>> = OnceLock::new();

/// Configuration for the linter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinterConfig {
    /// Name of the documentation file to lint inside a directory.
    #[serde(default = "default_doc_file_name")]
    pub doc_file_name: String,

    /// Documentation folder that must never be packaged.
    #[serde(default = "default_doc_folder_name")]
    pub doc_folder_name: String,

    /// Regular expressions for headers allowed at the end of a file.
    #[serde(default = "default_header_exceptions")]
    pub header_exceptions: Vec<String>,

    /// Build manifest checks.
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// Rule configuration (enable/disable/severity).
    #[serde(default)]
    pub options: HashMap<String, RuleOption>,

    /// File patterns to include.
    #[serde(default)]
    pub include: Vec<String>,

    /// File patterns to exclude.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Base directory for resolving relative paths.
    /// This is usually the directory containing the configuration file.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Settings for the `build.properties` cross-checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Manifest file name, looked up next to the documentation file.
    #[serde(default = "default_manifest_file_name")]
    pub file_name: String,

    /// Globs (relative to the manifest's directory) of files that must be
    /// covered by `bin.includes`.
    #[serde(default = "default_required_includes")]
    pub required_includes: Vec<String>,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: default_manifest_file_name(),
            required_includes: default_required_includes(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_doc_file_name() -> String {
    "README.md".to_string()
}

fn default_doc_folder_name() -> String {
    "doc".to_string()
}

fn default_header_exceptions() -> Vec<String> {
    vec![r"^[^\p{L}\p{N}]*$".to_string()]
}

fn default_manifest_file_name() -> String {
    "build.properties".to_string()
}

fn default_required_includes() -> Vec<String> {
    vec!["ESH-INF/**/*.xml".to_string()]
}

/// Configuration for a single rule (in options map).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RuleOption {
    /// Rule is enabled/disabled (boolean).
    Enabled(bool),
    /// Rule is enabled with severity string ("error", "warning", "info", "off").
    Severity(String),
}

impl RuleOption {
    /// Returns whether the rule is enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            RuleOption::Enabled(enabled) => *enabled,
            RuleOption::Severity(s) => s != "off",
        }
    }

    /// Returns the severity override, if any.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            RuleOption::Enabled(_) => None,
            RuleOption::Severity(s) => match s.as_str() {
                "error" => Some(Severity::Error),
                "warning" => Some(Severity::Warning),
                "info" => Some(Severity::Info),
                _ => None,
            },
        }
    }
}

impl LinterConfig {
    /// Configuration file names, in lookup order.
    pub const CONFIG_FILES: &[&str] = &[".readmelint.jsonc", ".readmelint.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            doc_file_name: default_doc_file_name(),
            doc_folder_name: default_doc_folder_name(),
            header_exceptions: default_header_exceptions(),
            manifest: ManifestConfig::default(),
            options: HashMap::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            base_dir: None,
        }
    }

    /// Returns the first configuration file present in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.readmelint.jsonc`, `.readmelint.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinterError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LinterError::config(format!("Failed to read config: {}", e)))?;

        let mut config = Self::from_json(&content)?;

        if let Some(parent) = path.parent() {
            config.base_dir = Some(parent.to_path_buf());
        }

        Ok(config)
    }

    /// Parses configuration from a JSON (with comments) string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LinterError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LinterError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let schema = CONFIG_SCHEMA
            .get_or_init(|| {
                let schema_json: serde_json::Value = serde_json::from_str(SCHEMA_JSON)
                    .map_err(|e| format!("Invalid embedded config schema: {}", e))?;
                Validator::new(&schema_json)
                    .map_err(|e| format!("Invalid config schema compilation: {}", e))
            })
            .as_ref()
            .map_err(|e| LinterError::config(e.clone()))?;

        if let Err(e) = schema.validate(&value) {
            let error_msg = format!("{} at {}", e, e.instance_path());
            return Err(LinterError::config(format!(
                "Config validation failed: {}",
                error_msg
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LinterError::config(format!("Invalid config: {}", e)))
    }

    /// Drops diagnostics of disabled rules and applies severity overrides.
    pub fn apply_options(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        diagnostics
            .into_iter()
            .filter_map(|diagnostic| match self.options.get(&diagnostic.rule_id) {
                None => Some(diagnostic),
                Some(option) if !option.is_enabled() => None,
                Some(option) => match option.severity() {
                    Some(severity) => Some(diagnostic.with_severity(severity)),
                    None => Some(diagnostic),
                },
            })
            .collect()
    }
}

impl Default for LinterConfig {
    fn default() -> Self {
        Self::new()
    }
}
