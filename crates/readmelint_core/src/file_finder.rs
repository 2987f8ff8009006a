use crate::error::LinterError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

pub struct FileFinder {
    include_globs: Option<GlobSet>,
    exclude_globs: Option<GlobSet>,
    doc_file_name: String,
}

impl FileFinder {
    /// Creates a finder.
    ///
    /// `doc_file_name` is the file collected when a pattern names a directory.
    pub fn new(
        include: &[String],
        exclude: &[String],
        doc_file_name: impl Into<String>,
    ) -> Result<Self, LinterError> {
        let include_globs = build_globset(include)?;
        let exclude_globs = build_globset(exclude)?;

        Ok(Self {
            include_globs,
            exclude_globs,
            doc_file_name: doc_file_name.into(),
        })
    }

    /// Checks if a file path should be ignored based on include/exclude patterns.
    pub fn should_ignore(&self, path: &Path) -> bool {
        if self
            .exclude_globs
            .as_ref()
            .is_some_and(|excludes| excludes.is_match(path))
        {
            return true;
        }

        if self
            .include_globs
            .as_ref()
            .is_some_and(|includes| !includes.is_match(path))
        {
            return true;
        }

        false
    }

    /// Resolves patterns to a sorted, de-duplicated file list.
    ///
    /// Existing files are taken as-is, existing directories are searched for
    /// the documentation file, and anything else is a glob walked from
    /// `base_dir`.
    pub fn discover_files(
        &self,
        patterns: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, LinterError> {
        let mut files = Vec::new();

        let mut glob_builder = GlobSetBuilder::new();
        let mut has_globs = false;

        for pattern in patterns {
            let path = Path::new(pattern);
            let metadata = path.symlink_metadata();

            if metadata.as_ref().is_ok_and(|m| m.file_type().is_file()) {
                if !self.should_ignore(path) {
                    files.push(path.to_path_buf());
                }
            } else if metadata.as_ref().is_ok_and(|m| m.file_type().is_dir()) {
                files.extend(self.doc_files_in(path));
            } else {
                let glob = Glob::new(pattern).map_err(|e| {
                    LinterError::config(format!("Invalid pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
                has_globs = true;
            }
        }

        if has_globs {
            let glob_set = glob_builder
                .build()
                .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

            for entry in WalkDir::new(base_dir).into_iter().filter_map(|e| e.ok()) {
                let path = entry.path();
                let relative = path.strip_prefix(base_dir).unwrap_or(path);
                if entry.file_type().is_file()
                    && glob_set.is_match(relative)
                    && !self.should_ignore(relative)
                {
                    files.push(path.to_path_buf());
                }
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }

    fn doc_files_in(&self, dir: &Path) -> Vec<PathBuf> {
        WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name() == self.doc_file_name.as_str())
            .map(|entry| entry.into_path())
            .filter(|path| !self.should_ignore(path.strip_prefix(dir).unwrap_or(path)))
            .collect()
    }
}

/// Lists files under `dir` matching any pattern.
///
/// Returned paths are relative to `dir`, joined with `/` and sorted.
pub fn find_relative(dir: &Path, patterns: &[String]) -> Result<Vec<String>, LinterError> {
    let Some(globset) = build_globset(patterns)? else {
        return Ok(Vec::new());
    };

    let mut found: Vec<String> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry.path().strip_prefix(dir).ok()?;
            let joined = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            globset.is_match(&joined).then_some(joined)
        })
        .collect();

    found.sort();
    Ok(found)
}

pub(crate) fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>, LinterError> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| LinterError::config(format!("Invalid glob pattern: {}", e)))?;
        builder.add(glob);
    }

    let globset = builder
        .build()
        .map_err(|e| LinterError::config(format!("Failed to build globset: {}", e)))?;

    Ok(Some(globset))
}
