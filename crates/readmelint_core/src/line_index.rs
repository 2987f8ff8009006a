//! Line index over raw file content.
//!
//! The index is the single source of truth for "what is line N". It keeps
//! the source untouched: whitespace-only lines stay as they are and are only
//! classified as blank.

use readmelint_ast::lines::{line_ranges, strip_bom};

/// Pre-computed metadata for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LineInfo {
    /// Byte offset of line start (inclusive).
    pub start: usize,
    /// Byte offset of end of line content, excluding the line terminator.
    pub end: usize,
    /// Whether this line contains only whitespace.
    pub is_blank: bool,
}

impl LineInfo {
    /// Creates a new LineInfo from a line's content.
    pub(crate) fn from_line(start: usize, line_text: &str) -> Self {
        Self {
            start,
            end: start + line_text.len(),
            is_blank: line_text.trim().is_empty(),
        }
    }
}

/// Ordered, immutable sequence of the lines of a file.
///
/// Lines are 0-indexed. `\r\n`, `\n` and a lone `\r` terminate a line, the
/// same way the Markdown parser splits them; a terminator at the very end of
/// the file does not open an extra line. A leading byte order mark is not
/// part of the first line.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    source: &'a str,
    lines: Vec<LineInfo>,
}

impl<'a> LineIndex<'a> {
    /// Builds the index for the given content.
    pub fn new(source: &'a str) -> Self {
        let source = strip_bom(source);
        Self {
            source,
            lines: Self::compute_lines(source),
        }
    }

    fn compute_lines(source: &str) -> Vec<LineInfo> {
        line_ranges(source)
            .map(|range| LineInfo::from_line(range.start, &source[range]))
            .collect()
    }

    /// Returns the number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the text of a line (0-indexed), without its terminator.
    pub fn line(&self, index: usize) -> Option<&'a str> {
        let info = self.lines.get(index)?;
        self.source.get(info.start..info.end)
    }

    /// Returns true if the line is whitespace-only.
    ///
    /// Lines past the end of the file count as blank.
    pub fn is_blank(&self, index: usize) -> bool {
        self.lines.get(index).is_none_or(|info| info.is_blank)
    }

    /// Returns true if the file has no non-whitespace content at all.
    pub fn is_blank_document(&self) -> bool {
        self.lines.iter().all(|info| info.is_blank)
    }
}
