//! Recovery of block positions against the line index.
//!
//! Parsed blocks carry the literal text of their first line but no line
//! number. The locator scans forward from a hint until it finds a line that
//! contains the block's text, ignoring markup decoration on both sides.

use crate::line_index::LineIndex;

/// Finds the line a piece of text starts on.
pub trait LineLocator {
    /// Returns the 0-indexed line at or after `hint` containing `text`,
    /// or `None` when no such line exists.
    fn locate(&self, text: &str, hint: usize) -> Option<usize>;
}

/// Forward-only scan over a [`LineIndex`].
///
/// Never searches before the hint, so blocks visited in document order get
/// non-decreasing lines and a whole file is scanned once.
pub struct ForwardScanLocator<'i, 'a> {
    index: &'i LineIndex<'a>,
}

impl<'i, 'a> ForwardScanLocator<'i, 'a> {
    pub fn new(index: &'i LineIndex<'a>) -> Self {
        Self { index }
    }
}

impl LineLocator for ForwardScanLocator<'_, '_> {
    fn locate(&self, text: &str, hint: usize) -> Option<usize> {
        let needle = strip_decoration(text);

        (hint..self.index.line_count()).find(|&i| {
            if needle.is_empty() {
                return !self.index.is_blank(i);
            }
            self.index
                .line(i)
                .is_some_and(|line| strip_decoration(line).contains(needle))
        })
    }
}

/// Removes leading and trailing block markup from a line.
///
/// Strips surrounding whitespace, block quote markers, ATX heading hashes
/// (opening and closing) and a single list bullet or ordered-list marker.
pub fn strip_decoration(text: &str) -> &str {
    let mut rest = text.trim();

    while let Some(quoted) = rest.strip_prefix('>') {
        rest = quoted.trim_start();
    }

    if rest.starts_with('#') {
        let after = rest.trim_start_matches('#');
        if after.is_empty() || after.starts_with(char::is_whitespace) {
            return strip_closing_hashes(after.trim_start());
        }
        return rest;
    }

    strip_list_marker(rest).trim()
}

fn strip_closing_hashes(text: &str) -> &str {
    let trimmed = text.trim_end();
    let without = trimmed.trim_end_matches('#');

    if without.len() == trimmed.len() || without.is_empty() {
        return without;
    }
    if without.ends_with(char::is_whitespace) {
        without.trim_end()
    } else {
        trimmed
    }
}

fn strip_list_marker(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix(['-', '*', '+']) {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return rest;
        }
        return text;
    }

    let digits = text.bytes().take_while(u8::is_ascii_digit).count();
    if (1..=9).contains(&digits)
        && let Some(rest) = text[digits..].strip_prefix(['.', ')'])
        && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        return rest;
    }

    text
}
