//! Structural rules for documentation files.
//!
//! A single forward pass over the top-level blocks. Each block is first
//! re-located in the line index, then checked against its neighbouring lines.

use readmelint_ast::{BlockKind, BlockNode};
use regex::Regex;
use tracing::debug;

use crate::LinterError;
use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::line_index::LineIndex;
use crate::locator::LineLocator;

/// Rule identifiers.
pub mod rule_id {
    pub const EMPTY_FILE: &str = "empty-file";
    pub const HEADER_BLANK_LINE: &str = "header-blank-line";
    pub const HEADER_AT_END: &str = "header-at-end";
    pub const LIST_BLANK_LINE_BEFORE: &str = "list-blank-line-before";
    pub const LIST_BLANK_LINE_AFTER: &str = "list-blank-line-after";
    pub const CODE_BLANK_LINE_BEFORE: &str = "code-blank-line-before";
    pub const CODE_BLANK_LINE_AFTER: &str = "code-blank-line-after";
    pub const CODE_UNCLOSED: &str = "code-unclosed";

    /// All structural rule ids.
    pub const ALL: &[&str] = &[
        EMPTY_FILE,
        HEADER_BLANK_LINE,
        HEADER_AT_END,
        LIST_BLANK_LINE_BEFORE,
        LIST_BLANK_LINE_AFTER,
        CODE_BLANK_LINE_BEFORE,
        CODE_BLANK_LINE_AFTER,
        CODE_UNCLOSED,
    ];
}

pub const MSG_HEADER_BLANK_LINE: &str = "Missing an empty line after the Markdown header (#).";
pub const MSG_HEADER_AT_END: &str =
    "There is a header at the end of the Markdown file. Please consider adding some content below.";
pub const MSG_LIST_BLANK_LINE_BEFORE: &str = "The line before a Markdown list must be empty.";
pub const MSG_LIST_BLANK_LINE_AFTER: &str = "The line after a Markdown list must be empty.";
pub const MSG_CODE_BLANK_LINE_BEFORE: &str =
    "The line before code formatting section must be empty.";
pub const MSG_CODE_BLANK_LINE_AFTER: &str =
    "The line after code formatting section must be empty.";
pub const MSG_CODE_UNCLOSED: &str =
    "There is an empty or unclosed code formatting section. Please correct it.";

/// Message for an empty documentation file.
pub fn empty_file_message(file_name: &str) -> String {
    format!("The file {} should not be empty.", file_name)
}

/// Headers exempt from the end-of-file header rule.
#[derive(Debug, Clone, Default)]
pub struct HeaderExceptions {
    patterns: Vec<Regex>,
}

impl HeaderExceptions {
    /// Compiles the given regular expressions.
    pub fn new(patterns: &[String]) -> Result<Self, LinterError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|e| {
                    LinterError::config(format!("Invalid header exception '{}': {}", p, e))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { patterns })
    }

    /// Returns true if the header text matches any exception.
    pub fn matches(&self, header_text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(header_text))
    }
}

/// Spacing and placement checks for one document.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    header_exceptions: HeaderExceptions,
}

/// Recovered first and last line (0-indexed, inclusive) of a block.
type LineSpan = Option<(usize, usize)>;

impl RuleEngine {
    pub fn new(header_exceptions: HeaderExceptions) -> Self {
        Self { header_exceptions }
    }

    /// Runs all structural rules over `blocks`.
    ///
    /// `blocks` must be the top-level blocks of the content behind `index`,
    /// in document order.
    pub fn check(
        &self,
        file_name: &str,
        index: &LineIndex<'_>,
        blocks: &[BlockNode],
        locator: &dyn LineLocator,
        sink: &mut dyn DiagnosticSink,
    ) {
        if index.is_blank_document() {
            sink.report(Diagnostic::file_level(
                rule_id::EMPTY_FILE,
                empty_file_message(file_name),
            ));
            return;
        }

        let mut visitor = BlockVisitor {
            engine: self,
            index,
            locator,
            sink,
            hint: 0,
            seen_content: false,
        };

        for (i, block) in blocks.iter().enumerate() {
            visitor.visit(block, blocks.get(i + 1));
        }
    }
}

struct BlockVisitor<'e, 'i, 'a> {
    engine: &'e RuleEngine,
    index: &'i LineIndex<'a>,
    locator: &'e dyn LineLocator,
    sink: &'e mut dyn DiagnosticSink,
    /// First line the next block may start on.
    hint: usize,
    /// Whether any block has been visited yet.
    seen_content: bool,
}

impl BlockVisitor<'_, '_, '_> {
    fn visit(&mut self, block: &BlockNode, next: Option<&BlockNode>) {
        let span = self.locate(block);

        match &block.kind {
            BlockKind::Header { text, is_link, .. } => {
                self.check_header(text, *is_link, span, next);
            }
            BlockKind::List { .. } => {
                self.check_surrounding_lines(
                    span,
                    next,
                    (rule_id::LIST_BLANK_LINE_BEFORE, MSG_LIST_BLANK_LINE_BEFORE),
                    (rule_id::LIST_BLANK_LINE_AFTER, MSG_LIST_BLANK_LINE_AFTER),
                );
            }
            BlockKind::CodeBlock {
                fence,
                body_lines,
                closed,
            } => {
                self.check_surrounding_lines(
                    span,
                    next,
                    (rule_id::CODE_BLANK_LINE_BEFORE, MSG_CODE_BLANK_LINE_BEFORE),
                    (rule_id::CODE_BLANK_LINE_AFTER, MSG_CODE_BLANK_LINE_AFTER),
                );
                if fence.is_fenced() && (body_lines.is_empty() || !closed) {
                    self.report(rule_id::CODE_UNCLOSED, start_line(span), MSG_CODE_UNCLOSED);
                }
            }
            BlockKind::Paragraph { .. } | BlockKind::Other => {}
        }

        self.seen_content = true;
    }

    fn locate(&mut self, block: &BlockNode) -> LineSpan {
        let Some(start) = self.locator.locate(&block.anchor, self.hint) else {
            debug!(
                "Could not locate {} '{}' at or after line {}",
                block.kind.name(),
                block.anchor,
                self.hint + 1
            );
            return None;
        };

        let last_line = self.index.line_count().saturating_sub(1);
        let end = (start + block.line_span - 1).min(last_line);
        self.hint = end + 1;

        Some((start, end))
    }

    fn check_header(
        &mut self,
        text: &str,
        is_link: bool,
        span: LineSpan,
        next: Option<&BlockNode>,
    ) {
        if next.is_none() {
            if !is_link && !self.engine.header_exceptions.matches(text) {
                self.report(rule_id::HEADER_AT_END, start_line(span), MSG_HEADER_AT_END);
            }
            return;
        }

        if let Some((start, end)) = span
            && !self.index.is_blank(end + 1)
        {
            self.report(rule_id::HEADER_BLANK_LINE, start + 1, MSG_HEADER_BLANK_LINE);
        }
    }

    /// Checks the lines directly before and after a block.
    ///
    /// Reported lines are the offending neighbours, not the block itself.
    fn check_surrounding_lines(
        &mut self,
        span: LineSpan,
        next: Option<&BlockNode>,
        before: (&str, &str),
        after: (&str, &str),
    ) {
        let Some((start, end)) = span else {
            return;
        };

        if self.seen_content && start > 0 && !self.index.is_blank(start - 1) {
            self.report(before.0, start, before.1);
        }

        if next.is_some() && !self.index.is_blank(end + 1) {
            self.report(after.0, end + 2, after.1);
        }
    }

    fn report(&mut self, rule_id: &str, line: usize, message: &str) {
        self.sink.report(Diagnostic::new(rule_id, line, message));
    }
}

/// 1-based start line, or 0 when the block could not be located.
fn start_line(span: LineSpan) -> usize {
    span.map_or(0, |(start, _)| start + 1)
}
