//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! The mdast produced by the `markdown` crate is flattened into top-level
//! blocks. Byte positions are only used to slice out the literal text of each
//! block; they are not exposed to callers.

use markdown::mdast::Node;
use markdown::{ParseOptions, to_mdast};
use readmelint_ast::lines::{lines, strip_bom};
use readmelint_ast::{BlockKind, BlockNode, FenceStyle, ListItem};

use crate::{ParseError, Parser};

/// Markdown parser implementation.
///
/// Uses `markdown-rs` with GitHub Flavored Markdown enabled.
pub struct MarkdownParser;

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self
    }

    /// Gets default parse options (GFM).
    fn default_options() -> ParseOptions {
        ParseOptions::gfm()
    }

    /// Converts a top-level mdast node to a BlockNode.
    fn convert_block(&self, node: &Node, source: &str) -> BlockNode {
        let raw = Self::node_source(node, source);
        let anchor = lines(raw).next().unwrap_or_default();

        let kind = match node {
            Node::Heading(heading) => BlockKind::Header {
                level: heading.depth,
                text: node.to_string(),
                is_link: Self::is_link_only(&heading.children),
            },

            Node::List(list) => BlockKind::List {
                ordered: list.ordered,
                items: list
                    .children
                    .iter()
                    .map(|item| self.convert_item(item, source))
                    .collect(),
            },

            Node::Code(_) => self.convert_code(raw),

            Node::Paragraph(_) => BlockKind::Paragraph {
                text: node.to_string(),
            },

            _ => BlockKind::Other,
        };

        BlockNode::new(kind, anchor, Self::count_lines(raw))
    }

    fn convert_item(&self, node: &Node, source: &str) -> ListItem {
        let raw = Self::node_source(node, source);
        ListItem::new(node.to_string(), Self::count_lines(raw) > 1)
    }

    /// Splits a code block into fence style, body and closing state.
    ///
    /// markdown-rs silently runs an unclosed fence to the end of the
    /// document, so closure is decided from the raw text.
    fn convert_code(&self, raw: &str) -> BlockKind {
        let lines: Vec<&str> = lines(raw).collect();
        let opening = lines.first().map(|l| l.trim_start()).unwrap_or_default();

        let fence = if opening.starts_with("```") {
            FenceStyle::Backtick
        } else if opening.starts_with("~~~") {
            FenceStyle::Tilde
        } else {
            FenceStyle::Indented
        };

        let Some(marker) = fence.marker() else {
            return BlockKind::CodeBlock {
                fence,
                body_lines: lines.iter().map(|l| l.to_string()).collect(),
                closed: true,
            };
        };

        let width = opening.chars().take_while(|&c| c == marker).count();
        let closed = lines.len() > 1
            && lines
                .last()
                .is_some_and(|last| Self::is_closing_fence(last, marker, width));
        let body_end = if closed { lines.len() - 1 } else { lines.len() };

        BlockKind::CodeBlock {
            fence,
            body_lines: lines
                .get(1..body_end)
                .unwrap_or_default()
                .iter()
                .map(|l| l.to_string())
                .collect(),
            closed,
        }
    }

    fn is_closing_fence(line: &str, marker: char, width: usize) -> bool {
        let trimmed = line.trim();
        trimmed.chars().count() >= width && trimmed.chars().all(|c| c == marker)
    }

    /// A heading counts as a link when its only non-blank content is a link.
    fn is_link_only(children: &[Node]) -> bool {
        let mut content = children
            .iter()
            .filter(|child| !matches!(child, Node::Text(text) if text.value.trim().is_empty()));

        matches!(
            (content.next(), content.next()),
            (Some(Node::Link(_) | Node::LinkReference(_)), None)
        )
    }

    /// Returns the literal source text covered by a node.
    fn node_source<'s>(node: &Node, source: &'s str) -> &'s str {
        node.position()
            .and_then(|pos| source.get(pos.start.offset..pos.end.offset))
            .unwrap_or_default()
    }

    fn count_lines(raw: &str) -> usize {
        lines(raw.trim_end_matches(['\n', '\r'])).count().max(1)
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, source: &str) -> Result<Vec<BlockNode>, ParseError> {
        let source = strip_bom(source);
        let options = Self::default_options();
        let mdast =
            to_mdast(source, &options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let Node::Root(root) = mdast else {
            return Err(ParseError::MissingRoot);
        };

        Ok(root
            .children
            .iter()
            .map(|child| self.convert_block(child, source))
            .collect())
    }
}
