//! BlockNode definition.

use serde::Serialize;

/// How a code block is delimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FenceStyle {
    /// Fenced with backticks (```` ``` ````).
    Backtick,
    /// Fenced with tildes (`~~~`).
    Tilde,
    /// Indented by four spaces, no fence lines.
    Indented,
}

impl FenceStyle {
    /// Returns true for backtick and tilde fences.
    pub fn is_fenced(&self) -> bool {
        !matches!(self, FenceStyle::Indented)
    }

    /// Returns the fence character, if any.
    pub fn marker(&self) -> Option<char> {
        match self {
            FenceStyle::Backtick => Some('`'),
            FenceStyle::Tilde => Some('~'),
            FenceStyle::Indented => None,
        }
    }
}

/// A single item of a list block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    /// Rendered text of the item.
    pub text: String,
    /// Whether the item spans more than one physical line.
    pub is_multiline: bool,
}

impl ListItem {
    /// Creates a new list item.
    pub fn new(text: impl Into<String>, is_multiline: bool) -> Self {
        Self {
            text: text.into(),
            is_multiline,
        }
    }
}

/// Node-specific payload of a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum BlockKind {
    /// ATX (`#`) or setext (`===`) heading.
    Header {
        /// Heading level (1-6).
        level: u8,
        /// Rendered inline text.
        text: String,
        /// Whether the whole heading content is a single hyperlink.
        is_link: bool,
    },

    /// Ordered or unordered list.
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },

    /// Fenced or indented code block.
    CodeBlock {
        fence: FenceStyle,
        /// Raw lines between the fences.
        body_lines: Vec<String>,
        /// Whether a closing fence was found. Always true for indented blocks.
        closed: bool,
    },

    /// Plain paragraph.
    Paragraph {
        text: String,
    },

    /// Any other block (thematic break, HTML, table, block quote, definition).
    Other,
}

impl BlockKind {
    /// Returns a stable name for the node kind.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Header { .. } => "Header",
            BlockKind::List { .. } => "List",
            BlockKind::CodeBlock { .. } => "CodeBlock",
            BlockKind::Paragraph { .. } => "Paragraph",
            BlockKind::Other => "Other",
        }
    }
}

/// A top-level block of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    /// Node payload.
    pub kind: BlockKind,

    /// Literal text of the first physical line of the node.
    pub anchor: String,

    /// Number of physical lines covered by the node (at least 1).
    pub line_span: usize,
}

impl BlockNode {
    /// Creates a new block node.
    pub fn new(kind: BlockKind, anchor: impl Into<String>, line_span: usize) -> Self {
        Self {
            kind,
            anchor: anchor.into(),
            line_span: line_span.max(1),
        }
    }

    pub fn is_header(&self) -> bool {
        matches!(self.kind, BlockKind::Header { .. })
    }

    pub fn is_list(&self) -> bool {
        matches!(self.kind, BlockKind::List { .. })
    }

    pub fn is_code_block(&self) -> bool {
        matches!(self.kind, BlockKind::CodeBlock { .. })
    }
}
