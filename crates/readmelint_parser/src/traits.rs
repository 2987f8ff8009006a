//! Parser trait definition.

use readmelint_ast::BlockNode;

use crate::ParseError;

/// Trait for splitting source text into top-level blocks.
///
/// Implementations must yield blocks in document order and give every block
/// an anchor line taken verbatim from the source, so that the linter can
/// re-locate it.
pub trait Parser {
    /// Returns the name of this parser.
    fn name(&self) -> &str;

    /// Returns the file extensions this parser handles, without the leading dot.
    fn extensions(&self) -> &[&str];

    /// Parses the source text into top-level blocks.
    fn parse(&self, source: &str) -> Result<Vec<BlockNode>, ParseError>;

    /// Returns true if this parser can handle the given file extension.
    fn can_parse(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
