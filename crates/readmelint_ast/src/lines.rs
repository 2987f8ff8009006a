//! Physical line splitting shared by the parser and the linter.
//!
//! `\r\n`, `\n` and a lone `\r` all end a line, as in CommonMark. A
//! terminator at the very end of the text does not open an extra line.

use std::ops::Range;

const BOM: char = '\u{feff}';

/// Removes a leading byte order mark.
pub fn strip_bom(text: &str) -> &str {
    text.strip_prefix(BOM).unwrap_or(text)
}

/// Byte ranges of the lines of `text`, excluding their terminators.
pub fn line_ranges(text: &str) -> LineRanges<'_> {
    LineRanges {
        bytes: text.as_bytes(),
        pos: 0,
    }
}

/// Lines of `text` without their terminators.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    line_ranges(text).map(move |range| &text[range])
}

/// Iterator returned by [`line_ranges`].
#[derive(Debug, Clone)]
pub struct LineRanges<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for LineRanges<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        if start >= self.bytes.len() {
            return None;
        }

        match self.bytes[start..]
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
        {
            Some(offset) => {
                let end = start + offset;
                let crlf = self.bytes[end] == b'\r' && self.bytes.get(end + 1) == Some(&b'\n');
                self.pos = if crlf { end + 2 } else { end + 1 };
                Some(start..end)
            }
            None => {
                self.pos = self.bytes.len();
                Some(start..self.bytes.len())
            }
        }
    }
}
