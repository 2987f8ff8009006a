//! # readmelint_parser
//!
//! Block parser for ReadmeLint.
//!
//! This crate provides:
//! - A `Parser` trait producing top-level [`BlockNode`]s
//! - A Markdown implementation backed by `markdown-rs`
//!
//! ## Example
//!
//! ```rust
//! use readmelint_parser::{MarkdownParser, Parser};
//!
//! let parser = MarkdownParser::new();
//! let blocks = parser.parse("# Hello\n\nThis is a paragraph.").unwrap();
//!
//! assert_eq!(blocks.len(), 2);
//! assert!(blocks[0].is_header());
//! ```
//!
//! [`BlockNode`]: readmelint_ast::BlockNode

mod error;
mod markdown;
mod traits;

pub use error::ParseError;
pub use markdown::MarkdownParser;
pub use traits::Parser;
