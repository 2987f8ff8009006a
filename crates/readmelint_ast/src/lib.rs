//! # readmelint_ast
//!
//! Block node definitions for ReadmeLint.
//!
//! A document is represented as a flat, ordered sequence of top-level
//! [`BlockNode`]s. The only containment relation is a list owning its items.
//!
//! Nodes intentionally do not record absolute line numbers. Each node keeps
//! the literal text of its first physical line (its *anchor*) and the number
//! of physical lines it spans, which is enough for the linter to recover the
//! node's position against the raw source.
//!
//! ## Example
//!
//! ```rust
//! use readmelint_ast::{BlockKind, BlockNode};
//!
//! let node = BlockNode::new(
//!     BlockKind::Header {
//!         level: 1,
//!         text: "Title".to_string(),
//!         is_link: false,
//!     },
//!     "# Title",
//!     1,
//! );
//!
//! assert!(node.is_header());
//! assert_eq!(node.kind.name(), "Header");
//! ```

pub mod lines;
mod node;

pub use node::{BlockKind, BlockNode, FenceStyle, ListItem};
