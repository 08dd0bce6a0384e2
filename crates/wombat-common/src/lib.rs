//! Shared utilities for the wombat document model.
//!
//! This crate holds the pieces that both the HTML parser and the CSS selector
//! parser are built on: the character-cursor [`lexer::Lexer`], the
//! [`entities::EntityCodec`] used for `&name;` expansion and encoding, the
//! frozen [`options::ParserOptions`] record, character-class tables, and the
//! deduplicated warning reporter.

/// Character classification tables (whitespace, XML names, text helpers).
pub mod chars;
/// Entity encoding and decoding against a name/replacement table.
pub mod entities;
/// Character-cursor primitives over a fixed input string.
pub mod lexer;
/// The frozen per-document parser option record.
pub mod options;
/// Tag classification shared by the parser, serializer, and tree model.
pub mod tags;
/// Deduplicated warnings for unsupported-feature reporting.
pub mod warning;

pub use entities::EntityCodec;
pub use lexer::Lexer;
pub use options::{EncodeEntities, ParserOptions};
