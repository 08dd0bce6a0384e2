//! A forgiving HTML parser producing [`wombat_dom::Document`] trees.
//!
//! The parser never fails: malformed markup degrades to text or comment
//! nodes and unclosed elements are closed at end of input. Behavior
//! switches such as entity decoding, whitespace handling, and XML-flavored
//! syntax live in [`wombat_common::ParserOptions`].

/// The tag-boundary auto-close table.
pub mod boundaries;
/// Replacing subtrees with freshly parsed markup.
pub mod edit;
/// The parser state machine.
pub mod parser;

pub use edit::{set_inner_html, set_outer_html};
pub use parser::{
    parse_document, parse_document_with_codec, parse_fragment, parse_fragment_with_codec,
};
