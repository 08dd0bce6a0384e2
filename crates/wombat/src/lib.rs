//! A lightweight HTML document model: forgiving parsing, a mutable
//! arena-backed tree, serialization, and CSS selector queries.
//!
//! This crate re-exports the public surface of the member crates so that
//! most users need a single dependency:
//!
//! - [`wombat_html`] parses markup into a [`Document`], never failing on
//!   malformed input.
//! - [`wombat_dom`] is the tree itself: node constructors, accessors,
//!   DOM-style mutation with invariant enforcement, traversal, and
//!   serialization back to markup.
//! - [`wombat_css`] compiles and matches a Selectors Level 4 subset.
//! - [`wombat_common`] carries the shared options record and entity codec.
//!
//! ```
//! use wombat::{parse_document, query_selector, Document, ParserOptions};
//!
//! let doc = parse_document(
//!     "<ul><li>one</li><li class=pick>two</li></ul>",
//!     ParserOptions::default(),
//! );
//! let li = query_selector(&doc, Document::ROOT, "li.pick").unwrap().unwrap();
//! assert_eq!(doc.text_content(li), "two");
//! ```

pub use wombat_common::{EncodeEntities, EntityCodec, ParserOptions};
pub use wombat_css::{
    closest, matches, matches_selector_list, parse_selector_list, query_selector,
    query_selector_all, SelectorError, SelectorList,
};
pub use wombat_dom::{AttrValue, Document, DomError, NodeId, NodeKind};
pub use wombat_html::{
    parse_document, parse_document_with_codec, parse_fragment, parse_fragment_with_codec,
    set_inner_html, set_outer_html,
};
