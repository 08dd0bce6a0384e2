//! CSS selector support for [`wombat_dom`] documents.
//!
//! Covers a practical subset of Selectors Level 4: type, id, class,
//! attribute, and pseudo selectors, the four combinators, selector lists,
//! and relative selectors inside `:has()`. Selectors compile to an AST
//! once and can then be matched against any number of nodes.
//!
//! ```
//! use wombat_common::ParserOptions;
//! use wombat_css::query_selector;
//! use wombat_dom::Document;
//! use wombat_html::parse_document;
//!
//! let doc = parse_document("<ul><li>a</li><li class=x>b</li></ul>", ParserOptions::default());
//! let hit = query_selector(&doc, Document::ROOT, "ul > li.x").unwrap().unwrap();
//! assert_eq!(doc.text_content(hit), "b");
//! ```

/// The compiled selector representation.
pub mod ast;
/// Selector syntax errors.
pub mod error;
/// Evaluating compiled selectors against a document.
pub mod matcher;
/// Compiling selector text into the AST.
pub mod parser;

pub use ast::SelectorList;
pub use error::SelectorError;
pub use matcher::{closest, matches, matches_selector_list, query_selector, query_selector_all};
pub use parser::parse_selector_list;
