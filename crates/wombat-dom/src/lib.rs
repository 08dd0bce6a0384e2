//! An arena-based HTML document tree.
//!
//! A [`Document`] owns every node it creates in a flat arena and exposes
//! them through [`NodeId`] handles, so moving a subtree between parents is a
//! handle rewrite rather than a copy. The mutation API mirrors the familiar
//! DOM method shapes (`append_child`, `insert_before`, `before`, `after`,
//! `replace_children`, ...) while silently refusing requests that would
//! break the tree invariants: no cycles, one doctype, one `HEAD`, and one
//! `BODY`/`FRAMESET` per document.
//!
//! Parsing markup into a document lives in the companion HTML crate; this
//! crate covers the tree itself, traversal, and serialization back to
//! markup.

/// Attribute storage for elements.
pub mod attr;
/// The document arena and node constructors.
pub mod document;
/// Construction-time validation errors.
pub mod error;
/// Mutation primitives and DOM-style wrappers.
pub mod mutate;
/// Node handles, kinds, and payload types.
pub mod node;
/// Serialization back to markup.
pub mod serialize;
/// Class-attribute token operations.
pub mod token_list;
/// Mutation-tolerant pre-order traversal.
pub mod traverse;

pub use attr::{AttrValue, Attributes};
pub use document::Document;
pub use error::DomError;
pub use mutate::NewChild;
pub use node::{DoctypeData, ElementData, NodeId, NodeKind};
