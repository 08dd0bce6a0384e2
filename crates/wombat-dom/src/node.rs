//! Node storage types for the document arena.
//!
//! A [`crate::Document`] owns every node in a flat arena and hands out
//! [`NodeId`] handles. Each node stores its parent handle, an ordered list of
//! child handles, and a payload that varies by kind, following
//! <https://dom.spec.whatwg.org/#interface-node>. Moving a node between
//! parents is a handle rewrite, never a copy.

use strum_macros::Display;

use crate::attr::Attributes;

/// A stable handle to a node inside one [`crate::Document`] arena.
///
/// Handles are only meaningful for the document that created them. A handle
/// stays valid for the document's lifetime even after the node is detached
/// from the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The arena index behind this handle.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The eight node kinds, mirroring the DOM `nodeType` values that this
/// document model supports.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// An element with a tag name and attributes.
    Element,
    /// A run of character data.
    Text,
    /// A `<![CDATA[ ... ]]>` section.
    CdataSection,
    /// A `<?target data?>` processing instruction.
    ProcessingInstruction,
    /// A `<!-- ... -->` comment.
    Comment,
    /// The root of a tree that has a recognized document element.
    Document,
    /// A `<!DOCTYPE ...>` declaration.
    DocumentType,
    /// The root of a parse result or a detached subtree container.
    DocumentFragment,
}

impl NodeKind {
    /// Returns `true` for kinds that may hold child nodes.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Element | Self::Document | Self::DocumentFragment
        )
    }
}

/// Payload of an element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The tag name, stored uppercase.
    pub tag_name: String,
    /// The element's attributes, in markup order.
    pub attributes: Attributes,
}

/// Payload of a `<!DOCTYPE>` node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DoctypeData {
    /// The root element name, stored lowercase.
    pub name: String,
    /// The PUBLIC identifier, or empty.
    pub public_id: String,
    /// The SYSTEM identifier, or empty.
    pub system_id: String,
}

/// Kind-specific node payload.
#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Document,
    Fragment,
    Element(ElementData),
    Text(String),
    Cdata(String),
    ProcessingInstruction { target: String, data: String },
    Comment(String),
    Doctype(DoctypeData),
}

impl NodeData {
    pub(crate) const fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Fragment => NodeKind::DocumentFragment,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Cdata(_) => NodeKind::CdataSection,
            Self::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            Self::Comment(_) => NodeKind::Comment,
            Self::Doctype(_) => NodeKind::DocumentType,
        }
    }
}

/// One arena slot.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) data: NodeData,
}

impl Node {
    pub(crate) const fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}
