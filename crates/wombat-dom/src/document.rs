//! The document arena: node storage, constructors, and read accessors.

use wombat_common::chars::{is_name_char, is_name_start_char};
use wombat_common::{EntityCodec, ParserOptions};

use crate::attr::{AttrValue, Attributes};
use crate::error::DomError;
use crate::node::{DoctypeData, ElementData, Node, NodeData, NodeId, NodeKind};

/// An HTML document tree.
///
/// The document owns every node it has ever created in a flat arena and
/// exposes them through [`NodeId`] handles. The arena root is created as a
/// [`NodeKind::DocumentFragment`]; [`Document::setup_document`] promotes it
/// to a full [`NodeKind::Document`] once a recognized document element is
/// present among its children.
///
/// A document also carries the frozen [`ParserOptions`] it was parsed with
/// and the [`EntityCodec`] used for entity decoding and encoding; both stay
/// fixed for the document's lifetime.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    options: ParserOptions,
    codec: EntityCodec,
    doctype: Option<NodeId>,
    document_element: Option<NodeId>,
    head: Option<NodeId>,
    body: Option<NodeId>,
}

impl Document {
    /// The root handle of every document.
    pub const ROOT: NodeId = NodeId(0);

    /// Creates an empty document with the default entity table.
    #[must_use]
    pub fn new(options: ParserOptions) -> Self {
        Self::with_codec(options, EntityCodec::default())
    }

    /// Creates an empty document with an explicit entity codec.
    #[must_use]
    pub fn with_codec(options: ParserOptions, codec: EntityCodec) -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Fragment)],
            options,
            codec,
            doctype: None,
            document_element: None,
            head: None,
            body: None,
        }
    }

    /// The options this document was created with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// The entity codec this document serializes and decodes with.
    #[must_use]
    pub const fn codec(&self) -> &EntityCodec {
        &self.codec
    }

    /// The root node handle.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        Self::ROOT
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    // ========== constructors ==========

    /// Creates a detached element. The tag name is stored uppercase.
    ///
    /// # Errors
    /// [`DomError::InvalidArgument`] if `tag_name` is empty.
    pub fn create_element(&mut self, tag_name: &str) -> Result<NodeId, DomError> {
        if tag_name.is_empty() {
            return Err(DomError::InvalidArgument(
                "element tag name must not be empty".to_owned(),
            ));
        }
        Ok(self.alloc(NodeData::Element(ElementData {
            tag_name: tag_name.to_uppercase(),
            attributes: Attributes::new(),
        })))
    }

    /// Creates a detached text node.
    pub fn create_text_node(&mut self, text: &str) -> NodeId {
        self.alloc(NodeData::Text(text.to_owned()))
    }

    /// Creates a detached comment node.
    pub fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeData::Comment(data.to_owned()))
    }

    /// Creates a detached CDATA section.
    ///
    /// # Errors
    /// [`DomError::InvalidData`] if `data` contains the section terminator
    /// `]]>`.
    pub fn create_cdata_section(&mut self, data: &str) -> Result<NodeId, DomError> {
        if data.contains("]]>") {
            return Err(DomError::InvalidData(format!(
                "CDATA data {data:?} contains ']]>'"
            )));
        }
        Ok(self.alloc(NodeData::Cdata(data.to_owned())))
    }

    /// Creates a detached processing instruction.
    ///
    /// # Errors
    /// [`DomError::InvalidCharacter`] if `target` is empty or not an XML
    /// `Name`; [`DomError::InvalidData`] if `data` contains the terminator
    /// `?>`.
    pub fn create_processing_instruction(
        &mut self,
        target: &str,
        data: &str,
    ) -> Result<NodeId, DomError> {
        let mut chars = target.chars();
        let valid = chars
            .next()
            .is_some_and(is_name_start_char)
            && chars.all(is_name_char);
        if !valid {
            return Err(DomError::InvalidCharacter(format!(
                "invalid processing instruction target {target:?}"
            )));
        }
        if data.contains("?>") {
            return Err(DomError::InvalidData(format!(
                "processing instruction data {data:?} contains '?>'"
            )));
        }
        Ok(self.alloc(NodeData::ProcessingInstruction {
            target: target.to_owned(),
            data: data.to_owned(),
        }))
    }

    /// Creates a detached doctype node. The name is stored lowercase; when
    /// it is empty, all three fields are left empty.
    pub fn create_document_type(
        &mut self,
        name: &str,
        public_id: &str,
        system_id: &str,
    ) -> NodeId {
        let data = if name.is_empty() {
            DoctypeData::default()
        } else {
            DoctypeData {
                name: name.to_lowercase(),
                public_id: public_id.to_owned(),
                system_id: system_id.to_owned(),
            }
        };
        self.alloc(NodeData::Doctype(data))
    }

    /// Creates a detached, empty document fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::Fragment)
    }

    // ========== tree accessors ==========

    /// The kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).data.kind()
    }

    /// The parent of a node, or `None` when detached or at the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The node's children, in order. Leaf kinds always report an empty
    /// slice.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// The first child, if any.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.first().copied()
    }

    /// The last child, if any.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).children.last().copied()
    }

    /// The sibling immediately before this node under its current parent.
    #[must_use]
    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let idx = siblings.iter().position(|&c| c == id)?;
        idx.checked_sub(1).map(|i| siblings[i])
    }

    /// The sibling immediately after this node under its current parent.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        let siblings = &self.node(parent).children;
        let idx = siblings.iter().position(|&c| c == id)?;
        siblings.get(idx + 1).copied()
    }

    /// The uppercase tag name of an element, or `None` for other kinds.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element(e) => Some(&e.tag_name),
            _ => None,
        }
    }

    /// The DOM `nodeName` of a node: the tag name for elements, the target
    /// for processing instructions, the doctype name, or a `#`-prefixed
    /// kind label.
    #[must_use]
    pub fn node_name(&self, id: NodeId) -> String {
        match &self.node(id).data {
            NodeData::Element(e) => e.tag_name.clone(),
            NodeData::Text(_) => "#text".to_owned(),
            NodeData::Cdata(_) => "#cdata-section".to_owned(),
            NodeData::ProcessingInstruction { target, .. } => target.clone(),
            NodeData::Comment(_) => "#comment".to_owned(),
            NodeData::Document => "#document".to_owned(),
            NodeData::Fragment => "#document-fragment".to_owned(),
            NodeData::Doctype(d) => d.name.clone(),
        }
    }

    /// The character data of a text, CDATA, comment, or processing
    /// instruction node.
    #[must_use]
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Text(v) | NodeData::Cdata(v) | NodeData::Comment(v) => Some(v),
            NodeData::ProcessingInstruction { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Replaces the character data of a text, CDATA, comment, or processing
    /// instruction node. Other kinds ignore the call.
    pub fn set_node_value(&mut self, id: NodeId, value: &str) {
        match &mut self.node_mut(id).data {
            NodeData::Text(v) | NodeData::Cdata(v) | NodeData::Comment(v) => {
                *v = value.to_owned();
            }
            NodeData::ProcessingInstruction { data, .. } => *data = value.to_owned(),
            _ => {}
        }
    }

    /// The doctype payload of a [`NodeKind::DocumentType`] node.
    #[must_use]
    pub fn doctype_data(&self, id: NodeId) -> Option<&DoctypeData> {
        match &self.node(id).data {
            NodeData::Doctype(d) => Some(d),
            _ => None,
        }
    }

    /// Concatenated text of the subtree, skipping comments, CDATA sections,
    /// and processing instructions.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        match &self.node(id).data {
            NodeData::Text(v) => v.clone(),
            NodeData::Cdata(v) | NodeData::Comment(v) => v.clone(),
            NodeData::ProcessingInstruction { data, .. } => data.clone(),
            NodeData::Doctype(_) => String::new(),
            NodeData::Document | NodeData::Fragment | NodeData::Element(_) => {
                let mut text = String::new();
                self.collect_text(id, &mut text);
                text
            }
        }
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        for &child in &self.node(id).children {
            match &self.node(child).data {
                NodeData::Text(v) => out.push_str(v),
                NodeData::Comment(_)
                | NodeData::Cdata(_)
                | NodeData::ProcessingInstruction { .. } => {}
                _ => self.collect_text(child, out),
            }
        }
    }

    /// Replaces a container's children with a single text node, or replaces
    /// the character data of a leaf node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.kind(id).is_container() {
            let node = self.create_text_node(text);
            self.detach_children(id);
            self.node_mut(id).children.push(node);
            self.node_mut(node).parent = Some(id);
            self.refresh_caches();
        } else {
            self.set_node_value(id, text);
        }
    }

    // ========== document-level accessors ==========

    /// The doctype node at the root level, if any.
    #[must_use]
    pub const fn doctype(&self) -> Option<NodeId> {
        self.doctype
    }

    /// The recognized root element (`HTML`, or the doctype's name when
    /// `allow_custom_root_element` is set), if present.
    #[must_use]
    pub const fn document_element(&self) -> Option<NodeId> {
        self.document_element
    }

    /// The first `HEAD` child of the document element, if any.
    #[must_use]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// The first `BODY` or `FRAMESET` child of the document element, if
    /// any.
    #[must_use]
    pub const fn body(&self) -> Option<NodeId> {
        self.body
    }

    /// The text of the first `TITLE` element under `head`, or empty.
    #[must_use]
    pub fn title(&self) -> String {
        let Some(head) = self.head else {
            return String::new();
        };
        self.get_elements_by_tag_name(head, "title")
            .first()
            .map_or_else(String::new, |&t| self.text_content(t))
    }

    /// Sets the document title, creating a `TITLE` element under `head` if
    /// needed. Ignored when the document has no `head`.
    pub fn set_title(&mut self, text: &str) {
        let Some(head) = self.head else { return };
        let title = match self.get_elements_by_tag_name(head, "title").first() {
            Some(&t) => t,
            None => {
                let Ok(t) = self.create_element("title") else {
                    return;
                };
                let _ = self.append_child(head, t);
                t
            }
        };
        self.set_text_content(title, text);
    }

    /// Replaces the current body with `new_body`, or appends it under the
    /// document element when there is none. Ignored unless `new_body` is a
    /// `BODY` or `FRAMESET` element and a document element exists.
    pub fn set_body(&mut self, new_body: NodeId) {
        let is_body_like = matches!(self.tag_name(new_body), Some("BODY" | "FRAMESET"));
        let Some(document_element) = self.document_element else {
            return;
        };
        if !is_body_like || Some(new_body) == self.body {
            return;
        }
        match self.body {
            Some(old) => {
                let _ = self.replace_child(document_element, new_body, old);
            }
            None => {
                let _ = self.append_child(document_element, new_body);
            }
        }
    }

    // ========== attributes ==========

    /// All attributes of an element, or `None` for other kinds.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> Option<&Attributes> {
        match &self.node(id).data {
            NodeData::Element(e) => Some(&e.attributes),
            _ => None,
        }
    }

    pub(crate) fn attributes_mut(&mut self, id: NodeId) -> Option<&mut Attributes> {
        match &mut self.node_mut(id).data {
            NodeData::Element(e) => Some(&mut e.attributes),
            _ => None,
        }
    }

    fn fold_attribute_name(&self, name: &str) -> String {
        if self.options.lower_attribute_case {
            name.to_lowercase()
        } else {
            name.to_owned()
        }
    }

    /// Looks up an attribute value, applying the document's attribute-name
    /// case rule.
    #[must_use]
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        let name = self.fold_attribute_name(name);
        self.attributes(id)?.get(&name)
    }

    /// Returns `true` if the element has the attribute, bare or valued.
    #[must_use]
    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        let name = self.fold_attribute_name(name);
        self.attributes(id).is_some_and(|a| a.contains(&name))
    }

    /// Sets an attribute on an element. Ignored on non-elements.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<AttrValue>) {
        if name.is_empty() {
            return;
        }
        let name = self.fold_attribute_name(name);
        if let Some(attrs) = self.attributes_mut(id) {
            attrs.set(&name, value.into());
        }
    }

    /// Removes an attribute from an element.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) {
        let name = self.fold_attribute_name(name);
        if let Some(attrs) = self.attributes_mut(id) {
            let _ = attrs.remove(&name);
        }
    }

    /// Adds or removes a bare attribute. With `force`, the attribute is
    /// unconditionally added (`true`) or removed (`false`). Returns whether
    /// the attribute is present afterwards.
    pub fn toggle_attribute(&mut self, id: NodeId, name: &str, force: Option<bool>) -> bool {
        if name.is_empty() {
            return false;
        }
        let name = self.fold_attribute_name(name);
        let Some(attrs) = self.attributes_mut(id) else {
            return false;
        };
        if attrs.contains(&name) {
            if force == Some(true) {
                return true;
            }
            let _ = attrs.remove(&name);
            false
        } else {
            if force == Some(false) {
                return false;
            }
            attrs.set(&name, AttrValue::Bare);
            true
        }
    }

    /// The element's `id` attribute value, or empty.
    #[must_use]
    pub fn element_id(&self, id: NodeId) -> String {
        self.get_attribute(id, "id")
            .and_then(AttrValue::as_str)
            .unwrap_or("")
            .to_owned()
    }

    // ========== element collections ==========

    /// The first element in the subtree under `scope` whose `id` attribute
    /// equals `id_value`. The scope node itself is not considered.
    #[must_use]
    pub fn get_element_by_id(&self, scope: NodeId, id_value: &str) -> Option<NodeId> {
        if id_value.is_empty() {
            return None;
        }
        let mut found = None;
        self.for_each(scope, Some(NodeKind::Element), |doc, node| {
            if doc.get_attribute(node, "id").and_then(AttrValue::as_str) == Some(id_value) {
                found = Some(node);
                return false;
            }
            true
        });
        found
    }

    /// Every element in the subtree under `scope` carrying all of the
    /// whitespace-separated class names in `class_names`.
    #[must_use]
    pub fn get_elements_by_class_name(&self, scope: NodeId, class_names: &str) -> Vec<NodeId> {
        let wanted: Vec<&str> = class_names.split_whitespace().collect();
        let mut result = Vec::new();
        if wanted.is_empty() {
            return result;
        }
        self.for_each(scope, Some(NodeKind::Element), |doc, node| {
            if wanted.iter().all(|c| doc.class_list_contains(node, c)) {
                result.push(node);
            }
            true
        });
        result
    }

    /// Every element in the subtree under `scope` with the given tag name
    /// (case-insensitive), or every element for `"*"`.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, scope: NodeId, tag_name: &str) -> Vec<NodeId> {
        let mut result = Vec::new();
        if tag_name.is_empty() {
            return result;
        }
        let wanted = tag_name.to_uppercase();
        self.for_each(scope, Some(NodeKind::Element), |doc, node| {
            if wanted == "*" || doc.tag_name(node) == Some(wanted.as_str()) {
                result.push(node);
            }
            true
        });
        result
    }

    /// Every element in the subtree under `scope` whose `name` attribute
    /// equals `name`.
    #[must_use]
    pub fn get_elements_by_name(&self, scope: NodeId, name: &str) -> Vec<NodeId> {
        let mut result = Vec::new();
        if name.is_empty() {
            return result;
        }
        self.for_each(scope, Some(NodeKind::Element), |doc, node| {
            if doc.get_attribute(node, "name").and_then(AttrValue::as_str) == Some(name) {
                result.push(node);
            }
            true
        });
        result
    }

    // ========== cloning and adoption ==========

    /// Clones a non-root node within this document, optionally with its
    /// whole subtree. The clone is detached.
    ///
    /// # Errors
    /// [`DomError::InvalidArgument`] when `id` is the root; clone the
    /// [`Document`] itself instead.
    pub fn clone_node(&mut self, id: NodeId, deep: bool) -> Result<NodeId, DomError> {
        if id == Self::ROOT {
            return Err(DomError::InvalidArgument(
                "the root node cannot be cloned; clone the document".to_owned(),
            ));
        }
        let clone = self.alloc(self.node(id).data.clone());
        if deep {
            let children: Vec<NodeId> = self.node(id).children.clone();
            for child in children {
                let child_clone = self.clone_node(child, true)?;
                self.node_mut(clone).children.push(child_clone);
                self.node_mut(child_clone).parent = Some(clone);
            }
        }
        Ok(clone)
    }

    /// Deep-copies a subtree from another document's arena into this one,
    /// returning the detached copy's handle.
    pub fn adopt_subtree(&mut self, source: &Self, node: NodeId) -> NodeId {
        let copy = self.alloc(source.node(node).data.clone());
        for &child in &source.node(node).children {
            let child_copy = self.adopt_subtree(source, child);
            self.node_mut(copy).children.push(child_copy);
            self.node_mut(child_copy).parent = Some(copy);
        }
        copy
    }

    // ========== document setup ==========

    fn expected_root_tag(&self) -> String {
        if self.options.allow_custom_root_element
            && let Some(dt) = self.doctype
            && let NodeData::Doctype(d) = &self.node(dt).data
            && !d.name.is_empty()
        {
            return d.name.to_uppercase();
        }
        "HTML".to_owned()
    }

    /// Promotes the root from fragment to document when a recognized
    /// document element is among its children, and re-homes stray
    /// root-level nodes around it.
    ///
    /// Stray nodes between the first root-level element and the document
    /// element move to the front of `head` (or `body`, or the document
    /// element); stray nodes after the document element move to the end of
    /// `body` (or `head`, or the document element). Nodes before the first
    /// root-level element, such as comments and the doctype, stay at the
    /// root.
    pub fn setup_document(&mut self) {
        self.refresh_caches();
        let expected = self.expected_root_tag();
        let root_children: Vec<NodeId> = self.node(Self::ROOT).children.clone();

        let mut first_element_position: Option<usize> = None;
        let mut document_element_position: Option<usize> = None;
        for (i, &child) in root_children.iter().enumerate() {
            if self.tag_name(child) == Some(expected.as_str()) {
                document_element_position = Some(i);
                break;
            }
            if first_element_position.is_none() && self.kind(child) == NodeKind::Element {
                first_element_position = Some(i);
            }
        }

        let Some(mut de_position) = document_element_position else {
            return;
        };
        let document_element = root_children[de_position];

        self.node_mut(Self::ROOT).data = NodeData::Document;
        self.refresh_caches();

        if let Some(first) = first_element_position {
            let new_parent = self
                .head
                .or(self.body)
                .unwrap_or(document_element);
            let moved: Vec<NodeId> = self
                .node_mut(Self::ROOT)
                .children
                .drain(first..de_position)
                .collect();
            for (offset, &node) in moved.iter().enumerate() {
                self.node_mut(new_parent).children.insert(offset, node);
                self.node_mut(node).parent = Some(new_parent);
            }
            de_position -= moved.len();
        }

        let tail_len = self.node(Self::ROOT).children.len();
        if de_position + 1 < tail_len {
            let new_parent = self
                .body
                .or(self.head)
                .unwrap_or(document_element);
            let moved: Vec<NodeId> = self
                .node_mut(Self::ROOT)
                .children
                .drain(de_position + 1..)
                .collect();
            for &node in &moved {
                self.node_mut(new_parent).children.push(node);
                self.node_mut(node).parent = Some(new_parent);
            }
        }

        self.refresh_caches();
    }

    /// Reverts the root to a plain fragment and clears the document-level
    /// caches. Used before re-parsing the document's entire markup;
    /// [`Self::setup_document`] promotes the root again afterwards.
    pub fn demote_root_to_fragment(&mut self) {
        self.node_mut(Self::ROOT).data = NodeData::Fragment;
        self.refresh_caches();
    }

    /// Recomputes the cached doctype, document element, head, and body
    /// handles from the current tree shape.
    pub(crate) fn refresh_caches(&mut self) {
        let doctype = self
            .node(Self::ROOT)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).data.kind() == NodeKind::DocumentType);
        self.doctype = doctype;

        self.document_element = None;
        self.head = None;
        self.body = None;
        if self.node(Self::ROOT).data.kind() != NodeKind::Document {
            return;
        }
        let expected = self.expected_root_tag();
        let document_element = self
            .node(Self::ROOT)
            .children
            .iter()
            .copied()
            .find(|&c| self.tag_name(c) == Some(expected.as_str()));
        self.document_element = document_element;

        if let Some(de) = document_element {
            let mut head = None;
            let mut body = None;
            for &child in &self.node(de).children {
                match self.tag_name(child) {
                    Some("HEAD") if head.is_none() => head = Some(child),
                    Some("BODY" | "FRAMESET") if body.is_none() => body = Some(child),
                    _ => {}
                }
                if head.is_some() && body.is_some() {
                    break;
                }
            }
            self.head = head;
            self.body = body;
        }
    }
}
