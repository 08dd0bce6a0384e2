//! Serialization back to markup.
//!
//! Tag names serialize lowercase, bare and empty attributes serialize as a
//! bare name, and text is run through the document's entity codec according
//! to the `encode_entities` option, except inside `SCRIPT` and `STYLE`
//! where content is emitted raw.

use wombat_common::tags::{is_raw_text_element, is_void_element};

use crate::attr::AttrValue;
use crate::document::Document;
use crate::node::{NodeData, NodeId};

impl Document {
    /// Serializes a node and its subtree to markup. Document and fragment
    /// nodes serialize as the concatenation of their children.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.serialize_into(id, &mut out);
        out
    }

    /// Serializes only the node's children. Leaf kinds yield an empty
    /// string.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.serialize_into(child, &mut out);
        }
        out
    }

    fn encode_text(&self, text: &str) -> String {
        self.codec().encode(text, &self.options().encode_entities)
    }

    fn serialize_into(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            NodeData::Element(element) => {
                let tag = element.tag_name.to_lowercase();
                out.push('<');
                out.push_str(&tag);
                for (name, value) in element.attributes.iter() {
                    out.push(' ');
                    out.push_str(name);
                    match value {
                        AttrValue::Bare => {}
                        AttrValue::Value(v) if v.is_empty() => {}
                        AttrValue::Value(v) => {
                            out.push_str("=\"");
                            out.push_str(&self.encode_text(v));
                            out.push('"');
                        }
                    }
                }
                out.push('>');
                for &child in self.children(id) {
                    self.serialize_into(child, out);
                }
                if !is_void_element(&element.tag_name) {
                    out.push_str("</");
                    out.push_str(&tag);
                    out.push('>');
                }
            }

            NodeData::Text(text) => {
                let raw_parent = self
                    .parent(id)
                    .and_then(|p| self.tag_name(p))
                    .is_some_and(is_raw_text_element);
                if raw_parent {
                    out.push_str(text);
                } else {
                    out.push_str(&self.encode_text(text));
                }
            }

            NodeData::Cdata(data) => {
                out.push_str("<![CDATA[");
                out.push_str(data);
                out.push_str("]]>");
            }

            NodeData::ProcessingInstruction { target, data } => {
                out.push_str("<?");
                out.push_str(target);
                if !data.is_empty() {
                    out.push(' ');
                    out.push_str(data);
                }
                out.push_str("?>");
            }

            NodeData::Comment(data) => {
                out.push_str("<!--");
                out.push_str(data);
                out.push_str("-->");
            }

            NodeData::Doctype(doctype) => {
                out.push_str("<!DOCTYPE");
                if !doctype.name.is_empty() {
                    out.push(' ');
                    out.push_str(&doctype.name);
                }
                if !doctype.public_id.is_empty() {
                    out.push_str(" PUBLIC \"");
                    out.push_str(&doctype.public_id);
                    out.push('"');
                }
                if !doctype.system_id.is_empty() {
                    if doctype.public_id.is_empty() {
                        out.push_str(" SYSTEM");
                    }
                    out.push_str(" \"");
                    out.push_str(&doctype.system_id);
                    out.push('"');
                }
                out.push('>');
            }

            NodeData::Document | NodeData::Fragment => {
                for &child in self.children(id) {
                    self.serialize_into(child, out);
                }
            }
        }
    }
}
