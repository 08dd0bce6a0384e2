//! Replacing subtrees with freshly parsed markup.
//!
//! The markup is parsed with the owning document's options and entity
//! codec, so a document never mixes parsing regimes, and the parsed nodes
//! are inserted through the document's own mutation primitive, so the
//! structural invariants (single `HEAD`, single `BODY`, single doctype)
//! hold afterwards.

use wombat_common::tags::is_void_element;
use wombat_dom::{Document, NodeId};

use crate::parser::parse_fragment_with_codec;

/// Parses `html` into a fragment of `doc`'s arena, returning the fragment
/// handle. The fragment is empty when the markup yields no nodes.
fn parse_into_fragment(doc: &mut Document, html: &str) -> NodeId {
    let parsed = parse_fragment_with_codec(html, doc.options().clone(), doc.codec().clone());
    let fragment = doc.create_fragment();
    let children: Vec<NodeId> = parsed.children(parsed.root()).to_vec();
    for child in children {
        let copy = doc.adopt_subtree(&parsed, child);
        let _ = doc.append_child(fragment, copy);
    }
    fragment
}

/// Replaces a node's children with the tree parsed from `html`.
///
/// On the document root the whole document is rebuilt: the root reverts to
/// a fragment, the markup is parsed in, and the root is promoted again when
/// the new markup carries a document element. On elements, markup that
/// yields no nodes leaves the children untouched, while an empty string
/// clears them. Void elements and non-container nodes ignore the call.
pub fn set_inner_html(doc: &mut Document, node: NodeId, html: &str) {
    if node == Document::ROOT {
        doc.demote_root_to_fragment();
        doc.detach_children(Document::ROOT);
        if !html.is_empty() {
            let fragment = parse_into_fragment(doc, html);
            let children: Vec<NodeId> = doc.children(fragment).to_vec();
            for child in children {
                let _ = doc.append_child(Document::ROOT, child);
            }
        }
        doc.setup_document();
        return;
    }

    if !doc.kind(node).is_container() || doc.tag_name(node).is_some_and(is_void_element) {
        return;
    }
    if html.is_empty() {
        doc.detach_children(node);
        return;
    }
    let fragment = parse_into_fragment(doc, html);
    if doc.children(fragment).is_empty() {
        return;
    }
    let count = doc.children(node).len();
    let _ = doc.insert(node, fragment, 0, count);
}

/// Replaces the node itself with the tree parsed from `html`. An empty
/// string removes the node. Ignored on the root and on detached nodes.
pub fn set_outer_html(doc: &mut Document, node: NodeId, html: &str) {
    if node == Document::ROOT {
        return;
    }
    let Some(parent) = doc.parent(node) else {
        return;
    };
    if html.is_empty() {
        doc.remove(node);
        return;
    }
    let Some(idx) = doc.children(parent).iter().position(|&c| c == node) else {
        return;
    };
    let fragment = parse_into_fragment(doc, html);
    if doc.children(fragment).is_empty() {
        return;
    }
    let _ = doc.insert(parent, fragment, idx, 1);
}

// ========== tests ==========

#[cfg(test)]
mod tests {
    use wombat_common::ParserOptions;
    use wombat_dom::{Document, NodeKind};

    use super::{set_inner_html, set_outer_html};
    use crate::parser::{parse_document, parse_fragment};

    #[test]
    fn test_set_inner_html_replaces_children() {
        let mut doc = parse_fragment("<div><span>old</span></div>", ParserOptions::default());
        let div = doc.children(doc.root())[0];
        set_inner_html(&mut doc, div, "<em>new</em> text");
        let children = doc.children(div).to_vec();
        assert_eq!(children.len(), 2);
        assert_eq!(doc.tag_name(children[0]), Some("EM"));
        assert_eq!(doc.outer_html(div), "<div><em>new</em> text</div>");
    }

    #[test]
    fn test_set_inner_html_empty_string_clears() {
        let mut doc = parse_fragment("<div>content</div>", ParserOptions::default());
        let div = doc.children(doc.root())[0];
        set_inner_html(&mut doc, div, "");
        assert!(doc.children(div).is_empty());
    }

    #[test]
    fn test_set_inner_html_refused_on_void_elements() {
        let mut doc = parse_fragment("<br>", ParserOptions::default());
        let br = doc.children(doc.root())[0];
        set_inner_html(&mut doc, br, "<span>x</span>");
        assert!(doc.children(br).is_empty());
    }

    #[test]
    fn test_set_inner_html_rebuilds_whole_document() {
        let mut doc = parse_document("<html><head></head><body>a</body></html>", ParserOptions::default());
        assert_eq!(doc.kind(doc.root()), NodeKind::Document);
        set_inner_html(
            &mut doc,
            Document::ROOT,
            "<html><head><title>New</title></head><body>b</body></html>",
        );
        assert_eq!(doc.kind(doc.root()), NodeKind::Document);
        assert_eq!(doc.title(), "New");
        let body = doc.body().unwrap();
        assert_eq!(doc.text_content(body), "b");
    }

    #[test]
    fn test_set_inner_html_can_demote_document() {
        let mut doc = parse_document("<html><body></body></html>", ParserOptions::default());
        set_inner_html(&mut doc, Document::ROOT, "<p>plain</p>");
        assert_eq!(doc.kind(doc.root()), NodeKind::DocumentFragment);
        assert!(doc.document_element().is_none());
    }

    #[test]
    fn test_set_outer_html_replaces_node() {
        let mut doc = parse_fragment("<div><span>a</span><b>b</b></div>", ParserOptions::default());
        let div = doc.children(doc.root())[0];
        let span = doc.children(div)[0];
        set_outer_html(&mut doc, span, "<i>c</i><u>d</u>");
        assert_eq!(doc.inner_html(div), "<i>c</i><u>d</u><b>b</b>");
    }

    #[test]
    fn test_set_outer_html_empty_string_removes() {
        let mut doc = parse_fragment("<div><span>a</span>rest</div>", ParserOptions::default());
        let div = doc.children(doc.root())[0];
        let span = doc.children(div)[0];
        set_outer_html(&mut doc, span, "");
        assert_eq!(doc.inner_html(div), "rest");
    }

    #[test]
    fn test_set_outer_html_keeps_singleton_rules() {
        let mut doc = parse_document(
            "<html><head></head><body>x</body></html>",
            ParserOptions::default(),
        );
        let body = doc.body().unwrap();
        set_outer_html(&mut doc, body, "<body>y</body>");
        let body = doc.body().unwrap();
        assert_eq!(doc.text_content(body), "y");
        let de = doc.document_element().unwrap();
        let bodies = doc
            .children(de)
            .iter()
            .filter(|&&c| doc.tag_name(c) == Some("BODY"))
            .count();
        assert_eq!(bodies, 1);
    }
}
