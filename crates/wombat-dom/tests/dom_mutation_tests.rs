//! Tests for tree mutation: insertion, removal, replacement, and the
//! refusal paths that keep the tree invariants intact.

use wombat_common::ParserOptions;
use wombat_dom::{Document, NewChild, NodeId, NodeKind};

fn new_doc() -> Document {
    Document::new(ParserOptions::default())
}

/// Helper to create an element node and return its handle.
fn elem(doc: &mut Document, tag: &str) -> NodeId {
    doc.create_element(tag).expect("valid tag name")
}

// ========== append_child / insert_before ==========

#[test]
fn test_append_child_ordering() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    assert_eq!(doc.append_child(Document::ROOT, parent), Some(parent));

    let a = elem(&mut doc, "a");
    let b = elem(&mut doc, "b");
    assert_eq!(doc.append_child(parent, a), Some(a));
    assert_eq!(doc.append_child(parent, b), Some(b));

    assert_eq!(doc.children(parent), &[a, b]);
    assert_eq!(doc.parent(a), Some(parent));
    assert_eq!(doc.next_sibling(a), Some(b));
    assert_eq!(doc.previous_sibling(b), Some(a));
    assert_eq!(doc.previous_sibling(a), None);
    assert_eq!(doc.next_sibling(b), None);
}

#[test]
fn test_insert_before_middle() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, parent);

    let a = elem(&mut doc, "a");
    let b = elem(&mut doc, "b");
    let c = elem(&mut doc, "c");
    let _ = doc.append_child(parent, a);
    let _ = doc.append_child(parent, b);
    assert_eq!(doc.insert_before(parent, c, Some(b)), Some(c));

    assert_eq!(doc.children(parent), &[a, c, b]);
}

#[test]
fn test_insert_before_foreign_reference_is_refused() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let other = elem(&mut doc, "section");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(Document::ROOT, other);

    let stranger = elem(&mut doc, "p");
    let _ = doc.append_child(other, stranger);

    let node = elem(&mut doc, "span");
    assert_eq!(doc.insert_before(parent, node, Some(stranger)), None);
    assert!(doc.children(parent).is_empty());
    assert_eq!(doc.parent(node), None);
}

#[test]
fn test_append_child_moves_between_parents() {
    let mut doc = new_doc();
    let first = elem(&mut doc, "div");
    let second = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, first);
    let _ = doc.append_child(Document::ROOT, second);

    let child = elem(&mut doc, "p");
    let _ = doc.append_child(first, child);
    let _ = doc.append_child(second, child);

    assert!(doc.children(first).is_empty());
    assert_eq!(doc.children(second), &[child]);
    assert_eq!(doc.parent(child), Some(second));
}

// ========== remove_child / remove ==========

#[test]
fn test_remove_child_middle_of_three() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, parent);

    let a = elem(&mut doc, "a");
    let b = elem(&mut doc, "b");
    let c = elem(&mut doc, "c");
    let _ = doc.append_child(parent, a);
    let _ = doc.append_child(parent, b);
    let _ = doc.append_child(parent, c);

    assert_eq!(doc.remove_child(parent, b), Some(b));

    assert_eq!(doc.children(parent), &[a, c]);
    assert_eq!(doc.parent(b), None);
    assert_eq!(doc.next_sibling(a), Some(c));
    assert_eq!(doc.previous_sibling(c), Some(a));
}

#[test]
fn test_remove_child_wrong_parent_is_refused() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let other = elem(&mut doc, "div");
    let child = elem(&mut doc, "p");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(Document::ROOT, other);
    let _ = doc.append_child(parent, child);

    assert_eq!(doc.remove_child(other, child), None);
    assert_eq!(doc.children(parent), &[child]);
}

#[test]
fn test_remove_detached_node_is_a_no_op() {
    let mut doc = new_doc();
    let node = elem(&mut doc, "p");
    doc.remove(node);
    assert_eq!(doc.parent(node), None);
}

// ========== replace_child ==========

#[test]
fn test_replace_child() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, parent);

    let a = elem(&mut doc, "a");
    let b = elem(&mut doc, "b");
    let c = elem(&mut doc, "c");
    let d = elem(&mut doc, "d");
    let _ = doc.append_child(parent, a);
    let _ = doc.append_child(parent, b);
    let _ = doc.append_child(parent, c);

    assert_eq!(doc.replace_child(parent, d, b), Some(b));

    assert_eq!(doc.children(parent), &[a, d, c]);
    assert_eq!(doc.parent(b), None);
    assert_eq!(doc.parent(d), Some(parent));
}

#[test]
fn test_replace_child_with_itself_is_refused() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let a = elem(&mut doc, "a");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(parent, a);

    assert_eq!(doc.replace_child(parent, a, a), None);
    assert_eq!(doc.children(parent), &[a]);
}

// ========== cycle prevention ==========

#[test]
fn test_node_cannot_contain_itself() {
    let mut doc = new_doc();
    let node = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, node);

    assert_eq!(doc.append_child(node, node), None);
    assert_eq!(doc.children(Document::ROOT), &[node]);
    assert!(doc.children(node).is_empty());
}

#[test]
fn test_ancestor_cannot_move_into_descendant() {
    let mut doc = new_doc();
    let outer = elem(&mut doc, "div");
    let middle = elem(&mut doc, "section");
    let inner = elem(&mut doc, "p");
    let _ = doc.append_child(Document::ROOT, outer);
    let _ = doc.append_child(outer, middle);
    let _ = doc.append_child(middle, inner);

    assert_eq!(doc.append_child(inner, outer), None);

    assert_eq!(doc.children(Document::ROOT), &[outer]);
    assert_eq!(doc.parent(outer), Some(Document::ROOT));
    assert!(doc.children(inner).is_empty());
}

#[test]
fn test_fragment_cannot_move_into_its_own_subtree() {
    let mut doc = new_doc();
    let frag = doc.create_fragment();
    let a = elem(&mut doc, "a");
    let b = elem(&mut doc, "b");
    let _ = doc.append_child(frag, a);
    let _ = doc.append_child(frag, b);

    assert_eq!(doc.append_child(a, frag), None);

    assert_eq!(doc.children(frag), &[a, b]);
    assert_eq!(doc.parent(a), Some(frag));
    assert_eq!(doc.parent(b), Some(frag));
    assert!(doc.children(a).is_empty());
}

#[test]
fn test_fragment_cannot_move_into_a_deeper_descendant() {
    let mut doc = new_doc();
    let frag = doc.create_fragment();
    let outer = elem(&mut doc, "div");
    let inner = elem(&mut doc, "p");
    let sibling = elem(&mut doc, "hr");
    let _ = doc.append_child(frag, outer);
    let _ = doc.append_child(frag, sibling);
    let _ = doc.append_child(outer, inner);

    assert_eq!(doc.insert_before(inner, frag, None), None);

    assert_eq!(doc.children(frag), &[outer, sibling]);
    assert!(doc.children(inner).is_empty());
    assert_eq!(doc.parent(inner), Some(outer));
}

// ========== parents that cannot hold children ==========

#[test]
fn test_void_elements_refuse_children() {
    let mut doc = new_doc();
    let br = elem(&mut doc, "br");
    let _ = doc.append_child(Document::ROOT, br);

    let text = doc.create_text_node("x");
    assert_eq!(doc.append_child(br, text), None);
    assert!(doc.children(br).is_empty());
}

#[test]
fn test_text_nodes_refuse_children() {
    let mut doc = new_doc();
    let text = doc.create_text_node("x");
    let _ = doc.append_child(Document::ROOT, text);

    let inner = elem(&mut doc, "b");
    assert_eq!(doc.append_child(text, inner), None);
}

// ========== fragments ==========

#[test]
fn test_single_child_fragment_unwraps() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, parent);

    let frag = doc.create_fragment();
    let only = elem(&mut doc, "p");
    let _ = doc.append_child(frag, only);

    assert_eq!(doc.append_child(parent, frag), Some(frag));
    assert_eq!(doc.children(parent), &[only]);
    assert_eq!(doc.parent(only), Some(parent));
    assert_eq!(doc.kind(frag), NodeKind::DocumentFragment);
}

#[test]
fn test_fragment_children_are_spliced_as_a_batch() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let marker = elem(&mut doc, "hr");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(parent, marker);

    let frag = doc.create_fragment();
    let x = elem(&mut doc, "x");
    let y = elem(&mut doc, "y");
    let _ = doc.append_child(frag, x);
    let _ = doc.append_child(frag, y);

    assert_eq!(doc.insert_before(parent, frag, Some(marker)), Some(frag));

    assert_eq!(doc.children(parent), &[x, y, marker]);
    assert!(doc.children(frag).is_empty());
    assert_eq!(doc.parent(x), Some(parent));
    assert_eq!(doc.parent(y), Some(parent));
}

#[test]
fn test_empty_fragment_insert_is_refused() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let _ = doc.append_child(Document::ROOT, parent);

    let frag = doc.create_fragment();
    assert_eq!(doc.append_child(parent, frag), None);
    assert!(doc.children(parent).is_empty());
}

// ========== batch wrappers ==========

#[test]
fn test_before_and_after_accept_text() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let anchor = elem(&mut doc, "span");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(parent, anchor);

    doc.before(anchor, &[NewChild::from("pre")]);
    doc.after(anchor, &[NewChild::from("post")]);

    let children = doc.children(parent).to_vec();
    assert_eq!(children.len(), 3);
    assert_eq!(doc.node_value(children[0]), Some("pre"));
    assert_eq!(children[1], anchor);
    assert_eq!(doc.node_value(children[2]), Some("post"));
}

#[test]
fn test_replace_with() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let a = elem(&mut doc, "a");
    let b = elem(&mut doc, "b");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(parent, a);
    let _ = doc.append_child(parent, b);

    let replacement = elem(&mut doc, "c");
    doc.replace_with(a, &[NewChild::from(replacement), NewChild::from("tail")]);

    let children = doc.children(parent).to_vec();
    assert_eq!(children.len(), 3);
    assert_eq!(children[0], replacement);
    assert_eq!(doc.node_value(children[1]), Some("tail"));
    assert_eq!(children[2], b);
    assert_eq!(doc.parent(a), None);
}

#[test]
fn test_replace_children() {
    let mut doc = new_doc();
    let parent = elem(&mut doc, "div");
    let old = elem(&mut doc, "p");
    let _ = doc.append_child(Document::ROOT, parent);
    let _ = doc.append_child(parent, old);

    let fresh = elem(&mut doc, "ul");
    doc.replace_children(parent, &[NewChild::from(fresh)]);

    assert_eq!(doc.children(parent), &[fresh]);
    assert_eq!(doc.parent(old), None);
}

#[test]
fn test_prepend_lands_after_the_doctype() {
    let mut doc = new_doc();
    let doctype = doc.create_document_type("html", "", "");
    let _ = doc.append_child(Document::ROOT, doctype);
    let html = elem(&mut doc, "html");
    let _ = doc.append_child(Document::ROOT, html);

    let comment = doc.create_comment("banner");
    doc.prepend(Document::ROOT, &[NewChild::from(comment)]);

    assert_eq!(doc.children(Document::ROOT), &[doctype, comment, html]);
}
